// ==========================================
// RTB 商务提案系统 - 文档快照
// ==========================================
// 职责: 交给渲染器的只读快照 { proposal, derived }
// 文本排版、分页、打印导出均由渲染器/宿主负责
// ==========================================

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{DerivedProposal, Proposal};
use crate::engine::calculator::{item_value, DerivedValueCalculator};

// ==========================================
// PriceRow - 价格表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    /// 行号（从1开始）
    pub number: usize,
    pub quantity: String,
    pub description: String,
    pub value: Decimal,
}

// ==========================================
// ProposalSnapshot - 提案快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalSnapshot {
    pub proposal: Proposal,
    pub derived: DerivedProposal,
}

impl ProposalSnapshot {
    pub fn new(proposal: Proposal, derived: DerivedProposal) -> Self {
        Self { proposal, derived }
    }

    /// 由提案即时计算派生值并组装快照
    pub fn assemble(proposal: Proposal, calculator: &DerivedValueCalculator) -> Self {
        let derived = calculator.derive(&proposal);
        Self::new(proposal, derived)
    }

    /// 价格表行（按插入顺序编号）
    pub fn price_rows(&self) -> Vec<PriceRow> {
        self.proposal
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| PriceRow {
                number: i + 1,
                quantity: item.quantity.clone(),
                description: item.description.clone(),
                value: item_value(item),
            })
            .collect()
    }
}
