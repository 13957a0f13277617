// ==========================================
// RTB 商务提案系统 - 派生值
// ==========================================
// 职责: 由 Proposal 计算得出、但不存储在 Proposal 上的值
// 生命周期: 每次读取时重新计算，渲染后丢弃，从不持久化
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// PaymentSplit - 付款拆分
// ==========================================
// 两个百分比之和不要求等于100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    /// 签约时支付金额
    #[serde(rename = "valorAssinatura")]
    pub signature_amount: Decimal,

    /// 按进度表支付金额
    #[serde(rename = "valorEventograma")]
    pub scheduled_amount: Decimal,
}

// ==========================================
// DerivedProposal - 派生提案值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedProposal {
    /// 条目金额合计
    #[serde(rename = "valorTotalGeral")]
    pub grand_total: Decimal,

    /// 有效期截止日（提案日期缺失时为空）
    #[serde(rename = "dataValidade")]
    pub validity_date: Option<NaiveDate>,

    #[serde(rename = "valorAssinatura")]
    pub signature_amount: Decimal,

    #[serde(rename = "valorEventograma")]
    pub scheduled_amount: Decimal,
}

impl DerivedProposal {
    pub fn new(grand_total: Decimal, validity_date: Option<NaiveDate>, split: PaymentSplit) -> Self {
        Self {
            grand_total,
            validity_date,
            signature_amount: split.signature_amount,
            scheduled_amount: split.scheduled_amount,
        }
    }

    pub fn payment_split(&self) -> PaymentSplit {
        PaymentSplit {
            signature_amount: self.signature_amount,
            scheduled_amount: self.scheduled_amount,
        }
    }
}
