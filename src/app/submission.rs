// ==========================================
// RTB 商务提案系统 - 提案提交
// ==========================================
// 职责: 提交接口 + 模拟实现（固定人工延迟，代替网络往返）
// 红线: 提交一旦开始，延迟总会执行完毕（无取消语义）
// ==========================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::app::error::SessionError;
use crate::document::ProposalSnapshot;

/// 提交回执
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub session_id: Uuid,
    pub proposal_number: String,
    pub grand_total: Decimal,
    pub completed_at: DateTime<Utc>,
}

// ==========================================
// ProposalSubmitter Trait
// ==========================================
// 实现者: SimulatedSubmitter（本地模拟）
#[async_trait]
pub trait ProposalSubmitter: Send + Sync {
    async fn submit(
        &self,
        session_id: Uuid,
        snapshot: &ProposalSnapshot,
    ) -> Result<SubmissionReceipt, SessionError>;
}

// ==========================================
// SimulatedSubmitter - 模拟提交
// ==========================================
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ProposalSubmitter for SimulatedSubmitter {
    async fn submit(
        &self,
        session_id: Uuid,
        snapshot: &ProposalSnapshot,
    ) -> Result<SubmissionReceipt, SessionError> {
        tokio::time::sleep(self.delay).await;

        let receipt = SubmissionReceipt {
            session_id,
            proposal_number: snapshot.proposal.proposal_number.clone(),
            grand_total: snapshot.derived.grand_total,
            completed_at: Utc::now(),
        };

        tracing::info!(
            %session_id,
            number = %receipt.proposal_number,
            total = %receipt.grand_total,
            "提案已生成"
        );
        Ok(receipt)
    }
}
