// ==========================================
// RTB 商务提案系统 - 领域模型层
// ==========================================
// 职责: 定义表单输入、规范化提案、派生值、字段寻址
// 红线: 不含校验逻辑,不含计算逻辑
// ==========================================

pub mod derived;
pub mod field;
pub mod proposal;

// 重导出核心类型
pub use derived::{DerivedProposal, PaymentSplit};
pub use field::{parse_date_text, FieldPath, FieldPathError, FieldValue, ItemField};
pub use proposal::{LineItem, Proposal, ProposalInput};
