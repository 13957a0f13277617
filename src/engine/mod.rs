// ==========================================
// RTB 商务提案系统 - 引擎层
// ==========================================
// 职责: 表单校验、提案构建、派生值计算
// 红线: 引擎只读取输入，不持有也不修改会话状态
// ==========================================

pub mod builder;
pub mod calculator;
pub mod error;
pub mod lenient;
pub mod validator;

// 重导出核心引擎
pub use builder::ProposalBuilder;
pub use calculator::{
    compute_grand_total, compute_payment_split, compute_validity_date, item_value,
    DerivedValueCalculator, DEFAULT_VALIDITY_DAYS,
};
pub use error::{FieldViolation, ValidationError, ViolationKind};
pub use lenient::parse_money;
pub use validator::ProposalValidator;
