// ==========================================
// RTB 商务提案系统 - 核心库
// ==========================================
// 职责: 商务提案表单的校验、规范化与派生值计算
// 系统定位: 纯内存计算核心（渲染、打印导出由宿主负责）
// ==========================================

// 初始化文案目录
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表单输入、提案、派生值
pub mod domain;

// 引擎层 - 校验、构建、计算
pub mod engine;

// 文档层 - 快照与显示格式
pub mod document;

// 应用层 - 编辑会话控制器
pub mod app;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 文案目录
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    DerivedProposal, FieldPath, FieldValue, ItemField, LineItem, PaymentSplit, Proposal,
    ProposalInput,
};

pub use engine::{
    compute_grand_total, compute_payment_split, compute_validity_date, DerivedValueCalculator,
    FieldViolation, ProposalBuilder, ValidationError, ViolationKind,
};

pub use document::{PriceRow, ProposalSnapshot};

pub use app::{ProposalSession, SessionError, SessionPhase, SimulatedSubmitter};

pub use config::{ProposalConfig, ProposalDefaults};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "RTB Hydro - Propostas Técnicas";
