// ==========================================
// RTB 商务提案系统 - 配置层
// ==========================================
// 职责: 表单默认值与运行参数，支持文件 + 环境变量覆写
// ==========================================

pub mod proposal_config;

// 重导出核心配置
pub use proposal_config::{
    default_config_path, env_keys, ConfigError, ProposalConfig, ProposalDefaults,
    DEFAULT_SUBMIT_DELAY_MS,
};
