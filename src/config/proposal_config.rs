// ==========================================
// RTB 商务提案系统 - 提案配置
// ==========================================
// 职责: 表单默认值、模拟提交延迟、日志级别
// 来源优先级: 内置默认值 < JSON 配置文件 < 环境变量
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::engine::lenient::{parse_leading_decimal, parse_leading_int};

// ==========================================
// 环境变量键名
// ==========================================
pub mod env_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "RTB_PROPOSTA_CONFIG";
    /// 模拟提交延迟（毫秒）
    pub const SUBMIT_DELAY_MS: &str = "RTB_PROPOSTA_SUBMIT_DELAY_MS";
    /// 默认日志级别（RUST_LOG 优先）
    pub const LOG_LEVEL: &str = "RTB_PROPOSTA_LOG_LEVEL";
    /// JSON 日志输出开关
    pub const LOG_JSON: &str = "RTB_PROPOSTA_LOG_JSON";
}

/// 默认模拟提交延迟
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: path={path}, {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效: {key}={value}")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// ProposalDefaults - 可选字段默认值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalDefaults {
    pub validity_days: String,
    pub signature_percent: String,
    pub scheduled_percent: String,
    pub revision: String,
    pub confidential: String,
    pub prepared_by: String,
}

impl Default for ProposalDefaults {
    fn default() -> Self {
        Self {
            validity_days: "30".to_string(),
            signature_percent: "25".to_string(),
            scheduled_percent: "75".to_string(),
            revision: "01".to_string(),
            confidential: "Sim".to_string(),
            prepared_by: "RTB HYDRO".to_string(),
        }
    }
}

impl ProposalDefaults {
    /// 默认有效天数的数值形式（配置已校验，异常时回退 30）
    pub fn validity_days_value(&self) -> u64 {
        parse_leading_int(&self.validity_days)
            .and_then(|days| u64::try_from(days).ok())
            .unwrap_or(30)
    }
}

// ==========================================
// ProposalConfig - 提案配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    pub defaults: ProposalDefaults,
    pub submit_delay_ms: u64,
    pub log_level: String,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            defaults: ProposalDefaults::default(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            log_level: "info".to_string(),
        }
    }
}

impl ProposalConfig {
    /// 加载配置
    ///
    /// 顺序:
    /// 1) 内置默认值
    /// 2) 配置文件（存在时）
    /// 3) 环境变量覆写
    pub fn load() -> Result<Self, ConfigError> {
        let base = match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        let config = base.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取（缺失的键使用内置默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ProposalConfig = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "已加载配置文件");
        Ok(config)
    }

    /// 应用覆写（lookup 通常为环境变量读取）
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(env_keys::SUBMIT_DELAY_MS) {
            self.submit_delay_ms = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: env_keys::SUBMIT_DELAY_MS.to_string(),
                    value: raw.clone(),
                }
            })?;
        }

        if let Some(raw) = lookup(env_keys::LOG_LEVEL) {
            let level = raw.trim();
            if !level.is_empty() {
                self.log_level = level.to_string();
            }
        }

        Ok(self)
    }

    /// 校验默认值可被计算器解析
    pub fn validate(&self) -> Result<(), ConfigError> {
        let defaults = &self.defaults;

        let days_ok = parse_leading_int(&defaults.validity_days).map_or(false, |d| d >= 0);
        if !days_ok {
            return Err(ConfigError::InvalidValue {
                key: "defaults.validity_days".to_string(),
                value: defaults.validity_days.clone(),
            });
        }

        for (key, value) in [
            ("defaults.signature_percent", &defaults.signature_percent),
            ("defaults.scheduled_percent", &defaults.scheduled_percent),
        ] {
            if parse_leading_decimal(value).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }

        for (key, value) in [
            ("defaults.revision", &defaults.revision),
            ("defaults.confidential", &defaults.confidential),
            ("defaults.prepared_by", &defaults.prepared_by),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// 默认配置文件路径
///
/// - 环境变量 RTB_PROPOSTA_CONFIG 优先
/// - 否则为用户配置目录下的 rtb-proposta/config.json
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(env_keys::CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("rtb-proposta").join("config.json"))
}
