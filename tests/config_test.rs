// ==========================================
// ProposalConfig 集成测试
// ==========================================
// 测试目标: 验证配置文件读取与默认值生效
// ==========================================

mod helpers;

use helpers::test_data_builder::ProposalInputBuilder;
use rtb_proposta::config::{ConfigError, ProposalConfig};
use rtb_proposta::engine::{DerivedValueCalculator, ProposalBuilder};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_partial_file_keeps_builtin_defaults() {
    let file = write_config(r#"{"submit_delay_ms": 500, "defaults": {"prepared_by": "RTB SOLUÇÕES"}}"#);
    let config = ProposalConfig::from_file(file.path()).expect("配置应加载成功");

    assert_eq!(config.submit_delay_ms, 500);
    assert_eq!(config.defaults.prepared_by, "RTB SOLUÇÕES");
    assert_eq!(config.defaults.validity_days, "30");
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_configured_defaults_flow_into_builder() {
    let file = write_config(r#"{"defaults": {"validity_days": "60", "signature_percent": "50", "scheduled_percent": "50"}}"#);
    let config = ProposalConfig::from_file(file.path()).unwrap();

    let input = ProposalInputBuilder::valid().build();
    let proposal = ProposalBuilder::new(config.defaults.clone()).build(&input).unwrap();
    assert_eq!(proposal.validity_days, "60");

    let derived = DerivedValueCalculator::new(config.defaults.clone()).derive(&proposal);
    assert_eq!(derived.signature_amount, derived.scheduled_amount);
    assert_eq!(
        derived.validity_date,
        chrono::NaiveDate::from_ymd_opt(2025, 3, 2)
    );
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = write_config("{ not json");
    let result = ProposalConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_default_is_rejected() {
    let file = write_config(r#"{"defaults": {"validity_days": "trinta"}}"#);
    let result = ProposalConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ProposalConfig::from_file(std::path::Path::new("/nonexistent/rtb/config.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
