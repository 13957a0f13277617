// ==========================================
// RTB 商务提案系统 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别与 JSON 输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::env_keys;

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（优先于 default_level）
///   例如: RUST_LOG=debug 或 RUST_LOG=rtb_proposta=trace
/// - RTB_PROPOSTA_LOG_JSON=1: 以 JSON 行格式输出
///
/// # 示例
/// ```no_run
/// use rtb_proposta::logging;
/// logging::init("info");
/// ```
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var(env_keys::LOG_JSON)
        .map(|v| is_true(&v))
        .unwrap_or(false);

    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
