// ==========================================
// RTB 商务提案系统 - 命令行入口
// ==========================================
// 用法: rtb-proposta <proposta.json>
// 输入: 前端表单导出的 ProposalInput JSON
// 输出: 校验通过时打印快照 JSON（stdout）；否则打印字段错误并以 1 退出
// ==========================================

use anyhow::{anyhow, Context};
use serde_json::json;

use rtb_proposta::document::{format_brl, format_optional_date_br};
use rtb_proposta::{i18n, logging, DerivedValueCalculator, ProposalBuilder, ProposalConfig, ProposalInput, ProposalSnapshot};

fn main() -> anyhow::Result<()> {
    let config = ProposalConfig::load().context("无法加载配置")?;

    // 初始化日志系统
    logging::init(&config.log_level);
    i18n::init();

    tracing::info!("{} v{}", rtb_proposta::APP_NAME, rtb_proposta::VERSION);

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("用法: rtb-proposta <proposta.json>"))?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("无法读取输入文件: {}", path))?;
    let input: ProposalInput =
        serde_json::from_str(&raw).with_context(|| format!("输入文件格式错误: {}", path))?;

    let builder = ProposalBuilder::new(config.defaults.clone());
    let calculator = DerivedValueCalculator::new(config.defaults.clone());

    match builder.build(&input) {
        Ok(proposal) => {
            let snapshot = ProposalSnapshot::assemble(proposal, &calculator);
            tracing::info!(
                total = %format_brl(snapshot.derived.grand_total),
                validade = %format_optional_date_br(snapshot.derived.validity_date),
                "提案构建成功"
            );

            let output = json!({
                "proposal": snapshot.proposal,
                "derived": snapshot.derived,
                "priceRows": snapshot.price_rows(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => {
            tracing::warn!("{}", err);
            for (field, messages) in err.field_messages() {
                for message in messages {
                    eprintln!("{}: {}", field, message);
                }
            }
            std::process::exit(1);
        }
    }
}
