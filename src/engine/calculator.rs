// ==========================================
// RTB 商务提案系统 - 派生值计算器
// ==========================================
// 职责: 计算条目合计、付款拆分、有效期截止日
// 红线: 永不失败 —— 任何畸形数值输入降级为 0/默认值，保证实时预览每次按键都能渲染
// 红线: 不做百分比归一化，如实反映用户声明的拆分
// ==========================================

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::config::ProposalDefaults;
use crate::domain::{DerivedProposal, LineItem, PaymentSplit, Proposal, ProposalInput};
use crate::engine::lenient::{parse_leading_decimal, parse_leading_int, parse_money};

/// 有效天数无法解析时的回退值
pub const DEFAULT_VALIDITY_DAYS: u64 = 30;

// ==========================================
// 核心计算函数
// ==========================================

/// 单条金额（解析失败计为 0）
pub fn item_value(item: &LineItem) -> Decimal {
    parse_money(&item.value).unwrap_or_else(|| {
        tracing::debug!(value = %item.value, "条目金额无法解析，按 0 计");
        Decimal::ZERO
    })
}

/// 条目金额合计
///
/// 加法满足交换律，结果与条目顺序无关
pub fn compute_grand_total(items: &[LineItem]) -> Decimal {
    items.iter().map(item_value).fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).unwrap_or_else(|| {
            tracing::debug!(%acc, %value, "合计溢出，忽略该条目");
            acc
        })
    })
}

/// 有效期截止日 = 提案日期 + 有效天数（日历日）
///
/// - 提案日期缺失 → None
/// - 天数无法解析或为负 → 使用 30 天
pub fn compute_validity_date(proposal_date: Option<NaiveDate>, validity_days: &str) -> Option<NaiveDate> {
    validity_date_or(proposal_date, validity_days, DEFAULT_VALIDITY_DAYS)
}

/// 付款拆分
///
/// - 百分比无法解析 → 按 0 计
/// - amount = total * percent / 100
pub fn compute_payment_split(
    grand_total: Decimal,
    signature_percent: &str,
    scheduled_percent: &str,
) -> PaymentSplit {
    PaymentSplit {
        signature_amount: proportion(grand_total, signature_percent),
        scheduled_amount: proportion(grand_total, scheduled_percent),
    }
}

fn proportion(total: Decimal, raw_percent: &str) -> Decimal {
    let percent = parse_leading_decimal(raw_percent).unwrap_or_else(|| {
        tracing::debug!(raw_percent, "百分比无法解析，按 0 计");
        Decimal::ZERO
    });

    total
        .checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

fn validity_date_or(
    proposal_date: Option<NaiveDate>,
    validity_days: &str,
    fallback_days: u64,
) -> Option<NaiveDate> {
    let date = proposal_date?;
    let days = parse_leading_int(validity_days)
        .and_then(|days| u64::try_from(days).ok())
        .unwrap_or_else(|| {
            tracing::debug!(validity_days, fallback_days, "有效天数无法解析，使用默认值");
            fallback_days
        });

    date.checked_add_days(Days::new(days))
}

// ==========================================
// DerivedValueCalculator - 派生值计算器
// ==========================================
// 每次调用都完整重算，不做增量缓存
#[derive(Debug, Clone, Default)]
pub struct DerivedValueCalculator {
    defaults: ProposalDefaults,
}

impl DerivedValueCalculator {
    pub fn new(defaults: ProposalDefaults) -> Self {
        Self { defaults }
    }

    /// 计算已校验提案的派生值
    pub fn derive(&self, proposal: &Proposal) -> DerivedProposal {
        let grand_total = compute_grand_total(&proposal.items);
        let validity_date = validity_date_or(
            Some(proposal.proposal_date),
            &proposal.validity_days,
            self.defaults.validity_days_value(),
        );
        let split = compute_payment_split(
            grand_total,
            &proposal.signature_percent,
            &proposal.scheduled_percent,
        );

        DerivedProposal::new(grand_total, validity_date, split)
    }

    /// 计算编辑中（未校验）输入的派生值，用于实时预览
    ///
    /// 按用户实际输入计算，不套用默认值:
    /// - 天数缺失或空白 → 有效期缺失（显示 N/A）
    /// - 百分比缺失或空白 → 按 0 计
    /// - 缺失的条目不计入合计
    pub fn derive_draft(&self, input: &ProposalInput) -> DerivedProposal {
        let grand_total = compute_grand_total(input.items());
        let validity_date = non_blank(&input.validity_days).and_then(|days| {
            validity_date_or(
                input.proposal_date,
                days,
                self.defaults.validity_days_value(),
            )
        });
        let split = compute_payment_split(
            grand_total,
            input.signature_percent.as_deref().unwrap_or_default(),
            input.scheduled_percent.as_deref().unwrap_or_default(),
        );

        DerivedProposal::new(grand_total, validity_date, split)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grand_total_sums_parsed_values() {
        let items = vec![
            LineItem::new("01", "Revisão geral", "1.000,00"),
            LineItem::new("02", "Troca de rotores", "R$ 2.500,50"),
            LineItem::new("01", "Frete", "a combinar"),
        ];
        assert_eq!(compute_grand_total(&items), dec("3500.50"));
    }

    #[test]
    fn test_grand_total_empty() {
        assert_eq!(compute_grand_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_validity_date_crosses_month() {
        assert_eq!(compute_validity_date(Some(date(2025, 1, 31)), "30"), Some(date(2025, 3, 2)));
    }

    #[test]
    fn test_validity_date_crosses_year_and_leap_day() {
        assert_eq!(compute_validity_date(Some(date(2024, 12, 15)), "30"), Some(date(2025, 1, 14)));
        assert_eq!(compute_validity_date(Some(date(2024, 2, 28)), "1"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_validity_date_fallbacks() {
        assert_eq!(compute_validity_date(None, "30"), None);
        assert_eq!(compute_validity_date(Some(date(2025, 1, 1)), "abc"), Some(date(2025, 1, 31)));
        assert_eq!(compute_validity_date(Some(date(2025, 1, 1)), "-5"), Some(date(2025, 1, 31)));
        assert_eq!(compute_validity_date(Some(date(2025, 1, 1)), "0"), Some(date(2025, 1, 1)));
        assert_eq!(compute_validity_date(Some(date(2025, 1, 1)), "45 dias"), Some(date(2025, 2, 15)));
    }

    #[test]
    fn test_payment_split_no_normalization() {
        let split = compute_payment_split(dec("1000"), "25", "75");
        assert_eq!(split.signature_amount, dec("250"));
        assert_eq!(split.scheduled_amount, dec("750"));

        let split = compute_payment_split(dec("1000"), "40", "40");
        assert_eq!(split.signature_amount, dec("400"));
        assert_eq!(split.scheduled_amount, dec("400"));
    }

    #[test]
    fn test_payment_split_unparseable_percent_is_zero() {
        let split = compute_payment_split(dec("1000"), "", "metade");
        assert_eq!(split.signature_amount, Decimal::ZERO);
        assert_eq!(split.scheduled_amount, Decimal::ZERO);
    }

    #[test]
    fn test_payment_split_overflow_degrades() {
        let split = compute_payment_split(Decimal::MAX, "1000", "0");
        assert_eq!(split.signature_amount, Decimal::ZERO);
        assert_eq!(split.scheduled_amount, Decimal::ZERO);
    }

    #[test]
    fn test_derive_draft_keeps_blank_fields_blank() {
        let input = ProposalInput {
            proposal_date: Some(date(2025, 1, 1)),
            validity_days: Some("  ".to_string()),
            signature_percent: Some(String::new()),
            items: Some(vec![LineItem::new("01", "Serviço", "1.000,00")]),
            ..Default::default()
        };

        let derived = DerivedValueCalculator::default().derive_draft(&input);
        assert_eq!(derived.grand_total, dec("1000"));
        assert_eq!(derived.validity_date, None);
        assert_eq!(derived.signature_amount, Decimal::ZERO);
        assert_eq!(derived.scheduled_amount, Decimal::ZERO);
    }

    #[test]
    fn test_derive_draft_unparseable_days_fall_back() {
        let input = ProposalInput {
            proposal_date: Some(date(2025, 1, 1)),
            validity_days: Some("trinta".to_string()),
            ..Default::default()
        };

        let derived = DerivedValueCalculator::default().derive_draft(&input);
        assert_eq!(derived.validity_date, Some(date(2025, 1, 31)));
    }
}
