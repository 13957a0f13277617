// ==========================================
// RTB 商务提案系统 - pt-BR 显示格式
// ==========================================
// 职责: 为渲染器提供金额/日期的显示文本
// 格式: 千分位 '.'、小数 ','、两位小数；日期 dd/MM/yyyy
// ==========================================

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 有效期缺失时的占位文本
pub const NOT_AVAILABLE: &str = "N/A";

/// 金额数字部分，如 1234.5 → "1.234,50"
pub fn format_decimal_br(value: Decimal) -> String {
    // 整数部分与小数部分分开取，28 位精度下 rescale 可能无法补足两位小数
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();

    let integer = group_thousands(&abs.trunc().to_string());
    let fraction = (abs.fract() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u32()
        .unwrap_or(0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    format!("{}{},{:02}", sign, integer, fraction)
}

/// 金额（BRL），如 250 → "R$ 250,00"
pub fn format_brl(value: Decimal) -> String {
    let text = format_decimal_br(value);
    match text.strip_prefix('-') {
        Some(abs) => format!("-R$ {}", abs),
        None => format!("R$ {}", text),
    }
}

/// 日期，如 2025-01-31 → "31/01/2025"
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// 可选日期，缺失时为 "N/A"
pub fn format_optional_date_br(date: Option<NaiveDate>) -> String {
    date.map(format_date_br)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
