// ==========================================
// RTB 商务提案系统 - 宽松数值解析
// ==========================================
// 职责: 将编辑中的文本解析为数值，解析失败返回 None（由调用方降级为 0/默认值）
// 规则: 只读取合法的前导数值部分，后续字符忽略（"30 dias" → 30）
// ==========================================

use rust_decimal::Decimal;
use std::str::FromStr;

/// 解析 pt-BR 金额文本
///
/// 规则:
/// 1) 去掉所有非数字、非逗号字符（千分位点、货币符号、空格）
/// 2) 第一个逗号视为小数点
/// 3) 读取前导数值部分
///
/// 示例: "R$ 1.234,56" → 1234.56；"abc" → None
pub fn parse_money(raw: &str) -> Option<Decimal> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let normalized = digits.replacen(',', ".", 1);
    leading_decimal(&normalized)
}

/// 解析前导整数（允许前导空白与正负号）
///
/// 示例: " 45 dias" → 45；"dias" → None
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (sign, rest) = split_sign(text);
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    format!("{}{}", sign, digits).parse::<i64>().ok()
}

/// 解析前导小数（允许前导空白与正负号，小数点为 '.'）
///
/// 示例: "25%" → 25；"12.5 %" → 12.5；"12,5" → 12
pub fn parse_leading_decimal(raw: &str) -> Option<Decimal> {
    let text = raw.trim_start();
    let (sign, rest) = split_sign(text);
    let value = leading_decimal(rest)?;
    Some(if sign == "-" { -value } else { value })
}

fn split_sign(text: &str) -> (&'static str, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        ("", rest)
    } else {
        ("", text)
    }
}

/// 读取形如 "123"、"123.45"、".5" 的前导无符号小数
fn leading_decimal(text: &str) -> Option<Decimal> {
    let int_part: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &text[int_part.len()..];

    let frac_part: String = match rest.strip_prefix('.') {
        Some(after_dot) => after_dot.chars().take_while(|c| c.is_ascii_digit()).collect(),
        None => String::new(),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let literal = match (int_part.is_empty(), frac_part.is_empty()) {
        (true, _) => format!("0.{}", frac_part),
        (false, true) => int_part,
        (false, false) => format!("{}.{}", int_part, frac_part),
    };

    // 超出 Decimal 精度范围同样视为解析失败
    Decimal::from_str(&literal).ok()
}
