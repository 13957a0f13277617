// ==========================================
// DerivedValueCalculator 集成测试
// ==========================================
// 测试目标: 合计、付款拆分、有效期的性质
// 覆盖范围: 交换律、降级为零、日历运算、幂等性
// ==========================================

mod helpers;

use helpers::test_data_builder::{date, ProposalInputBuilder};
use rust_decimal::Decimal;
use rtb_proposta::domain::LineItem;
use rtb_proposta::engine::{
    compute_grand_total, compute_payment_split, compute_validity_date, DerivedValueCalculator,
    ProposalBuilder,
};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem::new("01", "Revisão geral", "1.234,56"),
        LineItem::new("02", "Troca de rotores", "R$ 10.000,01"),
        LineItem::new("01", "Mobilização", "350"),
        LineItem::new("01", "Frete", "a combinar"),
    ]
}

#[test]
fn test_grand_total_is_order_independent() {
    let items = sample_items();
    let expected = compute_grand_total(&items);
    assert_eq!(expected, dec("11584.57"));

    let mut reversed = items.clone();
    reversed.reverse();
    assert_eq!(compute_grand_total(&reversed), expected);

    let mut rotated = items.clone();
    rotated.rotate_left(2);
    assert_eq!(compute_grand_total(&rotated), expected);
}

#[test]
fn test_value_without_digits_contributes_zero() {
    let base = vec![LineItem::new("01", "Revisão geral", "1.000,00")];
    let total = compute_grand_total(&base);

    for junk in ["", "a combinar", "R$ -", "...", "N/A"] {
        let mut items = base.clone();
        items.push(LineItem::new("01", "Item sem valor", junk));
        assert_eq!(compute_grand_total(&items), total, "valor: {:?}", junk);
    }
}

#[test]
fn test_validity_date_uses_calendar_arithmetic() {
    assert_eq!(
        compute_validity_date(Some(date(2025, 1, 31)), "30"),
        Some(date(2025, 3, 2))
    );
    assert_eq!(compute_validity_date(None, "30"), None);
}

#[test]
fn test_payment_split_examples() {
    let split = compute_payment_split(dec("1000"), "25", "75");
    assert_eq!(split.signature_amount, dec("250"));
    assert_eq!(split.scheduled_amount, dec("750"));

    let split = compute_payment_split(dec("1000"), "40", "40");
    assert_eq!(split.signature_amount, dec("400"));
    assert_eq!(split.scheduled_amount, dec("400"));
}

#[test]
fn test_derive_is_idempotent() {
    let input = ProposalInputBuilder::valid()
        .items(sample_items())
        .percents("33.3", "66.7")
        .build();
    let proposal = ProposalBuilder::default().build(&input).unwrap();
    let calculator = DerivedValueCalculator::default();

    let first = calculator.derive(&proposal);
    let second = calculator.derive(&proposal);
    assert_eq!(first, second);
    assert_eq!(first.grand_total.serialize(), second.grand_total.serialize());
    assert_eq!(first.signature_amount.serialize(), second.signature_amount.serialize());
}

#[test]
fn test_derive_draft_matches_derive_for_valid_input() {
    let input = ProposalInputBuilder::complete().build();
    let proposal = ProposalBuilder::default().build(&input).unwrap();
    let calculator = DerivedValueCalculator::default();

    assert_eq!(calculator.derive_draft(&input), calculator.derive(&proposal));
}
