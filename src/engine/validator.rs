// ==========================================
// RTB 商务提案系统 - 表单校验器
// ==========================================
// 职责: 按固定规则集校验 ProposalInput，收集全部字段违规
// 规则: 各规则相互独立，全部通过才算合法
// 长度按字符数计算（去除首尾空白后）
// ==========================================

use crate::domain::{FieldPath, ItemField, LineItem, ProposalInput};
use crate::engine::error::{FieldViolation, ViolationKind};
use crate::i18n::{t, t_with_args};

/// 必填文本字段规则
#[derive(Debug, Clone, Copy)]
struct TextRule {
    field: FieldPath,
    min_chars: usize,
}

/// 必填文本字段及最小长度
const REQUIRED_TEXT_RULES: &[TextRule] = &[
    TextRule { field: FieldPath::ProposalNumber, min_chars: 1 },
    TextRule { field: FieldPath::ClientName, min_chars: 2 },
    TextRule { field: FieldPath::ServiceLocation, min_chars: 5 },
    TextRule { field: FieldPath::ClientObjective, min_chars: 10 },
    TextRule { field: FieldPath::SpecializedServices, min_chars: 10 },
    TextRule { field: FieldPath::SupplyScope, min_chars: 20 },
    TextRule { field: FieldPath::ExecutionDeadline, min_chars: 5 },
];

const ITEM_DESCRIPTION_MIN_CHARS: usize = 5;

// ==========================================
// ProposalValidator - 表单校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalValidator;

impl ProposalValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验输入，返回全部违规（空列表表示通过）
    pub fn validate(&self, input: &ProposalInput) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        // 1. 必填文本字段
        for rule in REQUIRED_TEXT_RULES {
            if let Some(violation) = check_text(rule.field, input.text(rule.field), rule.min_chars) {
                violations.push(violation);
            }
        }

        // 2. 提案日期
        if input.proposal_date.is_none() {
            violations.push(FieldViolation::new(
                FieldPath::ProposalDate,
                ViolationKind::Missing,
                t("validation.dataProposta"),
            ));
        }

        // 3. 价格条目
        match input.items.as_deref() {
            None => violations.push(FieldViolation::new(
                FieldPath::Items,
                ViolationKind::Missing,
                t("validation.itensPrecos"),
            )),
            Some([]) => violations.push(FieldViolation::new(
                FieldPath::Items,
                ViolationKind::Empty,
                t("validation.itensPrecos"),
            )),
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    violations.extend(check_item(index, item));
                }
            }
        }

        violations
    }
}

/// 校验单个必填文本字段
fn check_text(field: FieldPath, value: Option<&str>, min_chars: usize) -> Option<FieldViolation> {
    let key = field.key();
    let Some(raw) = value else {
        let label = t(&format!("fields.{}", key));
        return Some(FieldViolation::new(
            field,
            ViolationKind::Missing,
            t_with_args("validation.missing", &[("label", &label)]),
        ));
    };

    let chars = raw.trim().chars().count();
    let kind = if chars == 0 {
        ViolationKind::Blank
    } else if chars < min_chars {
        ViolationKind::TooShort
    } else {
        return None;
    };

    Some(FieldViolation::new(field, kind, t(&format!("validation.{}", key))))
}

/// 校验单个价格条目
fn check_item(index: usize, item: &LineItem) -> Vec<FieldViolation> {
    let checks = [
        (ItemField::Quantity, item.quantity.as_str(), 1),
        (ItemField::Description, item.description.as_str(), ITEM_DESCRIPTION_MIN_CHARS),
        (ItemField::Value, item.value.as_str(), 1),
    ];

    checks
        .into_iter()
        .filter_map(|(field, value, min_chars)| {
            let chars = value.trim().chars().count();
            let kind = if chars == 0 {
                ViolationKind::Blank
            } else if chars < min_chars {
                ViolationKind::TooShort
            } else {
                return None;
            };
            Some(FieldViolation::new(
                FieldPath::item(index, field),
                kind,
                t(&format!("validation.item.{}", field.key())),
            ))
        })
        .collect()
}
