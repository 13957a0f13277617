// ==========================================
// RTB 商务提案系统 - 校验错误类型
// ==========================================
// 职责: 字段级违规与聚合校验错误
// 红线: 一次收集全部违规，不短路（前端需同时高亮所有无效字段）
// ==========================================

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::FieldPath;

// ==========================================
// ViolationKind - 违规类型
// ==========================================
// Missing 与 Blank 区分"键不存在"与"存在但为空白"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Missing,  // 必填字段缺失
    Blank,    // 必填字段为空白
    TooShort, // 长度不足
    Empty,    // 条目列表为空
}

/// 单个字段违规
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: FieldPath,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

// ==========================================
// ValidationError - 校验错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("校验失败: {}个字段违规", .violations.len())]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// 是否包含指定字段的违规
    pub fn names_field(&self, field: FieldPath) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// 指定字段的违规类型
    pub fn kind_of(&self, field: FieldPath) -> Option<ViolationKind> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.kind)
    }

    /// 字段路径 → 提示信息（供前端在字段旁内联显示）
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            map.entry(violation.field.to_string())
                .or_default()
                .push(violation.message.clone());
        }
        map
    }
}
