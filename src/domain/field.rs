// ==========================================
// RTB 商务提案系统 - 字段寻址
// ==========================================
// 职责: 表单字段路径（FieldPath）与字段值（FieldValue）定义
// 输入边界: 前端每次编辑事件投递一个 (字段路径, 新值) 对
// 路径格式: "nomeCliente" 或 "itensPrecos.<序号>.<子字段>"
// ==========================================

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// ItemField - 价格条目子字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemField {
    Quantity,    // quantidade
    Description, // descricao
    Value,       // valorTotal
}

impl ItemField {
    pub fn key(&self) -> &'static str {
        match self {
            ItemField::Quantity => "quantidade",
            ItemField::Description => "descricao",
            ItemField::Value => "valorTotal",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "quantidade" => Some(ItemField::Quantity),
            "descricao" => Some(ItemField::Description),
            "valorTotal" => Some(ItemField::Value),
            _ => None,
        }
    }
}

// ==========================================
// FieldPath - 字段路径
// ==========================================
// 序号是位置性的，删除条目后旧序号不再指向同一条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    ProposalNumber,
    ProposalDate,
    ClientName,
    ServiceLocation,
    ServicesToPerform,
    ClientObjective,
    SpecializedServices,
    TechnicalData,
    TechnicalStandards,
    SupplyScope,
    ExecutionDeadline,
    ValidityDays,
    PriceNotes,
    Items,
    SignaturePercent,
    ScheduledPercent,
    Requester,
    City,
    Revision,
    Confidential,
    PreparedBy,
    ClientLogo,
    ClientLogoUrl,
    Item { index: usize, field: ItemField },
}

/// 顶层字段与表单键名的对照表
const TOP_LEVEL_KEYS: &[(FieldPath, &str)] = &[
    (FieldPath::ProposalNumber, "numeroProposta"),
    (FieldPath::ProposalDate, "dataProposta"),
    (FieldPath::ClientName, "nomeCliente"),
    (FieldPath::ServiceLocation, "localPrestacao"),
    (FieldPath::ServicesToPerform, "servicosExecutar"),
    (FieldPath::ClientObjective, "objetivoCliente"),
    (FieldPath::SpecializedServices, "servicosEspecializados"),
    (FieldPath::TechnicalData, "dadosTecnicos"),
    (FieldPath::TechnicalStandards, "normasTecnicas"),
    (FieldPath::SupplyScope, "escopoFornecimento"),
    (FieldPath::ExecutionDeadline, "prazoExecucao"),
    (FieldPath::ValidityDays, "validadeDias"),
    (FieldPath::PriceNotes, "textoComplementarPrecos"),
    (FieldPath::Items, "itensPrecos"),
    (FieldPath::SignaturePercent, "percentualAssinatura"),
    (FieldPath::ScheduledPercent, "percentualEventograma"),
    (FieldPath::Requester, "solicitante"),
    (FieldPath::City, "cidade"),
    (FieldPath::Revision, "revisao"),
    (FieldPath::Confidential, "confidencial"),
    (FieldPath::PreparedBy, "elaboradoPor"),
    (FieldPath::ClientLogo, "logoCliente"),
    (FieldPath::ClientLogoUrl, "logoClienteUrl"),
];

impl FieldPath {
    /// 条目子字段路径
    pub fn item(index: usize, field: ItemField) -> Self {
        FieldPath::Item { index, field }
    }

    /// 顶层字段键名（条目路径返回所属数组键名 "itensPrecos"）
    pub fn key(&self) -> &'static str {
        if let FieldPath::Item { .. } = self {
            return "itensPrecos";
        }
        TOP_LEVEL_KEYS
            .iter()
            .find(|(path, _)| path == self)
            .map(|(_, key)| *key)
            .unwrap_or("itensPrecos")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Item { index, field } => {
                write!(f, "itensPrecos.{}.{}", index, field.key())
            }
            other => write!(f, "{}", other.key()),
        }
    }
}

/// 字段路径解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("字段路径无效: {0}")]
pub struct FieldPathError(pub String);

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let mut parts = raw.split('.');
        let head = parts.next().unwrap_or_default();

        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => TOP_LEVEL_KEYS
                .iter()
                .find(|(_, key)| *key == head)
                .map(|(path, _)| *path)
                .ok_or_else(|| FieldPathError(raw.to_string())),
            (Some(index), Some(sub), None) if head == "itensPrecos" => {
                let index = index
                    .parse::<usize>()
                    .map_err(|_| FieldPathError(raw.to_string()))?;
                let field =
                    ItemField::from_key(sub).ok_or_else(|| FieldPathError(raw.to_string()))?;
                Ok(FieldPath::Item { index, field })
            }
            _ => Err(FieldPathError(raw.to_string())),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ==========================================
// FieldValue - 字段值
// ==========================================
// 前端事件中的值一律按文本读入；仅 dataProposta 在应用编辑时解析为日期
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(FieldValue::Text)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

// ==========================================
// 日期文本解析
// ==========================================

/// 解析日期文本
///
/// 支持格式:
/// - "2025-01-31"（ISO）
/// - "31/01/2025"（pt-BR 显示格式）
/// - "2025-01-31T03:00:00.000Z"（浏览器 Date 的 JSON 形式，取 UTC 日期）
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_utc().date())
        })
}

/// serde 辅助: 宽松反序列化可选日期（空串视为缺失）
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_date_text(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("data inválida: {}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_level_path() {
        let path: FieldPath = "nomeCliente".parse().unwrap();
        assert_eq!(path, FieldPath::ClientName);
        assert_eq!(path.to_string(), "nomeCliente");
    }

    #[test]
    fn test_parse_item_path() {
        let path: FieldPath = "itensPrecos.2.valorTotal".parse().unwrap();
        assert_eq!(path, FieldPath::item(2, ItemField::Value));
        assert_eq!(path.to_string(), "itensPrecos.2.valorTotal");
        assert_eq!(path.key(), "itensPrecos");
    }

    #[test]
    fn test_parse_invalid_paths() {
        assert!("".parse::<FieldPath>().is_err());
        assert!("campoInexistente".parse::<FieldPath>().is_err());
        assert!("itensPrecos.x.descricao".parse::<FieldPath>().is_err());
        assert!("itensPrecos.0.preco".parse::<FieldPath>().is_err());
        assert!("nomeCliente.0.descricao".parse::<FieldPath>().is_err());
        assert!("itensPrecos.0.descricao.extra".parse::<FieldPath>().is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_date_text("2025-01-31"), Some(expected));
        assert_eq!(parse_date_text("31/01/2025"), Some(expected));
        assert_eq!(parse_date_text("2025-01-31T03:00:00.000Z"), Some(expected));
        assert_eq!(parse_date_text("  "), None);
        assert_eq!(parse_date_text("ontem"), None);
    }

    #[test]
    fn test_field_value_json_is_text() {
        let value: FieldValue = serde_json::from_str("\"2025-03-01\"").unwrap();
        assert_eq!(value, FieldValue::Text("2025-03-01".to_string()));

        let value: FieldValue = serde_json::from_str("\"ACME\"").unwrap();
        assert_eq!(value, FieldValue::Text("ACME".to_string()));

        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2025-01-01\"");
    }
}
