// ==========================================
// RTB 商务提案系统 - 提案实体
// ==========================================
// 职责: 定义原始输入（ProposalInput）、价格条目（LineItem）、规范化提案（Proposal）
// 序列化: 字段名与前端表单一致（camelCase 葡语键名）
// 红线: 不含校验逻辑、不含计算逻辑
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::field::{deserialize_optional_date, FieldPath};

// ==========================================
// LineItem - 价格条目
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// 数量（显示文本，如 "01"）
    #[serde(rename = "quantidade", default)]
    pub quantity: String,

    /// 供货描述（至少5个字符）
    #[serde(rename = "descricao", default)]
    pub description: String,

    /// 总价（pt-BR 金额文本，如 "1.234,56"）
    #[serde(rename = "valorTotal", default)]
    pub value: String,
}

impl LineItem {
    pub fn new(quantity: &str, description: &str, value: &str) -> Self {
        Self {
            quantity: quantity.to_string(),
            description: description.to_string(),
            value: value.to_string(),
        }
    }

    /// 表单新增行的初始值
    pub fn blank() -> Self {
        Self::new("01", "", "")
    }

    fn trimmed(&self) -> Self {
        Self::new(
            self.quantity.trim(),
            self.description.trim(),
            self.value.trim(),
        )
    }
}

// ==========================================
// ProposalInput - 原始表单输入
// ==========================================
// 编辑过程中允许任意不完整状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInput {
    #[serde(rename = "numeroProposta", default, skip_serializing_if = "Option::is_none")]
    pub proposal_number: Option<String>,

    #[serde(
        rename = "dataProposta",
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub proposal_date: Option<NaiveDate>,

    #[serde(rename = "nomeCliente", default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(rename = "localPrestacao", default, skip_serializing_if = "Option::is_none")]
    pub service_location: Option<String>,

    #[serde(rename = "servicosExecutar", default, skip_serializing_if = "Option::is_none")]
    pub services_to_perform: Option<String>,

    #[serde(rename = "objetivoCliente", default, skip_serializing_if = "Option::is_none")]
    pub client_objective: Option<String>,

    #[serde(rename = "servicosEspecializados", default, skip_serializing_if = "Option::is_none")]
    pub specialized_services: Option<String>,

    #[serde(rename = "dadosTecnicos", default, skip_serializing_if = "Option::is_none")]
    pub technical_data: Option<String>,

    #[serde(rename = "normasTecnicas", default, skip_serializing_if = "Option::is_none")]
    pub technical_standards: Option<String>,

    #[serde(rename = "escopoFornecimento", default, skip_serializing_if = "Option::is_none")]
    pub supply_scope: Option<String>,

    #[serde(rename = "prazoExecucao", default, skip_serializing_if = "Option::is_none")]
    pub execution_deadline: Option<String>,

    #[serde(rename = "validadeDias", default, skip_serializing_if = "Option::is_none")]
    pub validity_days: Option<String>,

    #[serde(rename = "textoComplementarPrecos", default, skip_serializing_if = "Option::is_none")]
    pub price_notes: Option<String>,

    #[serde(rename = "itensPrecos", default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,

    #[serde(rename = "percentualAssinatura", default, skip_serializing_if = "Option::is_none")]
    pub signature_percent: Option<String>,

    #[serde(rename = "percentualEventograma", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_percent: Option<String>,

    #[serde(rename = "solicitante", default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,

    #[serde(rename = "cidade", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "revisao", default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    #[serde(rename = "confidencial", default, skip_serializing_if = "Option::is_none")]
    pub confidential: Option<String>,

    #[serde(rename = "elaboradoPor", default, skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,

    #[serde(rename = "logoCliente", default, skip_serializing_if = "Option::is_none")]
    pub client_logo: Option<String>,

    /// logo 的可显示地址（上传时生成的 data URL）
    #[serde(rename = "logoClienteUrl", default, skip_serializing_if = "Option::is_none")]
    pub client_logo_url: Option<String>,
}

impl ProposalInput {
    /// 价格条目（缺失视为空列表）
    pub fn items(&self) -> &[LineItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// 价格条目可变引用（缺失时初始化为空列表）
    pub fn items_mut(&mut self) -> &mut Vec<LineItem> {
        self.items.get_or_insert_with(Vec::new)
    }

    /// 读取顶层文本字段
    ///
    /// 日期、条目数组、条目子字段不属于顶层文本字段，返回 None
    pub fn text(&self, path: FieldPath) -> Option<&str> {
        let slot = match path {
            FieldPath::ProposalNumber => &self.proposal_number,
            FieldPath::ClientName => &self.client_name,
            FieldPath::ServiceLocation => &self.service_location,
            FieldPath::ServicesToPerform => &self.services_to_perform,
            FieldPath::ClientObjective => &self.client_objective,
            FieldPath::SpecializedServices => &self.specialized_services,
            FieldPath::TechnicalData => &self.technical_data,
            FieldPath::TechnicalStandards => &self.technical_standards,
            FieldPath::SupplyScope => &self.supply_scope,
            FieldPath::ExecutionDeadline => &self.execution_deadline,
            FieldPath::ValidityDays => &self.validity_days,
            FieldPath::PriceNotes => &self.price_notes,
            FieldPath::SignaturePercent => &self.signature_percent,
            FieldPath::ScheduledPercent => &self.scheduled_percent,
            FieldPath::Requester => &self.requester,
            FieldPath::City => &self.city,
            FieldPath::Revision => &self.revision,
            FieldPath::Confidential => &self.confidential,
            FieldPath::PreparedBy => &self.prepared_by,
            FieldPath::ClientLogo => &self.client_logo,
            FieldPath::ClientLogoUrl => &self.client_logo_url,
            FieldPath::ProposalDate | FieldPath::Items | FieldPath::Item { .. } => return None,
        };
        slot.as_deref()
    }

    /// 顶层文本字段的可变槽位
    pub fn text_slot_mut(&mut self, path: FieldPath) -> Option<&mut Option<String>> {
        let slot = match path {
            FieldPath::ProposalNumber => &mut self.proposal_number,
            FieldPath::ClientName => &mut self.client_name,
            FieldPath::ServiceLocation => &mut self.service_location,
            FieldPath::ServicesToPerform => &mut self.services_to_perform,
            FieldPath::ClientObjective => &mut self.client_objective,
            FieldPath::SpecializedServices => &mut self.specialized_services,
            FieldPath::TechnicalData => &mut self.technical_data,
            FieldPath::TechnicalStandards => &mut self.technical_standards,
            FieldPath::SupplyScope => &mut self.supply_scope,
            FieldPath::ExecutionDeadline => &mut self.execution_deadline,
            FieldPath::ValidityDays => &mut self.validity_days,
            FieldPath::PriceNotes => &mut self.price_notes,
            FieldPath::SignaturePercent => &mut self.signature_percent,
            FieldPath::ScheduledPercent => &mut self.scheduled_percent,
            FieldPath::Requester => &mut self.requester,
            FieldPath::City => &mut self.city,
            FieldPath::Revision => &mut self.revision,
            FieldPath::Confidential => &mut self.confidential,
            FieldPath::PreparedBy => &mut self.prepared_by,
            FieldPath::ClientLogo => &mut self.client_logo,
            FieldPath::ClientLogoUrl => &mut self.client_logo_url,
            FieldPath::ProposalDate | FieldPath::Items | FieldPath::Item { .. } => return None,
        };
        Some(slot)
    }
}

// ==========================================
// Proposal - 规范化提案
// ==========================================
// 提交时由 ProposalBuilder 一次性生成，此后不可变
// 数值类字段保留显示文本（可被计算器解析）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "numeroProposta")]
    pub proposal_number: String,
    #[serde(rename = "dataProposta")]
    pub proposal_date: NaiveDate,
    #[serde(rename = "nomeCliente")]
    pub client_name: String,
    #[serde(rename = "localPrestacao")]
    pub service_location: String,
    #[serde(rename = "servicosExecutar")]
    pub services_to_perform: Option<String>,
    #[serde(rename = "objetivoCliente")]
    pub client_objective: String,
    #[serde(rename = "servicosEspecializados")]
    pub specialized_services: String,
    #[serde(rename = "dadosTecnicos")]
    pub technical_data: Option<String>,
    #[serde(rename = "normasTecnicas")]
    pub technical_standards: Option<String>,
    #[serde(rename = "escopoFornecimento")]
    pub supply_scope: String,
    #[serde(rename = "prazoExecucao")]
    pub execution_deadline: String,
    #[serde(rename = "validadeDias")]
    pub validity_days: String,
    #[serde(rename = "textoComplementarPrecos")]
    pub price_notes: Option<String>,
    #[serde(rename = "itensPrecos")]
    pub items: Vec<LineItem>,
    #[serde(rename = "percentualAssinatura")]
    pub signature_percent: String,
    #[serde(rename = "percentualEventograma")]
    pub scheduled_percent: String,
    #[serde(rename = "solicitante")]
    pub requester: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "revisao")]
    pub revision: String,
    #[serde(rename = "confidencial")]
    pub confidential: String,
    #[serde(rename = "elaboradoPor")]
    pub prepared_by: String,
    #[serde(rename = "logoCliente")]
    pub client_logo: Option<String>,
    #[serde(rename = "logoClienteUrl")]
    pub client_logo_url: Option<String>,
}

impl Proposal {
    /// 将可编辑字段回写为 ProposalInput（"编辑"动作回到表单时使用）
    pub fn to_input(&self) -> ProposalInput {
        ProposalInput {
            proposal_number: Some(self.proposal_number.clone()),
            proposal_date: Some(self.proposal_date),
            client_name: Some(self.client_name.clone()),
            service_location: Some(self.service_location.clone()),
            services_to_perform: self.services_to_perform.clone(),
            client_objective: Some(self.client_objective.clone()),
            specialized_services: Some(self.specialized_services.clone()),
            technical_data: self.technical_data.clone(),
            technical_standards: self.technical_standards.clone(),
            supply_scope: Some(self.supply_scope.clone()),
            execution_deadline: Some(self.execution_deadline.clone()),
            validity_days: Some(self.validity_days.clone()),
            price_notes: self.price_notes.clone(),
            items: Some(self.items.clone()),
            signature_percent: Some(self.signature_percent.clone()),
            scheduled_percent: Some(self.scheduled_percent.clone()),
            requester: self.requester.clone(),
            city: self.city.clone(),
            revision: Some(self.revision.clone()),
            confidential: Some(self.confidential.clone()),
            prepared_by: Some(self.prepared_by.clone()),
            client_logo: self.client_logo.clone(),
            client_logo_url: self.client_logo_url.clone(),
        }
    }
}

/// 规范化条目列表（逐字段去除首尾空白）
pub(crate) fn normalize_items(items: &[LineItem]) -> Vec<LineItem> {
    items.iter().map(LineItem::trimmed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserialize_from_form_json() {
        let raw = r#"{
            "numeroProposta": "2023-PT-1-01",
            "dataProposta": "2025-01-01T03:00:00.000Z",
            "nomeCliente": "ACME",
            "itensPrecos": [{"quantidade": "01", "descricao": "Serviço de revisão", "valorTotal": "1.000,00"}]
        }"#;

        let input: ProposalInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.proposal_number.as_deref(), Some("2023-PT-1-01"));
        assert_eq!(input.proposal_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(input.items().len(), 1);
        assert_eq!(input.items()[0].value, "1.000,00");
        assert!(input.validity_days.is_none());
    }

    #[test]
    fn test_input_blank_date_is_missing() {
        let input: ProposalInput = serde_json::from_str(r#"{"dataProposta": ""}"#).unwrap();
        assert!(input.proposal_date.is_none());
    }

    #[test]
    fn test_text_slot_access() {
        let mut input = ProposalInput::default();
        *input.text_slot_mut(FieldPath::ClientName).unwrap() = Some("ACME".to_string());
        assert_eq!(input.text(FieldPath::ClientName), Some("ACME"));

        assert!(input.text_slot_mut(FieldPath::ProposalDate).is_none());
        assert!(input.text_slot_mut(FieldPath::Items).is_none());
    }

    #[test]
    fn test_items_mut_initializes_missing_list() {
        let mut input = ProposalInput::default();
        assert!(input.items.is_none());
        input.items_mut().push(LineItem::blank());
        assert_eq!(input.items().len(), 1);
        assert_eq!(input.items()[0].quantity, "01");
    }
}
