// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use rtb_proposta::domain::{LineItem, ProposalInput};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// ProposalInput 构建器
// ==========================================

pub struct ProposalInputBuilder {
    input: ProposalInput,
}

impl ProposalInputBuilder {
    /// 满足全部必填规则的最小输入
    pub fn valid() -> Self {
        Self {
            input: ProposalInput {
                proposal_number: Some("2023-PT-1-01".to_string()),
                proposal_date: Some(date(2025, 1, 1)),
                client_name: Some("ACME".to_string()),
                service_location: Some("Usina X".to_string()),
                client_objective: Some("fornecer manutenção".to_string()),
                specialized_services: Some("manutenção preventiva".to_string()),
                supply_scope: Some("troca de rotores e revisão geral do sistema".to_string()),
                execution_deadline: Some("30 dias".to_string()),
                items: Some(vec![LineItem::new("01", "Serviço de revisão", "1.000,00")]),
                ..Default::default()
            },
        }
    }

    /// 填写全部字段（含可选字段）
    pub fn complete() -> Self {
        Self::valid()
            .services_to_perform("Revisão geral da unidade geradora 2")
            .text(|i| &mut i.technical_data, "Turbina Kaplan 12 MW")
            .text(|i| &mut i.technical_standards, "NBR 5410")
            .text(|i| &mut i.price_notes, "Preços sem impostos")
            .validity_days("45")
            .percents("30", "70")
            .text(|i| &mut i.requester, "Eng. Silva")
            .text(|i| &mut i.city, "Monte Mor")
            .text(|i| &mut i.revision, "02")
            .text(|i| &mut i.confidential, "Não")
            .text(|i| &mut i.prepared_by, "RTB HYDRO")
            .text(|i| &mut i.client_logo, "acme.png")
            .text(|i| &mut i.client_logo_url, "data:image/png;base64,iVBORw0KGgo=")
    }

    pub fn empty() -> Self {
        Self {
            input: ProposalInput::default(),
        }
    }

    fn text<F>(mut self, slot: F, value: &str) -> Self
    where
        F: FnOnce(&mut ProposalInput) -> &mut Option<String>,
    {
        *slot(&mut self.input) = Some(value.to_string());
        self
    }

    pub fn client_name(self, value: &str) -> Self {
        self.text(|i| &mut i.client_name, value)
    }

    pub fn services_to_perform(self, value: &str) -> Self {
        self.text(|i| &mut i.services_to_perform, value)
    }

    pub fn validity_days(self, value: &str) -> Self {
        self.text(|i| &mut i.validity_days, value)
    }

    pub fn percents(self, signature: &str, scheduled: &str) -> Self {
        self.text(|i| &mut i.signature_percent, signature)
            .text(|i| &mut i.scheduled_percent, scheduled)
    }

    pub fn proposal_date(mut self, value: Option<NaiveDate>) -> Self {
        self.input.proposal_date = value;
        self
    }

    pub fn items(mut self, items: Vec<LineItem>) -> Self {
        self.input.items = Some(items);
        self
    }

    pub fn without_items(mut self) -> Self {
        self.input.items = None;
        self
    }

    pub fn item(mut self, quantity: &str, description: &str, value: &str) -> Self {
        self.input
            .items
            .get_or_insert_with(Vec::new)
            .push(LineItem::new(quantity, description, value));
        self
    }

    pub fn build(self) -> ProposalInput {
        self.input
    }
}
