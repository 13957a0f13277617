// ==========================================
// RTB 商务提案系统 - 提案构建器
// ==========================================
// 职责: 校验 ProposalInput 并应用默认值，产出规范化 Proposal
// 输入: ProposalInput（任意不完整状态）
// 输出: Ok(Proposal) 或 Err(ValidationError)（包含全部违规）
// 红线: 纯函数，不修改输入
// ==========================================

use tracing::instrument;

use crate::config::ProposalDefaults;
use crate::domain::proposal::normalize_items;
use crate::domain::{FieldPath, Proposal, ProposalInput};
use crate::engine::error::{FieldViolation, ValidationError, ViolationKind};
use crate::engine::validator::ProposalValidator;
use crate::i18n::t;

// ==========================================
// ProposalBuilder - 提案构建器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ProposalBuilder {
    validator: ProposalValidator,
    defaults: ProposalDefaults,
}

impl ProposalBuilder {
    pub fn new(defaults: ProposalDefaults) -> Self {
        Self {
            validator: ProposalValidator::new(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &ProposalDefaults {
        &self.defaults
    }

    /// 构建规范化提案
    ///
    /// 规则:
    /// - 必填字段去除首尾空白后保存
    /// - 可选字段为空白时与缺失等同：有默认值的取默认值，否则为 None
    #[instrument(skip(self, input), fields(number = input.proposal_number.as_deref().unwrap_or("")))]
    pub fn build(&self, input: &ProposalInput) -> Result<Proposal, ValidationError> {
        let violations = self.validator.validate(input);
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "提案校验未通过");
            return Err(ValidationError::new(violations));
        }

        // 校验已保证日期存在，这里仍按错误返回而不 unwrap
        let proposal_date = input.proposal_date.ok_or_else(|| {
            ValidationError::new(vec![FieldViolation::new(
                FieldPath::ProposalDate,
                ViolationKind::Missing,
                t("validation.dataProposta"),
            )])
        })?;

        let defaults = &self.defaults;
        let proposal = Proposal {
            proposal_number: required(&input.proposal_number),
            proposal_date,
            client_name: required(&input.client_name),
            service_location: required(&input.service_location),
            services_to_perform: optional(&input.services_to_perform),
            client_objective: required(&input.client_objective),
            specialized_services: required(&input.specialized_services),
            technical_data: optional(&input.technical_data),
            technical_standards: optional(&input.technical_standards),
            supply_scope: required(&input.supply_scope),
            execution_deadline: required(&input.execution_deadline),
            validity_days: or_default(&input.validity_days, &defaults.validity_days),
            price_notes: optional(&input.price_notes),
            items: normalize_items(input.items()),
            signature_percent: or_default(&input.signature_percent, &defaults.signature_percent),
            scheduled_percent: or_default(&input.scheduled_percent, &defaults.scheduled_percent),
            requester: optional(&input.requester),
            city: optional(&input.city),
            revision: or_default(&input.revision, &defaults.revision),
            confidential: or_default(&input.confidential, &defaults.confidential),
            prepared_by: or_default(&input.prepared_by, &defaults.prepared_by),
            client_logo: optional(&input.client_logo),
            client_logo_url: optional(&input.client_logo_url),
        };

        tracing::debug!(items = proposal.items.len(), "提案构建成功");
        Ok(proposal)
    }
}

fn required(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    optional(value).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_helpers() {
        assert_eq!(optional(&Some("  ".to_string())), None);
        assert_eq!(optional(&Some(" ok ".to_string())), Some("ok".to_string()));
        assert_eq!(or_default(&None, "30"), "30");
        assert_eq!(or_default(&Some("".to_string()), "30"), "30");
        assert_eq!(or_default(&Some("45".to_string()), "30"), "45");
        assert_eq!(required(&Some(" ACME ".to_string())), "ACME");
    }
}
