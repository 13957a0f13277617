// ==========================================
// RTB 商务提案系统 - 编辑会话控制器
// ==========================================
// 职责: 持有一次编辑会话的全部可变状态（表单输入、预览开关、提交标志）
// 红线: 只有本控制器修改状态；构建器/计算器只接收引用
// 并发: 单线程；提交期间以 submitting 标志禁止重复提交
// ==========================================

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::app::error::SessionError;
use crate::app::logo::{accept_logo, LogoAttachment};
use crate::app::submission::{ProposalSubmitter, SubmissionReceipt};
use crate::config::{ProposalConfig, ProposalDefaults};
use crate::document::ProposalSnapshot;
use crate::domain::{
    parse_date_text, DerivedProposal, FieldPath, FieldValue, ItemField, LineItem, Proposal,
    ProposalInput,
};
use crate::engine::{DerivedValueCalculator, ProposalBuilder, ValidationError};

// ==========================================
// SessionPhase - 会话阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Editing,    // 编辑中
    Submitting, // 提交中（提交按钮禁用）
    Submitted,  // 已生成
}

/// 进行中的提交
///
/// 由 begin_submit 产生，必须交回 finish_submit / fail_submit
/// 不可克隆：每次提交只能结算一次
#[derive(Debug)]
pub struct PendingSubmission {
    session_id: Uuid,
    snapshot: ProposalSnapshot,
}

impl PendingSubmission {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn snapshot(&self) -> &ProposalSnapshot {
        &self.snapshot
    }
}

/// 已生成的提案
#[derive(Debug, Clone)]
struct SubmittedProposal {
    proposal: Proposal,
    receipt: SubmissionReceipt,
}

/// 表单初始值（对应表单挂载时的默认值）
pub fn initial_input(defaults: &ProposalDefaults, today: NaiveDate) -> ProposalInput {
    ProposalInput {
        proposal_date: Some(today),
        validity_days: Some(defaults.validity_days.clone()),
        items: Some(vec![LineItem::blank()]),
        signature_percent: Some(defaults.signature_percent.clone()),
        scheduled_percent: Some(defaults.scheduled_percent.clone()),
        revision: Some(defaults.revision.clone()),
        confidential: Some(defaults.confidential.clone()),
        prepared_by: Some(defaults.prepared_by.clone()),
        ..Default::default()
    }
}

// ==========================================
// ProposalSession - 编辑会话
// ==========================================
pub struct ProposalSession {
    id: Uuid,
    input: ProposalInput,
    logo: Option<LogoAttachment>,
    show_preview: bool,
    phase: SessionPhase,
    submitted: Option<SubmittedProposal>,
    builder: ProposalBuilder,
    calculator: DerivedValueCalculator,
}

impl ProposalSession {
    /// 创建会话，表单填入默认值
    pub fn new(config: &ProposalConfig, today: NaiveDate) -> Self {
        Self::with_input(config, initial_input(&config.defaults, today))
    }

    /// 以给定输入创建会话
    pub fn with_input(config: &ProposalConfig, input: ProposalInput) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session_id = %id, "创建提案会话");

        Self {
            id,
            input,
            logo: None,
            show_preview: false,
            phase: SessionPhase::Editing,
            submitted: None,
            builder: ProposalBuilder::new(config.defaults.clone()),
            calculator: DerivedValueCalculator::new(config.defaults.clone()),
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn input(&self) -> &ProposalInput {
        &self.input
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// 提交按钮是否禁用
    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    pub fn logo(&self) -> Option<&LogoAttachment> {
        self.logo.as_ref()
    }

    pub fn is_preview_visible(&self) -> bool {
        self.show_preview
    }

    /// 已生成的提案
    pub fn proposal(&self) -> Option<&Proposal> {
        self.submitted.as_ref().map(|s| &s.proposal)
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.submitted.as_ref().map(|s| &s.receipt)
    }

    // ==========================================
    // 字段编辑（输入边界）
    // ==========================================

    /// 应用一次字段编辑
    pub fn apply_edit(&mut self, path: FieldPath, value: FieldValue) -> Result<(), SessionError> {
        self.ensure_editable()?;

        match (path, value) {
            (FieldPath::ProposalDate, FieldValue::Date(date)) => {
                self.input.proposal_date = Some(date);
            }
            (FieldPath::ProposalDate, FieldValue::Text(text)) => {
                if text.trim().is_empty() {
                    self.input.proposal_date = None;
                } else {
                    let date = parse_date_text(&text).ok_or_else(|| mismatch(path))?;
                    self.input.proposal_date = Some(date);
                }
            }
            (FieldPath::Item { index, field }, FieldValue::Text(text)) => {
                let items = self.input.items_mut();
                let len = items.len();
                let item = items
                    .get_mut(index)
                    .ok_or(SessionError::ItemIndexOutOfRange { index, len })?;
                match field {
                    ItemField::Quantity => item.quantity = text,
                    ItemField::Description => item.description = text,
                    ItemField::Value => item.value = text,
                }
            }
            (path, FieldValue::Text(text)) => {
                let slot = self.input.text_slot_mut(path).ok_or_else(|| mismatch(path))?;
                *slot = Some(text);
            }
            (path, FieldValue::Date(_)) => return Err(mismatch(path)),
        }

        tracing::trace!(session_id = %self.id, field = %path, "字段已更新");
        Ok(())
    }

    /// 以字符串路径应用编辑（前端事件直接转发）
    pub fn apply_edit_str(&mut self, path: &str, value: FieldValue) -> Result<(), SessionError> {
        let path: FieldPath = path.parse()?;
        self.apply_edit(path, value)
    }

    /// 末尾追加一个价格条目，返回其序号
    pub fn add_item(&mut self) -> Result<usize, SessionError> {
        self.ensure_editable()?;
        let items = self.input.items_mut();
        items.push(LineItem::blank());
        Ok(items.len() - 1)
    }

    /// 按位置删除价格条目
    ///
    /// 删除后其后条目的序号前移，调用方不得复用旧序号
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, SessionError> {
        self.ensure_editable()?;
        let items = self.input.items_mut();
        let len = items.len();
        if index >= len {
            return Err(SessionError::ItemIndexOutOfRange { index, len });
        }
        Ok(items.remove(index))
    }

    /// 上传客户 logo；非图片文件被拒绝且原有 logo 不变
    ///
    /// url 为宿主读取文件后得到的可显示地址，写入 logoClienteUrl 供渲染器使用
    pub fn attach_logo(
        &mut self,
        file_name: &str,
        mime_type: &str,
        url: &str,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        let logo = accept_logo(file_name, mime_type, url)?;
        self.input.client_logo = Some(logo.file_name.clone());
        self.input.client_logo_url = Some(logo.url.clone());
        self.logo = Some(logo);
        Ok(())
    }

    // ==========================================
    // 派生与预览
    // ==========================================

    /// 实时预览派生值（每次编辑后完整重算）
    pub fn preview(&self) -> DerivedProposal {
        match &self.submitted {
            Some(submitted) => self.calculator.derive(&submitted.proposal),
            None => self.calculator.derive_draft(&self.input),
        }
    }

    /// 校验当前输入（不改变会话状态，用于内联错误提示）
    pub fn validate(&self) -> Result<Proposal, ValidationError> {
        self.builder.build(&self.input)
    }

    /// 只读快照（仅已生成的提案）
    pub fn snapshot(&self) -> Option<ProposalSnapshot> {
        self.submitted
            .as_ref()
            .map(|s| ProposalSnapshot::assemble(s.proposal.clone(), &self.calculator))
    }

    /// 当前输入的快照（校验通过时），供"预览"按钮使用
    pub fn draft_snapshot(&self) -> Result<ProposalSnapshot, ValidationError> {
        let proposal = self.validate()?;
        Ok(ProposalSnapshot::assemble(proposal, &self.calculator))
    }

    pub fn set_preview_visible(&mut self, visible: bool) {
        self.show_preview = visible;
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.show_preview = !self.show_preview;
        self.show_preview
    }

    // ==========================================
    // 提交流程
    // ==========================================

    /// 开始提交
    ///
    /// - 提交中再次调用 → SubmissionInProgress
    /// - 已生成 → ProposalLocked
    /// - 校验失败 → Validation（状态不变）
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SessionError> {
        match self.phase {
            SessionPhase::Submitting => return Err(SessionError::SubmissionInProgress),
            SessionPhase::Submitted => return Err(SessionError::ProposalLocked),
            SessionPhase::Editing => {}
        }

        let proposal = self.builder.build(&self.input)?;
        let snapshot = ProposalSnapshot::assemble(proposal, &self.calculator);

        self.phase = SessionPhase::Submitting;
        tracing::info!(session_id = %self.id, number = %snapshot.proposal.proposal_number, "开始提交提案");

        Ok(PendingSubmission {
            session_id: self.id,
            snapshot,
        })
    }

    /// 完成提交，提案进入不可变状态
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        receipt: SubmissionReceipt,
    ) -> Result<(), SessionError> {
        self.ensure_pending(&pending)?;

        self.submitted = Some(SubmittedProposal {
            proposal: pending.snapshot.proposal,
            receipt,
        });
        self.phase = SessionPhase::Submitted;
        Ok(())
    }

    /// 提交失败，恢复编辑状态
    pub fn fail_submit(&mut self, pending: PendingSubmission) -> Result<(), SessionError> {
        self.ensure_pending(&pending)?;
        self.phase = SessionPhase::Editing;
        tracing::warn!(session_id = %self.id, "提交失败，恢复编辑");
        Ok(())
    }

    /// 完整提交流程: 校验 → 等待提交器 → 进入已生成状态
    pub async fn submit(
        &mut self,
        submitter: &dyn ProposalSubmitter,
    ) -> Result<SubmissionReceipt, SessionError> {
        let pending = self.begin_submit()?;

        match submitter.submit(self.id, pending.snapshot()).await {
            Ok(receipt) => {
                self.finish_submit(pending, receipt.clone())?;
                Ok(receipt)
            }
            Err(err) => {
                self.fail_submit(pending)?;
                Err(err)
            }
        }
    }

    // ==========================================
    // 编辑 / 重置
    // ==========================================

    /// "编辑"动作: 丢弃已生成的提案，回到表单
    ///
    /// 表单保留当前输入（含提交等待期间的编辑），不以提案回写
    pub fn edit(&mut self) {
        if self.submitted.take().is_some() {
            tracing::debug!(session_id = %self.id, "丢弃已生成的提案，回到编辑");
        }
        if self.phase == SessionPhase::Submitted {
            self.phase = SessionPhase::Editing;
        }
        self.show_preview = false;
    }

    /// "新提案": 丢弃全部状态，表单恢复默认值
    pub fn reset(&mut self, today: NaiveDate) {
        if self.phase == SessionPhase::Submitting {
            tracing::warn!(session_id = %self.id, "提交进行中，忽略重置");
            return;
        }

        self.input = initial_input(self.builder.defaults(), today);
        self.logo = None;
        self.show_preview = false;
        self.submitted = None;
        self.phase = SessionPhase::Editing;
        tracing::debug!(session_id = %self.id, "会话已重置");
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Submitted {
            return Err(SessionError::ProposalLocked);
        }
        Ok(())
    }

    fn ensure_pending(&self, pending: &PendingSubmission) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting || pending.session_id != self.id {
            return Err(SessionError::NoPendingSubmission);
        }
        Ok(())
    }
}

fn mismatch(path: FieldPath) -> SessionError {
    SessionError::FieldTypeMismatch {
        field: path.to_string(),
    }
}
