// ==========================================
// RTB 商务提案系统 - 会话层错误类型
// ==========================================
// 职责: 会话控制器对外的错误，全部可由用户修正后重试
// ==========================================

use thiserror::Error;

use crate::domain::FieldPathError;
use crate::engine::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    // ==========================================
    // 表单错误
    // ==========================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidFieldPath(#[from] FieldPathError),

    #[error("字段值类型不匹配: field={field}")]
    FieldTypeMismatch { field: String },

    #[error("条目序号越界: index={index}, len={len}")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// 上传文件不是图片，原有 logo 保持不变
    #[error("不支持的文件类型: file={file_name}, type={mime_type}")]
    UnsupportedFile { file_name: String, mime_type: String },

    // ==========================================
    // 提交流程错误
    // ==========================================
    #[error("提交进行中，请勿重复提交")]
    SubmissionInProgress,

    #[error("没有进行中的提交")]
    NoPendingSubmission,

    #[error("提案已生成，需先执行编辑动作")]
    ProposalLocked,

    #[error("提交失败: {0}")]
    SubmissionFailed(String),
}

impl SessionError {
    /// 面向用户的 pt-BR 提示
    pub fn user_message(&self) -> String {
        use crate::i18n::t;
        match self {
            SessionError::UnsupportedFile { .. } => t("session.unsupported_file"),
            SessionError::SubmissionInProgress => t("session.submission_in_progress"),
            SessionError::ProposalLocked => t("session.locked"),
            other => other.to_string(),
        }
    }
}
