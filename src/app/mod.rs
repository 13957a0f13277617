// ==========================================
// RTB 商务提案系统 - 应用层
// ==========================================
// 职责: 编辑会话控制器、提交流程、logo 上传
// ==========================================

pub mod error;
pub mod logo;
pub mod session;
pub mod submission;

// 重导出
pub use error::SessionError;
pub use logo::{accept_logo, LogoAttachment};
pub use session::{initial_input, PendingSubmission, ProposalSession, SessionPhase};
pub use submission::{ProposalSubmitter, SimulatedSubmitter, SubmissionReceipt};
