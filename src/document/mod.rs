// ==========================================
// RTB 商务提案系统 - 文档输出边界
// ==========================================

pub mod format;
pub mod snapshot;

pub use format::{format_brl, format_date_br, format_decimal_br, format_optional_date_br};
pub use snapshot::{PriceRow, ProposalSnapshot};
