//! The pre-call audit decision pipeline.
//!
//! Pure, deterministic stages: candidate resolution scoring, local-pack
//! visibility, after-hours capture risk, the conclusion cascade, and the
//! template-rendered sales text. [`runner::AuditRunner`] sequences them over
//! the external clients and threads an explicit call log — every function
//! here is referentially transparent given its inputs.

pub mod call_log;
pub mod conclusion;
pub mod resolver;
pub mod risk;
pub mod runner;
pub mod similarity;
pub mod summary;
pub mod visibility;

pub use call_log::CallLog;
pub use conclusion::select_conclusion;
pub use resolver::resolve;
pub use risk::assess_after_hours_risk;
pub use runner::AuditRunner;
pub use similarity::token_set_ratio;
pub use summary::{missed_opportunity, sales_safe_summary};
pub use visibility::{check_panel, check_panel_strict};
