//! Shared types for the pre-call audit service.
//!
//! Holds the full audit report shape (which doubles as the cache value and
//! the wire response — its field set is a compatibility contract), the
//! service catalog, and application configuration loading.

mod app_config;
mod catalog;
mod config;
mod domain;
mod report;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    is_allowed_service, service_readable, ALLOWED_SERVICES, CALL_TRACKING_VENDORS, FORM_VENDORS,
    SCHEDULING_WIDGETS,
};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use domain::website_domain;
pub use report::{
    ApiCallRecord, AuditInputs, AuditReport, CandidateMatch, CaptureSignal, CaptureStatus,
    CompetitorEntry, Conclusion, ConclusionReason, DebugInfo, LocalVisibility, MissedOpportunity,
    PhoneConsistency, ResolutionStatus, ResolvedBusiness, ReviewDataStatus, Reviews,
    RiskAssessment, RiskLevel, RiskReason, SalesSafeSummary, SelectedConclusion, TrackingStatus,
    Visibility,
};
