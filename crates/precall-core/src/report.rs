//! Audit report value objects.
//!
//! Every stage of the pipeline produces one of these immutable records;
//! [`AuditReport`] assembles them into the shape that is cached and served.
//! Closed enums replace the stringly-typed fields of earlier revisions so
//! illegal states (a rank-0 competitor, an unknown conclusion) cannot be
//! represented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire format for report timestamps: second precision, trailing `Z`.
/// Matches `last_review_date` and the health endpoint.
mod wire_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(D::Error::custom)
    }
}

/// One raw result from the place search, before resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub place_id: Option<String>,
    pub name: String,
    pub address: String,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Found,
    NotFound,
    Error,
}

/// The single business an audit run is about.
///
/// Created once by the resolver. [`ResolvedBusiness::overlay_details`] is the
/// only permitted mutation and it never replaces a present value with an
/// absent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBusiness {
    pub place_id: Option<String>,
    pub name: String,
    /// Empty string when the provider omits it, never null.
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub total_reviews: Option<u32>,
    pub google_maps_url: Option<String>,
    pub resolution_status: ResolutionStatus,
}

impl ResolvedBusiness {
    /// Placeholder record for a business that could not be matched.
    #[must_use]
    pub fn not_found(name: &str) -> Self {
        Self {
            place_id: None,
            name: name.to_owned(),
            address: String::new(),
            phone: None,
            website: None,
            rating: None,
            total_reviews: None,
            google_maps_url: None,
            resolution_status: ResolutionStatus::NotFound,
        }
    }

    /// Placeholder record for an upstream failure during resolution.
    #[must_use]
    pub fn error(name: &str) -> Self {
        Self {
            resolution_status: ResolutionStatus::Error,
            ..Self::not_found(name)
        }
    }

    /// Fill absent fields from a richer details lookup.
    ///
    /// Only `None` fields are filled; a present value is never overwritten
    /// with an absent one. `last_review_date` lives in the reviews section,
    /// not here, so it is returned to the caller separately.
    pub fn overlay_details(
        &mut self,
        phone: Option<String>,
        website: Option<String>,
        rating: Option<f64>,
        total_reviews: Option<u32>,
    ) {
        if self.phone.is_none() {
            self.phone = phone;
        }
        if self.website.is_none() {
            self.website = website;
        }
        if self.rating.is_none() {
            self.rating = rating;
        }
        if self.total_reviews.is_none() {
            self.total_reviews = total_reviews;
        }
    }
}

/// One business in the local-pack competitor panel. Ranks are contiguous
/// starting at 1; the panel never holds more than three entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorEntry {
    pub rank: u8,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneConsistency {
    Consistent,
    Inconsistent,
    NotFound,
}

/// Call-tracking detection outcome. Serialized as the literal strings
/// `"true"` / `"false"` / `"unknown"` for report compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingStatus {
    #[serde(rename = "true")]
    Detected,
    #[serde(rename = "false")]
    NotDetected,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStatus {
    Completed,
    PartialFailure,
    NoData,
}

/// Flat lead-capture record produced by the website scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSignal {
    pub phone_found: bool,
    /// Normalized, sorted, deduplicated.
    pub phones_detected: Vec<String>,
    pub phone_consistency: PhoneConsistency,
    pub form_detected: bool,
    pub call_tracking_detected: TrackingStatus,
    pub call_tracking_vendor: Option<String>,
    pub scheduling_widget_detected: bool,
    pub pages_scanned: u8,
    pub capture_assessment_status: CaptureStatus,
}

impl CaptureSignal {
    /// Placeholder for a run where the website was never scanned.
    #[must_use]
    pub fn no_data() -> Self {
        Self {
            phone_found: false,
            phones_detected: Vec::new(),
            phone_consistency: PhoneConsistency::NotFound,
            form_detected: false,
            call_tracking_detected: TrackingStatus::Unknown,
            call_tracking_vendor: None,
            scheduling_widget_detected: false,
            pages_scanned: 0,
            capture_assessment_status: CaptureStatus::NoData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    UnableToScanWebsite,
    NoCaptureMechanisms,
    MultipleCapturePaths,
    PhoneOnly,
    HasAlternativeCapture,
    /// Resolution failed before the site was ever scanned.
    BusinessNotFound,
}

/// After-hours capture risk, derived purely from the capture signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub reason: RiskReason,
}

/// Whether the resolved business appears in the top-three panel.
///
/// `Unavailable` (no panel data at all) is distinct from `NotInTopThree`
/// and must survive unchanged into the conclusion cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    InTopThree,
    NotInTopThree,
    Unavailable,
}

impl Visibility {
    /// Report representation: `maps_visible_top3` is a nullable bool.
    #[must_use]
    pub fn as_option(self) -> Option<bool> {
        match self {
            Visibility::InTopThree => Some(true),
            Visibility::NotInTopThree => Some(false),
            Visibility::Unavailable => None,
        }
    }
}

/// The closed set of audit conclusions.
///
/// Serialized as the full display string — the strings are the external
/// contract. A fifth "well-positioned" variant existed briefly and was
/// removed; visible businesses with no findings fall back to
/// `NotDiscoverable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    #[serde(rename = "Not discoverable to high-intent buyers")]
    NotDiscoverable,
    #[serde(rename = "Invisible for high-value service")]
    InvisibleHighValue,
    #[serde(rename = "Losing calls due to capture gaps")]
    CaptureGaps,
    #[serde(rename = "Outpaced by competitors in review activity")]
    ReviewGap,
}

impl Conclusion {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Conclusion::NotDiscoverable => "Not discoverable to high-intent buyers",
            Conclusion::InvisibleHighValue => "Invisible for high-value service",
            Conclusion::CaptureGaps => "Losing calls due to capture gaps",
            Conclusion::ReviewGap => "Outpaced by competitors in review activity",
        }
    }

    /// Stable machine-readable code used by the missed-opportunity section.
    #[must_use]
    pub fn opportunity_code(self) -> &'static str {
        match self {
            Conclusion::NotDiscoverable => "not_discoverable",
            Conclusion::InvisibleHighValue => "invisible_high_value",
            Conclusion::CaptureGaps => "capture_gaps",
            Conclusion::ReviewGap => "review_gap",
        }
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConclusionReason {
    LocalPackNotAvailable,
    NotInTop3LocalPack,
    SignificantReviewGap,
    NoAfterHoursCapture,
    Default,
    BusinessNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedConclusion {
    pub conclusion: Conclusion,
    pub reason: ConclusionReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissedOpportunity {
    pub opportunity_code: String,
    pub opportunity_description: String,
    pub reason: ConclusionReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSafeSummary {
    pub headline: String,
    pub key_fact: String,
}

/// Inputs echoed back in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditInputs {
    pub business_name: String,
    pub website_url: String,
    pub city: String,
    pub primary_service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalVisibility {
    pub maps_visible_top3: Option<bool>,
    pub top3_competitors: Vec<CompetitorEntry>,
    pub local_pack_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDataStatus {
    Available,
    InsufficientApiData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviews {
    pub total_reviews: Option<u32>,
    pub rating: Option<f64>,
    pub last_review_date: Option<String>,
    pub review_data_status: ReviewDataStatus,
}

/// One external call made during an audit, recorded for the debug section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCallRecord {
    pub service: String,
    pub endpoint: String,
    pub status_code: Option<u16>,
    #[serde(with = "wire_time")]
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub cache_hit: bool,
    pub audit_duration_ms: u64,
    pub api_calls: Vec<ApiCallRecord>,
}

/// The full audit report: cache value and wire response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_id: Uuid,
    #[serde(with = "wire_time")]
    pub timestamp: DateTime<Utc>,
    pub inputs: AuditInputs,
    pub resolved_business: ResolvedBusiness,
    pub local_visibility: LocalVisibility,
    pub reviews: Reviews,
    pub call_capture: CaptureSignal,
    pub after_hours_risk: RiskAssessment,
    pub selected_conclusion: SelectedConclusion,
    pub missed_opportunity: MissedOpportunity,
    pub debug: DebugInfo,
    pub sales_safe_summary: SalesSafeSummary,
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
