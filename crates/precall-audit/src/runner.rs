//! Audit orchestration.
//!
//! Sequences the pipeline in fixed order: resolve → details overlay →
//! competitor panel + website scan (concurrent, order-independent) →
//! visibility → risk → conclusion → sales text. A failed resolution
//! short-circuits to a placeholder report; any other upstream failure
//! degrades only its own report section.

use std::time::Instant;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use precall_core::{
    service_readable, website_domain, AuditInputs, AuditReport, CaptureSignal, CompetitorEntry,
    ConclusionReason, DebugInfo, LocalVisibility, ResolutionStatus, ResolvedBusiness,
    ReviewDataStatus, Reviews, RiskAssessment, RiskLevel, RiskReason, Visibility,
};
use precall_places::{PlacesClient, SerpClient};
use precall_scanner::SiteScanner;

use crate::call_log::CallLog;
use crate::conclusion::select_conclusion;
use crate::resolver::resolve;
use crate::risk::assess_after_hours_risk;
use crate::summary::{missed_opportunity, sales_safe_summary};
use crate::visibility::{check_panel, check_panel_strict};

const NEARBY_RADIUS_METERS: u32 = 5000;

/// Runs complete audits over the external clients.
///
/// The SerpAPI client is optional: when present it serves as a fallback
/// panel source if Nearby Search fails.
pub struct AuditRunner {
    places: PlacesClient,
    scanner: SiteScanner,
    serp: Option<SerpClient>,
}

struct PanelOutcome {
    visibility: Visibility,
    competitors: Vec<CompetitorEntry>,
    available: bool,
}

impl AuditRunner {
    #[must_use]
    pub fn new(places: PlacesClient, scanner: SiteScanner, serp: Option<SerpClient>) -> Self {
        Self {
            places,
            scanner,
            serp,
        }
    }

    /// Runs one audit. Always produces a report; resolution failures and
    /// upstream errors are reflected in the report rather than returned as
    /// errors (the caller inspects `resolved_business.resolution_status`).
    pub async fn run(
        &self,
        business_name: &str,
        website_url: &str,
        city: &str,
        primary_service: &str,
    ) -> AuditReport {
        let started = Instant::now();
        let audit_id = Uuid::new_v4();
        let timestamp = Utc::now();
        let mut call_log = CallLog::new();

        tracing::info!(%audit_id, business_name, city, "starting audit");

        let inputs = AuditInputs {
            business_name: business_name.to_owned(),
            website_url: website_url.to_owned(),
            city: city.to_owned(),
            primary_service: primary_service.to_owned(),
        };

        // Step 1: resolve the business against the place search.
        let resolved = match self.places.text_search(business_name, city).await {
            Ok(candidates) => {
                call_log.record_ok("google_places", "textsearch", 200);
                resolve(&candidates, business_name, city, website_url)
            }
            Err(e) => {
                tracing::warn!(error = %e, "text search failed");
                call_log.record_err("google_places", "textsearch", e.status_code(), &e.to_string());
                ResolvedBusiness::error(business_name)
            }
        };

        if resolved.resolution_status != ResolutionStatus::Found {
            tracing::warn!(%audit_id, business_name, city, "business not resolved");
            return short_circuit_report(
                audit_id,
                timestamp,
                inputs,
                resolved,
                call_log,
                elapsed_ms(started),
            );
        }
        let mut resolved = resolved;

        // Step 2: details overlay (phone, review recency, coordinates).
        let mut last_review_date = None;
        let mut location = None;
        if let Some(place_id) = resolved.place_id.clone() {
            match self.places.details(&place_id).await {
                Ok(details) => {
                    call_log.record_ok("google_places", "details", 200);
                    resolved.overlay_details(
                        details.phone,
                        details.website,
                        details.rating,
                        details.review_count,
                    );
                    last_review_date = details.last_review_date;
                    location = details.location;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "place details failed");
                    call_log.record_err(
                        "google_places",
                        "details",
                        e.status_code(),
                        &e.to_string(),
                    );
                }
            }
        }

        let reviews = Reviews {
            total_reviews: resolved.total_reviews,
            rating: resolved.rating,
            last_review_date,
            review_data_status: if resolved.total_reviews.is_some() {
                ReviewDataStatus::Available
            } else {
                ReviewDataStatus::InsufficientApiData
            },
        };

        // Steps 3+4: the panel and the site scan depend only on the
        // resolved identity, so they run concurrently.
        let website = resolved.website.clone().unwrap_or_else(|| website_url.to_owned());
        let (panel_result, capture) = tokio::join!(
            self.fetch_panel_primary(location, primary_service),
            self.scanner.scan(&website),
        );
        call_log.record_plain("website_scan", &website_domain(&website));
        let panel = self
            .settle_panel(panel_result, &resolved, city, primary_service, &mut call_log)
            .await;

        // Step 5: risk, conclusion, sales text — all pure from here on.
        let risk = assess_after_hours_risk(
            capture.pages_scanned,
            capture.phone_found,
            capture.form_detected,
            capture.scheduling_widget_detected,
        );

        let selected = select_conclusion(
            panel.visibility,
            risk.risk_level,
            reviews.total_reviews,
            panel.competitors.first(),
        );
        let missed = missed_opportunity(
            selected.conclusion,
            primary_service,
            city,
            reviews.total_reviews,
            &panel.competitors,
            selected.reason,
        );
        let summary = sales_safe_summary(selected.conclusion, &risk, &panel.competitors);

        let duration_ms = elapsed_ms(started);
        tracing::info!(%audit_id, duration_ms, conclusion = %selected.conclusion, "audit completed");

        AuditReport {
            audit_id,
            timestamp,
            inputs,
            resolved_business: resolved,
            local_visibility: LocalVisibility {
                maps_visible_top3: panel.visibility.as_option(),
                top3_competitors: panel.competitors,
                local_pack_available: panel.available,
            },
            reviews,
            call_capture: capture,
            after_hours_risk: risk,
            selected_conclusion: selected,
            missed_opportunity: missed,
            debug: DebugInfo {
                cache_hit: false,
                audit_duration_ms: duration_ms,
                api_calls: call_log.into_records(),
            },
            sales_safe_summary: summary,
        }
    }

    async fn fetch_panel_primary(
        &self,
        location: Option<(f64, f64)>,
        primary_service: &str,
    ) -> Result<Vec<CompetitorEntry>, precall_places::PlacesError> {
        // Coordinates come from Place Details; without them the provider
        // still answers, just with weaker relevance.
        let (lat, lng) = location.unwrap_or((0.0, 0.0));
        self.places
            .nearby_search(lat, lng, primary_service, NEARBY_RADIUS_METERS)
            .await
    }

    /// Turns the primary panel outcome into visibility + competitors,
    /// falling back to the SerpAPI local pack (with the stricter matching
    /// variant) when the primary source failed.
    async fn settle_panel(
        &self,
        primary: Result<Vec<CompetitorEntry>, precall_places::PlacesError>,
        resolved: &ResolvedBusiness,
        city: &str,
        primary_service: &str,
        call_log: &mut CallLog,
    ) -> PanelOutcome {
        match primary {
            Ok(entries) => {
                call_log.record_ok("google_places", "nearby_search", 200);
                let visibility = check_panel(&resolved.name, &entries);
                PanelOutcome {
                    visibility,
                    available: !entries.is_empty(),
                    competitors: entries,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "nearby search failed");
                call_log.record_err(
                    "google_places",
                    "nearby_search",
                    e.status_code(),
                    &e.to_string(),
                );
                self.serp_fallback(resolved, city, primary_service, call_log)
                    .await
            }
        }
    }

    async fn serp_fallback(
        &self,
        resolved: &ResolvedBusiness,
        city: &str,
        primary_service: &str,
        call_log: &mut CallLog,
    ) -> PanelOutcome {
        let unavailable = PanelOutcome {
            visibility: Visibility::Unavailable,
            competitors: Vec::new(),
            available: false,
        };
        let Some(serp) = &self.serp else {
            return unavailable;
        };

        let query = format!("{} {city}", service_readable(primary_service));
        match serp.local_pack(&query).await {
            Ok(pack) => {
                call_log.record_ok("serpapi", "search", 200);
                if !pack.available {
                    return unavailable;
                }
                let address = (!resolved.address.is_empty()).then_some(resolved.address.as_str());
                let visibility = check_panel_strict(&resolved.name, address, &pack.entries);
                PanelOutcome {
                    visibility,
                    available: true,
                    competitors: pack.entries,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "serp local pack failed");
                call_log.record_err("serpapi", "search", e.status_code(), &e.to_string());
                unavailable
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Report for a run that never got past resolution: every downstream
/// section takes its fixed placeholder value.
fn short_circuit_report(
    audit_id: Uuid,
    timestamp: DateTime<Utc>,
    inputs: AuditInputs,
    resolved: ResolvedBusiness,
    call_log: CallLog,
    duration_ms: u64,
) -> AuditReport {
    let risk = RiskAssessment {
        risk_level: RiskLevel::Unknown,
        reason: RiskReason::BusinessNotFound,
    };
    let selected = select_conclusion(Visibility::Unavailable, risk.risk_level, None, None);
    let selected = precall_core::SelectedConclusion {
        reason: ConclusionReason::BusinessNotFound,
        ..selected
    };
    let missed = missed_opportunity(
        selected.conclusion,
        &inputs.primary_service,
        &inputs.city,
        None,
        &[],
        selected.reason,
    );
    let mut summary = sales_safe_summary(selected.conclusion, &risk, &[]);
    summary.key_fact = "Business could not be resolved".to_owned();

    AuditReport {
        audit_id,
        timestamp,
        inputs,
        resolved_business: resolved,
        local_visibility: LocalVisibility {
            maps_visible_top3: None,
            top3_competitors: Vec::new(),
            local_pack_available: false,
        },
        reviews: Reviews {
            total_reviews: None,
            rating: None,
            last_review_date: None,
            review_data_status: ReviewDataStatus::InsufficientApiData,
        },
        call_capture: CaptureSignal::no_data(),
        after_hours_risk: risk,
        selected_conclusion: selected,
        missed_opportunity: missed,
        debug: DebugInfo {
            cache_hit: false,
            audit_duration_ms: duration_ms,
            api_calls: call_log.into_records(),
        },
        sales_safe_summary: summary,
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
