//! The audit endpoint: validation, cache lookup, pipeline dispatch.

use axum::{extract::State, http::StatusCode, Json};

use precall_cache::cache_key;
use precall_core::{AuditReport, ResolutionStatus};

use crate::validate::{validate, AuditRequest};

use super::{ApiError, AppState};

/// `POST /audit`.
///
/// Validation failures are rejected before any upstream call. A cache hit is
/// returned with `debug.cache_hit` set; an unresolvable business maps to 400
/// and is never cached. Cache failures degrade to a plain miss rather than
/// failing the request.
pub async fn create_audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditReport>, ApiError> {
    if let Err(detail) = validate(&request) {
        tracing::warn!(detail, "rejected invalid audit request");
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("validation_error: {detail}"),
        ));
    }

    let key = cache_key(
        &request.business_name,
        &request.website_url,
        &request.city,
        &request.primary_service,
    );
    match state.cache.get(&key).await {
        Ok(Some(mut report)) => {
            report.debug.cache_hit = true;
            return Ok(Json(report));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "cache read failed, continuing without cache");
        }
    }

    let report = state
        .runner
        .run(
            &request.business_name,
            &request.website_url,
            &request.city,
            &request.primary_service,
        )
        .await;

    if report.resolved_business.resolution_status == ResolutionStatus::NotFound {
        tracing::warn!(
            business_name = %request.business_name,
            city = %request.city,
            "business not found"
        );
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "business_not_found"));
    }

    if let Err(e) = state.cache.put(&key, &report).await {
        tracing::warn!(error = %e, "cache write failed");
    }
    Ok(Json(report))
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
