//! Page fetching and capture-signal assembly.

use std::time::Duration;

use reqwest::Client;

use precall_core::{CaptureSignal, CaptureStatus, PhoneConsistency, TrackingStatus};

use crate::detect::Detectors;
use crate::error::ScannerError;

/// The fixed page set: homepage plus the two pages where capture mechanisms
/// live on nearly every local-service site.
const SCAN_PATHS: &[&str] = &["/", "/contact", "/services"];

/// Scans a business website for lead-capture mechanisms.
pub struct SiteScanner {
    client: Client,
    detectors: Detectors,
}

impl SiteScanner {
    /// Creates a scanner with the given timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            detectors: Detectors::new(),
        })
    }

    /// Fetches the page set and reduces it to one [`CaptureSignal`].
    ///
    /// Per-page failures are logged and tolerated; `pages_scanned` counts
    /// successful fetches and the derived status distinguishes a fully
    /// unreachable site (`no_data`) from a partial one (`partial_failure`).
    pub async fn scan(&self, website_url: &str) -> CaptureSignal {
        let base = normalize_base(website_url);

        let mut phones = std::collections::BTreeSet::new();
        let mut form_detected = false;
        let mut call_tracking_vendor: Option<String> = None;
        let mut scheduling_detected = false;
        let mut pages_scanned: u8 = 0;
        let pages_attempted = u8::try_from(SCAN_PATHS.len()).unwrap_or(u8::MAX);

        for path in SCAN_PATHS {
            let page_url = format!("{base}{path}");
            match self.fetch_page(&page_url).await {
                Some(html) => {
                    pages_scanned += 1;
                    let html_lower = html.to_lowercase();
                    phones.append(&mut self.detectors.extract_phones(&html));
                    if !form_detected {
                        form_detected = self.detectors.detect_form(&html_lower);
                    }
                    if call_tracking_vendor.is_none() {
                        call_tracking_vendor =
                            self.detectors.detect_call_tracking(&html, &html_lower);
                    }
                    if !scheduling_detected {
                        scheduling_detected = self.detectors.detect_scheduling(&html_lower);
                    }
                }
                None => {
                    tracing::debug!(url = %page_url, "page fetch failed or non-200");
                }
            }
        }

        tracing::info!(
            website = %base,
            pages_attempted,
            pages_scanned,
            phones = phones.len(),
            "website scan finished"
        );

        assemble_signal(
            phones,
            form_detected,
            call_tracking_vendor,
            scheduling_detected,
            pages_scanned,
            pages_attempted,
        )
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = self.client.get(url).send().await.ok()?;
        if response.status() != reqwest::StatusCode::OK {
            return None;
        }
        response.text().await.ok()
    }
}

/// Normalizes user-supplied website input to a `scheme://host` base with no
/// trailing slash. Inputs may arrive without a scheme.
fn normalize_base(website_url: &str) -> String {
    let with_scheme = if website_url.contains("://") {
        website_url.to_owned()
    } else {
        format!("https://{website_url}")
    };
    let trimmed = with_scheme.trim_end_matches('/');
    // Keep only scheme://host; strip any path the caller included.
    match trimmed.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.split('/').next().unwrap_or(rest);
            format!("{scheme}://{host}")
        }
        None => trimmed.to_owned(),
    }
}

fn assemble_signal(
    phones: std::collections::BTreeSet<String>,
    form_detected: bool,
    call_tracking_vendor: Option<String>,
    scheduling_detected: bool,
    pages_scanned: u8,
    pages_attempted: u8,
) -> CaptureSignal {
    let phones_detected: Vec<String> = phones.into_iter().collect();
    let phone_consistency = match phones_detected.len() {
        0 => PhoneConsistency::NotFound,
        1 => PhoneConsistency::Consistent,
        _ => PhoneConsistency::Inconsistent,
    };
    let capture_assessment_status = if pages_scanned == 0 {
        CaptureStatus::NoData
    } else if pages_scanned < pages_attempted {
        CaptureStatus::PartialFailure
    } else {
        CaptureStatus::Completed
    };
    // With nothing scanned there is no evidence either way on tracking.
    let call_tracking_detected = if pages_scanned == 0 {
        TrackingStatus::Unknown
    } else if call_tracking_vendor.is_some() {
        TrackingStatus::Detected
    } else {
        TrackingStatus::NotDetected
    };

    CaptureSignal {
        phone_found: !phones_detected.is_empty(),
        phones_detected,
        phone_consistency,
        form_detected,
        call_tracking_detected,
        call_tracking_vendor,
        scheduling_widget_detected: scheduling_detected,
        pages_scanned,
        capture_assessment_status,
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
