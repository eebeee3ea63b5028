//! Explicit accumulator for the debug call log.
//!
//! An earlier revision appended to a shared mutable list as a side effect of
//! each pipeline stage. This value is instead owned by the runner and
//! threaded explicitly, which keeps every stage pure and the pipeline safe
//! to parallelize.

use chrono::Utc;
use precall_core::ApiCallRecord;

/// Ordered record of every external call made during one audit run.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Vec<ApiCallRecord>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful call.
    pub fn record_ok(&mut self, service: &str, endpoint: &str, status_code: u16) {
        self.push(service, endpoint, Some(status_code), None);
    }

    /// Records a call that carries no single HTTP status, such as the
    /// multi-page website scan.
    pub fn record_plain(&mut self, service: &str, endpoint: &str) {
        self.push(service, endpoint, None, None);
    }

    /// Records a failed call with an optional upstream status code.
    pub fn record_err(
        &mut self,
        service: &str,
        endpoint: &str,
        status_code: Option<u16>,
        error: &str,
    ) {
        self.push(service, endpoint, status_code, Some(error.to_owned()));
    }

    fn push(
        &mut self,
        service: &str,
        endpoint: &str,
        status_code: Option<u16>,
        error: Option<String>,
    ) {
        self.calls.push(ApiCallRecord {
            service: service.to_owned(),
            endpoint: endpoint.to_owned(),
            status_code,
            timestamp: Utc::now(),
            error,
        });
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ApiCallRecord> {
        self.calls
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_preserve_order_and_detail() {
        let mut log = CallLog::new();
        log.record_ok("google_places", "textsearch", 200);
        log.record_err("google_places", "details", Some(500), "HTTP 500");
        log.record_plain("website_scan", "abcpestcontrol.com");
        log.record_err("serpapi", "search", None, "connection refused");

        let records = log.into_records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].endpoint, "textsearch");
        assert_eq!(records[0].status_code, Some(200));
        assert!(records[0].error.is_none());
        assert_eq!(records[1].status_code, Some(500));
        assert_eq!(records[1].error.as_deref(), Some("HTTP 500"));
        assert_eq!(records[2].service, "website_scan");
        assert_eq!(records[2].endpoint, "abcpestcontrol.com");
        assert!(records[2].status_code.is_none());
        assert!(records[2].error.is_none());
        assert_eq!(records[3].service, "serpapi");
        assert!(records[3].status_code.is_none());
    }
}
