use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use precall_core::{CaptureStatus, PhoneConsistency, TrackingStatus};

use super::*;

fn scanner() -> SiteScanner {
    SiteScanner::new(5, "precall-test/0.1").expect("scanner construction should not fail")
}

#[test]
fn normalize_base_adds_scheme_and_strips_path() {
    assert_eq!(
        normalize_base("abcpestcontrol.com"),
        "https://abcpestcontrol.com"
    );
    assert_eq!(
        normalize_base("https://abcpestcontrol.com/"),
        "https://abcpestcontrol.com"
    );
    assert_eq!(
        normalize_base("http://abcpestcontrol.com/about/team"),
        "http://abcpestcontrol.com"
    );
}

#[tokio::test]
async fn full_scan_aggregates_signals_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><a href="tel:+15125550147">Call</a>
            <script src="https://cdn.callrail.com/companies/1/swap.js"></script></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><form action="/submit"><input name="email"/></form>
            Call (512) 555-0147</html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><iframe src="https://calendly.com/abc-pest"></iframe></html>"#,
        ))
        .mount(&server)
        .await;

    let signal = scanner().scan(&server.uri()).await;

    assert!(signal.phone_found);
    assert_eq!(signal.phones_detected, vec!["(512) 555-0147".to_owned()]);
    assert_eq!(signal.phone_consistency, PhoneConsistency::Consistent);
    assert!(signal.form_detected);
    assert_eq!(signal.call_tracking_detected, TrackingStatus::Detected);
    assert_eq!(signal.call_tracking_vendor.as_deref(), Some("callrail"));
    assert!(signal.scheduling_widget_detected);
    assert_eq!(signal.pages_scanned, 3);
    assert_eq!(signal.capture_assessment_status, CaptureStatus::Completed);
}

#[tokio::test]
async fn missing_pages_yield_partial_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html>Call 512-555-0147</html>"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let signal = scanner().scan(&server.uri()).await;

    assert_eq!(signal.pages_scanned, 1);
    assert_eq!(
        signal.capture_assessment_status,
        CaptureStatus::PartialFailure
    );
    assert!(signal.phone_found);
    assert!(!signal.form_detected);
    assert_eq!(signal.call_tracking_detected, TrackingStatus::NotDetected);
}

#[tokio::test]
async fn unreachable_site_yields_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let signal = scanner().scan(&server.uri()).await;

    assert_eq!(signal.pages_scanned, 0);
    assert_eq!(signal.capture_assessment_status, CaptureStatus::NoData);
    assert_eq!(signal.phone_consistency, PhoneConsistency::NotFound);
    assert_eq!(signal.call_tracking_detected, TrackingStatus::Unknown);
    assert!(!signal.phone_found);
}

#[tokio::test]
async fn conflicting_numbers_are_inconsistent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>Sales 512-555-0147, Service 512-555-0199</html>"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let signal = scanner().scan(&server.uri()).await;

    assert_eq!(signal.phones_detected.len(), 2);
    assert_eq!(signal.phone_consistency, PhoneConsistency::Inconsistent);
}
