//! Signature detection over raw page HTML.

use std::collections::BTreeSet;

use regex::Regex;

use precall_core::{CALL_TRACKING_VENDORS, FORM_VENDORS, SCHEDULING_WIDGETS};

/// Compiled patterns shared across pages of one scan.
pub(crate) struct Detectors {
    tel_href: Regex,
    phone: Regex,
    digits: Regex,
    script_src: Regex,
}

impl Detectors {
    pub(crate) fn new() -> Self {
        Self {
            tel_href: Regex::new(r#"(?i)href\s*=\s*["']tel:([^"']+)["']"#).expect("valid regex"),
            // NANP numbers with optional +1 prefix and common separators.
            phone: Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
                .expect("valid regex"),
            digits: Regex::new(r"\D").expect("valid regex"),
            script_src: Regex::new(r#"(?i)<script[^>]*\bsrc\s*=\s*["']([^"']+)["']"#)
                .expect("valid regex"),
        }
    }

    /// Extracts phone numbers from `tel:` hrefs and free-text matches,
    /// normalized to `(xxx) xxx-xxxx`.
    pub(crate) fn extract_phones(&self, html: &str) -> BTreeSet<String> {
        let mut phones = BTreeSet::new();
        for cap in self.tel_href.captures_iter(html) {
            if let Some(m) = cap.get(1) {
                if let Some(normalized) = self.normalize_phone(m.as_str()) {
                    phones.insert(normalized);
                }
            }
        }
        for m in self.phone.find_iter(html) {
            if let Some(normalized) = self.normalize_phone(m.as_str()) {
                phones.insert(normalized);
            }
        }
        phones
    }

    /// Strips non-digits and formats ten-digit (or 1-prefixed eleven-digit)
    /// numbers; anything else is discarded as a false positive.
    fn normalize_phone(&self, raw: &str) -> Option<String> {
        let digits = self.digits.replace_all(raw, "");
        let digits = match digits.len() {
            10 => &digits[..],
            11 if digits.starts_with('1') => &digits[1..],
            _ => return None,
        };
        Some(format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..]
        ))
    }

    /// A literal `<form` tag or any hosted-form vendor signature.
    pub(crate) fn detect_form(&self, html_lower: &str) -> bool {
        if html_lower.contains("<form") {
            return true;
        }
        FORM_VENDORS.iter().any(|v| html_lower.contains(v))
    }

    /// Call-tracking vendor detection: script srcs first (the strongest
    /// signal), then the whole body. Returns the matched vendor name.
    pub(crate) fn detect_call_tracking(&self, html: &str, html_lower: &str) -> Option<String> {
        for cap in self.script_src.captures_iter(html) {
            if let Some(src) = cap.get(1) {
                let src_lower = src.as_str().to_lowercase();
                for vendor in CALL_TRACKING_VENDORS {
                    if src_lower.contains(vendor) {
                        return Some((*vendor).to_owned());
                    }
                }
            }
        }
        CALL_TRACKING_VENDORS
            .iter()
            .find(|v| html_lower.contains(*v))
            .map(|v| (*v).to_owned())
    }

    pub(crate) fn detect_scheduling(&self, html_lower: &str) -> bool {
        SCHEDULING_WIDGETS.iter().any(|w| html_lower.contains(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tel_href_is_extracted_and_normalized() {
        let d = Detectors::new();
        let html = r#"<a href="tel:+15125550147">Call us</a>"#;
        let phones = d.extract_phones(html);
        assert!(phones.contains("(512) 555-0147"));
    }

    #[test]
    fn free_text_phone_formats_converge() {
        let d = Detectors::new();
        let html = "Call (512) 555-0147 or 512.555.0147 or 512-555-0147 today";
        let phones = d.extract_phones(html);
        assert_eq!(phones.len(), 1, "all spellings normalize to one number");
    }

    #[test]
    fn distinct_numbers_stay_distinct() {
        let d = Detectors::new();
        let html = "Sales: 512-555-0147. Service: 512-555-0199.";
        let phones = d.extract_phones(html);
        assert_eq!(phones.len(), 2);
    }

    #[test]
    fn short_digit_runs_are_discarded() {
        let d = Detectors::new();
        let phones = d.extract_phones("Suite 4512, est. 1985");
        assert!(phones.is_empty());
    }

    #[test]
    fn form_tag_detected() {
        let d = Detectors::new();
        assert!(d.detect_form(r#"<form action="/submit" method="post">"#));
        assert!(!d.detect_form("<div>no forms here</div>"));
    }

    #[test]
    fn form_vendor_signature_detected() {
        let d = Detectors::new();
        assert!(d.detect_form("<script src=\"https://js.formspree.io/embed.js\"></script>"));
    }

    #[test]
    fn call_tracking_prefers_script_src() {
        let d = Detectors::new();
        let html = r#"<script src="https://cdn.callrail.com/companies/123/abc/12/swap.js"></script>"#;
        let vendor = d.detect_call_tracking(html, &html.to_lowercase());
        assert_eq!(vendor.as_deref(), Some("callrail"));
    }

    #[test]
    fn call_tracking_falls_back_to_body_text() {
        let d = Detectors::new();
        let html = "<!-- powered by WhatConverts -->";
        let vendor = d.detect_call_tracking(html, &html.to_lowercase());
        assert_eq!(vendor.as_deref(), Some("whatconverts"));
    }

    #[test]
    fn no_tracking_vendor_means_none() {
        let d = Detectors::new();
        assert!(d.detect_call_tracking("<p>hi</p>", "<p>hi</p>").is_none());
    }

    #[test]
    fn scheduling_widget_detected() {
        let d = Detectors::new();
        assert!(d.detect_scheduling(r#"<iframe src="https://calendly.com/abc-pest/estimate">"#));
        assert!(!d.detect_scheduling("<p>walk-ins welcome</p>"));
    }
}
