//! After-hours capture risk classification.

use precall_core::{RiskAssessment, RiskLevel, RiskReason};

/// Classifies after-hours capture risk from the website scan flags.
///
/// Ordered rules, first match wins. The ordering is load-bearing: the
/// no-mechanisms rule must run before the phone-only rule, otherwise a site
/// with nothing at all could fall through to a weaker classification.
///
/// 1. nothing scanned → unknown
/// 2. no mechanism at all → high
/// 3. phone plus a form or scheduling widget → low
/// 4. phone only → medium
/// 5. form or scheduling without a phone → low
#[must_use]
pub fn assess_after_hours_risk(
    pages_scanned: u8,
    phone_found: bool,
    form_detected: bool,
    scheduling_detected: bool,
) -> RiskAssessment {
    if pages_scanned == 0 {
        return RiskAssessment {
            risk_level: RiskLevel::Unknown,
            reason: RiskReason::UnableToScanWebsite,
        };
    }
    if !phone_found && !form_detected && !scheduling_detected {
        return RiskAssessment {
            risk_level: RiskLevel::High,
            reason: RiskReason::NoCaptureMechanisms,
        };
    }
    if phone_found && (form_detected || scheduling_detected) {
        return RiskAssessment {
            risk_level: RiskLevel::Low,
            reason: RiskReason::MultipleCapturePaths,
        };
    }
    if phone_found {
        return RiskAssessment {
            risk_level: RiskLevel::Medium,
            reason: RiskReason::PhoneOnly,
        };
    }
    RiskAssessment {
        risk_level: RiskLevel::Low,
        reason: RiskReason::HasAlternativeCapture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pages_is_unknown() {
        let risk = assess_after_hours_risk(0, false, false, false);
        assert_eq!(risk.risk_level, RiskLevel::Unknown);
        assert_eq!(risk.reason, RiskReason::UnableToScanWebsite);
    }

    #[test]
    fn zero_pages_wins_even_with_flags_set() {
        // Flags can't legitimately be set with nothing scanned, but the
        // rule table is still total over the raw input space.
        let risk = assess_after_hours_risk(0, true, true, true);
        assert_eq!(risk.reason, RiskReason::UnableToScanWebsite);
    }

    #[test]
    fn no_mechanisms_is_high() {
        let risk = assess_after_hours_risk(3, false, false, false);
        assert_eq!(risk.risk_level, RiskLevel::High);
        assert_eq!(risk.reason, RiskReason::NoCaptureMechanisms);
    }

    #[test]
    fn phone_with_form_is_low() {
        let risk = assess_after_hours_risk(3, true, true, false);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert_eq!(risk.reason, RiskReason::MultipleCapturePaths);
    }

    #[test]
    fn phone_with_scheduling_is_low() {
        let risk = assess_after_hours_risk(3, true, false, true);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert_eq!(risk.reason, RiskReason::MultipleCapturePaths);
    }

    #[test]
    fn phone_only_is_medium() {
        let risk = assess_after_hours_risk(2, true, false, false);
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert_eq!(risk.reason, RiskReason::PhoneOnly);
    }

    #[test]
    fn alternative_capture_without_phone_is_low() {
        let risk = assess_after_hours_risk(3, false, true, false);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert_eq!(risk.reason, RiskReason::HasAlternativeCapture);

        let risk = assess_after_hours_risk(3, false, false, true);
        assert_eq!(risk.reason, RiskReason::HasAlternativeCapture);
    }

    /// The five rules are mutually exclusive and exhaustive: every input
    /// combination produces exactly the pair the ordered table dictates.
    #[test]
    fn rule_table_is_exhaustive_over_all_inputs() {
        for pages in [0_u8, 1, 2, 3] {
            for phone in [false, true] {
                for form in [false, true] {
                    for scheduling in [false, true] {
                        let risk = assess_after_hours_risk(pages, phone, form, scheduling);
                        let expected = if pages == 0 {
                            (RiskLevel::Unknown, RiskReason::UnableToScanWebsite)
                        } else if !phone && !form && !scheduling {
                            (RiskLevel::High, RiskReason::NoCaptureMechanisms)
                        } else if phone && (form || scheduling) {
                            (RiskLevel::Low, RiskReason::MultipleCapturePaths)
                        } else if phone {
                            (RiskLevel::Medium, RiskReason::PhoneOnly)
                        } else {
                            (RiskLevel::Low, RiskReason::HasAlternativeCapture)
                        };
                        assert_eq!(
                            (risk.risk_level, risk.reason),
                            expected,
                            "inputs: pages={pages} phone={phone} form={form} scheduling={scheduling}"
                        );
                    }
                }
            }
        }
    }
}
