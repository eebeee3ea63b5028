//! Template-rendered opportunity and summary text.
//!
//! Pure lookups keyed by the conclusion variant; the only logic is
//! placeholder substitution. The wording is part of the sales workflow and
//! changes go through the sales team, not engineering.

use precall_core::{
    service_readable, CompetitorEntry, Conclusion, ConclusionReason, MissedOpportunity,
    RiskAssessment, SalesSafeSummary,
};

const NOT_DISCOVERABLE_TEXT: &str = "Your local search presence isn't strong enough to appear \
     where buyers are looking. This limits booked jobs.";

const CAPTURE_GAPS_TEXT: &str = "Inquiries that arrive outside business hours have no reliable \
     path to a booking, so that demand goes to whoever answers first.";

/// Renders the missed-opportunity section for a selected conclusion.
///
/// One fixed template per conclusion: the invisibility template substitutes
/// the readable service and city, the review-gap template substitutes the
/// top competitor's name and both review counts, the rest are literal.
#[must_use]
pub fn missed_opportunity(
    conclusion: Conclusion,
    primary_service: &str,
    city: &str,
    total_reviews: Option<u32>,
    competitors: &[CompetitorEntry],
    reason: ConclusionReason,
) -> MissedOpportunity {
    let description = match conclusion {
        Conclusion::InvisibleHighValue => {
            let service = service_readable(primary_service);
            format!(
                "Buyers searching for {service} in {city} are finding competitors first, and \
                 those calls are going elsewhere."
            )
        }
        Conclusion::ReviewGap => {
            let (competitor_name, competitor_reviews) = competitors
                .first()
                .map_or(("Competitor".to_owned(), 0), |c| {
                    (c.name.clone(), c.review_count.unwrap_or(0))
                });
            let total = total_reviews.unwrap_or(0);
            format!(
                "{competitor_name} shows {competitor_reviews} reviews to your {total}. Buyers \
                 comparing options side by side pick the busier-looking company."
            )
        }
        Conclusion::CaptureGaps => CAPTURE_GAPS_TEXT.to_owned(),
        Conclusion::NotDiscoverable => NOT_DISCOVERABLE_TEXT.to_owned(),
    };

    MissedOpportunity {
        opportunity_code: conclusion.opportunity_code().to_owned(),
        opportunity_description: description,
        reason,
    }
}

/// Renders the sales-safe summary: the conclusion string as the headline
/// plus the single strongest piece of evidence as the key fact.
#[must_use]
pub fn sales_safe_summary(
    conclusion: Conclusion,
    risk: &RiskAssessment,
    competitors: &[CompetitorEntry],
) -> SalesSafeSummary {
    let key_fact = match conclusion {
        Conclusion::InvisibleHighValue => "Not appearing in top 3 local pack results".to_owned(),
        Conclusion::CaptureGaps => format!("After-hours risk: {}", risk.risk_level),
        Conclusion::ReviewGap => competitors.first().map_or_else(
            || "Significant review gap with competitors".to_owned(),
            |c| format!("Top competitor has {} reviews", c.review_count.unwrap_or(0)),
        ),
        Conclusion::NotDiscoverable => "Limited local search visibility".to_owned(),
    };

    SalesSafeSummary {
        headline: conclusion.as_str().to_owned(),
        key_fact,
    }
}

#[cfg(test)]
mod tests {
    use precall_core::{RiskLevel, RiskReason};

    use super::*;

    fn top_competitor() -> CompetitorEntry {
        CompetitorEntry {
            rank: 1,
            name: "Bug Busters".to_owned(),
            rating: Some(4.7),
            review_count: Some(200),
            address: None,
        }
    }

    #[test]
    fn invisible_substitutes_service_and_city() {
        let out = missed_opportunity(
            Conclusion::InvisibleHighValue,
            "pest_control",
            "Austin",
            Some(100),
            &[],
            ConclusionReason::NotInTop3LocalPack,
        );
        assert_eq!(out.opportunity_code, "invisible_high_value");
        assert!(out.opportunity_description.contains("pest control"));
        assert!(out.opportunity_description.contains("Austin"));
        assert_eq!(out.reason, ConclusionReason::NotInTop3LocalPack);
    }

    #[test]
    fn review_gap_substitutes_competitor_and_counts() {
        let out = missed_opportunity(
            Conclusion::ReviewGap,
            "pest_control",
            "Austin",
            Some(100),
            &[top_competitor()],
            ConclusionReason::SignificantReviewGap,
        );
        assert_eq!(out.opportunity_code, "review_gap");
        assert!(out.opportunity_description.contains("Bug Busters"));
        assert!(out.opportunity_description.contains("200"));
        assert!(out.opportunity_description.contains("100"));
    }

    #[test]
    fn review_gap_with_empty_panel_uses_placeholders() {
        let out = missed_opportunity(
            Conclusion::ReviewGap,
            "pest_control",
            "Austin",
            None,
            &[],
            ConclusionReason::SignificantReviewGap,
        );
        assert!(out.opportunity_description.contains("Competitor"));
        assert!(out.opportunity_description.contains('0'));
    }

    #[test]
    fn literal_templates_for_remaining_conclusions() {
        let capture = missed_opportunity(
            Conclusion::CaptureGaps,
            "pest_control",
            "Austin",
            Some(100),
            &[],
            ConclusionReason::NoAfterHoursCapture,
        );
        assert_eq!(capture.opportunity_code, "capture_gaps");

        let default = missed_opportunity(
            Conclusion::NotDiscoverable,
            "pest_control",
            "Austin",
            Some(100),
            &[],
            ConclusionReason::Default,
        );
        assert_eq!(default.opportunity_code, "not_discoverable");
        assert!(default.opportunity_description.contains("booked jobs"));
    }

    #[test]
    fn headline_is_the_conclusion_string() {
        let risk = RiskAssessment {
            risk_level: RiskLevel::High,
            reason: RiskReason::NoCaptureMechanisms,
        };
        let summary = sales_safe_summary(Conclusion::CaptureGaps, &risk, &[]);
        assert_eq!(summary.headline, "Losing calls due to capture gaps");
        assert!(summary.key_fact.contains("high"));
    }

    #[test]
    fn invisible_key_fact_mentions_top_three() {
        let risk = RiskAssessment {
            risk_level: RiskLevel::Low,
            reason: RiskReason::MultipleCapturePaths,
        };
        let summary = sales_safe_summary(Conclusion::InvisibleHighValue, &risk, &[]);
        assert!(summary.key_fact.to_lowercase().contains("top 3"));
    }

    #[test]
    fn review_gap_key_fact_uses_top_competitor() {
        let risk = RiskAssessment {
            risk_level: RiskLevel::Low,
            reason: RiskReason::MultipleCapturePaths,
        };
        let summary = sales_safe_summary(Conclusion::ReviewGap, &risk, &[top_competitor()]);
        assert_eq!(summary.key_fact, "Top competitor has 200 reviews");

        let fallback = sales_safe_summary(Conclusion::ReviewGap, &risk, &[]);
        assert_eq!(fallback.key_fact, "Significant review gap with competitors");
    }
}
