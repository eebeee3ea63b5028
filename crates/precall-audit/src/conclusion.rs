//! The conclusion cascade: one deterministic verdict per audit.

use precall_core::{
    CompetitorEntry, Conclusion, ConclusionReason, RiskLevel, SelectedConclusion, Visibility,
};

/// Multiplier for the review-gap rule: the top competitor must hold at least
/// twice the target's reviews (inclusive).
const REVIEW_GAP_MULTIPLIER: u64 = 2;

/// Selects the single audit conclusion.
///
/// Ordered rules, first match wins:
/// 1. no panel data → not discoverable (`local_pack_not_available`)
/// 2. absent from the top three → invisible for high-value service
/// 3. visible, but the top competitor holds ≥ 2× the target's reviews →
///    outpaced in review activity (skipped entirely when the target's
///    review total is unknown — unknown is not zero)
/// 4. visible with high after-hours risk → losing calls to capture gaps
/// 5. otherwise → not discoverable (`default`)
///
/// Total over its whole input domain; there is no "no conclusion" case.
#[must_use]
pub fn select_conclusion(
    visibility: Visibility,
    risk_level: RiskLevel,
    total_reviews: Option<u32>,
    top_competitor: Option<&CompetitorEntry>,
) -> SelectedConclusion {
    match visibility {
        Visibility::Unavailable => {
            return SelectedConclusion {
                conclusion: Conclusion::NotDiscoverable,
                reason: ConclusionReason::LocalPackNotAvailable,
            };
        }
        Visibility::NotInTopThree => {
            return SelectedConclusion {
                conclusion: Conclusion::InvisibleHighValue,
                reason: ConclusionReason::NotInTop3LocalPack,
            };
        }
        Visibility::InTopThree => {}
    }

    if let (Some(total), Some(competitor)) = (total_reviews, top_competitor) {
        let competitor_reviews = u64::from(competitor.review_count.unwrap_or(0));
        if competitor_reviews >= REVIEW_GAP_MULTIPLIER * u64::from(total) {
            return SelectedConclusion {
                conclusion: Conclusion::ReviewGap,
                reason: ConclusionReason::SignificantReviewGap,
            };
        }
    }

    if risk_level == RiskLevel::High {
        return SelectedConclusion {
            conclusion: Conclusion::CaptureGaps,
            reason: ConclusionReason::NoAfterHoursCapture,
        };
    }

    SelectedConclusion {
        conclusion: Conclusion::NotDiscoverable,
        reason: ConclusionReason::Default,
    }
}

#[cfg(test)]
#[path = "conclusion_test.rs"]
mod tests;
