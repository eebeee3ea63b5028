//! Candidate resolution: match a free-text business description to one
//! search result.

use precall_core::{website_domain, CandidateMatch, ResolvedBusiness, ResolutionStatus};

use crate::similarity::token_set_ratio;

/// An exact website-domain match dominates any achievable name/city score
/// (name similarity tops out at 100, the city bonus at 50).
const DOMAIN_MATCH_SCORE: i64 = 1000;
const CITY_MATCH_SCORE: i64 = 50;

/// Scores each candidate and selects the best match for the target business.
///
/// Per-candidate score:
/// - +1000 when the candidate's website domain equals the target's
///   (lowercased host, leading `www.` stripped);
/// - + token-set name similarity in `[0, 100]`;
/// - +50 when the target city appears (case-insensitive) in the address.
///
/// The maximum wins; ties keep the first-seen candidate. A maximum of zero
/// means no candidate showed any positive signal, which resolves to
/// `not_found` even though candidates existed.
#[must_use]
pub fn resolve(
    candidates: &[CandidateMatch],
    target_name: &str,
    target_city: &str,
    target_website: &str,
) -> ResolvedBusiness {
    if candidates.is_empty() {
        return ResolvedBusiness::not_found(target_name);
    }

    let target_domain = website_domain(target_website);
    let city_lower = target_city.to_lowercase();

    let mut best: Option<(i64, &CandidateMatch)> = None;
    for candidate in candidates {
        let score = score_candidate(candidate, target_name, &city_lower, &target_domain);
        tracing::debug!(candidate = %candidate.name, score, "scored resolution candidate");
        // Strictly-greater keeps the first-seen candidate on ties.
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    match best {
        Some((score, candidate)) if score > 0 => found(candidate),
        _ => ResolvedBusiness::not_found(target_name),
    }
}

fn score_candidate(
    candidate: &CandidateMatch,
    target_name: &str,
    city_lower: &str,
    target_domain: &str,
) -> i64 {
    let mut score = 0;
    if !target_domain.is_empty() {
        if let Some(website) = &candidate.website {
            if website_domain(website) == target_domain {
                score += DOMAIN_MATCH_SCORE;
            }
        }
    }
    score += i64::from(token_set_ratio(target_name, &candidate.name));
    if !city_lower.is_empty() && candidate.address.to_lowercase().contains(city_lower) {
        score += CITY_MATCH_SCORE;
    }
    score
}

fn found(candidate: &CandidateMatch) -> ResolvedBusiness {
    let google_maps_url = candidate
        .place_id
        .as_ref()
        .map(|id| format!("https://www.google.com/maps/place/?q=place_id:{id}"));
    ResolvedBusiness {
        place_id: candidate.place_id.clone(),
        name: candidate.name.clone(),
        address: candidate.address.clone(),
        phone: None,
        website: candidate.website.clone(),
        rating: candidate.rating,
        total_reviews: candidate.review_count,
        google_maps_url,
        resolution_status: ResolutionStatus::Found,
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
