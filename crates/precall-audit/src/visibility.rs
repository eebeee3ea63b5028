//! Local-pack visibility: does the resolved business appear in the top-three
//! competitor panel?

use precall_core::{CompetitorEntry, Visibility};

use crate::similarity::token_set_ratio;

/// A panel entry counts as the target business at or above this similarity.
const NAME_MATCH_THRESHOLD: u32 = 80;
/// Without an address to cross-check, the strict variant requires a closer
/// name match.
const STRICT_NAME_ONLY_THRESHOLD: u32 = 90;

/// Checks whether the business appears in the competitor panel.
///
/// An empty panel means no panel data was available at all, which is
/// reported as [`Visibility::Unavailable`] — distinct from "present but
/// absent from the top three". No address cross-check here; the provider's
/// nearby panel carries truncated vicinity strings that make address
/// comparison unreliable.
#[must_use]
pub fn check_panel(resolved_name: &str, panel: &[CompetitorEntry]) -> Visibility {
    if panel.is_empty() {
        return Visibility::Unavailable;
    }
    for entry in panel {
        let score = token_set_ratio(resolved_name, &entry.name);
        tracing::debug!(target = resolved_name, entry = %entry.name, score, "visibility name match");
        if score >= NAME_MATCH_THRESHOLD {
            return Visibility::InTopThree;
        }
    }
    Visibility::NotInTopThree
}

/// Stricter visibility check for the search-engine-derived panel.
///
/// That source mixes businesses from neighbouring localities under similar
/// trade names, so a name hit alone is not enough: with a known target
/// address the entry's address must contain (or be contained by) it; without
/// one, the name similarity bar rises to 90.
#[must_use]
pub fn check_panel_strict(
    resolved_name: &str,
    resolved_address: Option<&str>,
    panel: &[CompetitorEntry],
) -> Visibility {
    if panel.is_empty() {
        return Visibility::Unavailable;
    }
    for entry in panel {
        let score = token_set_ratio(resolved_name, &entry.name);
        if score < NAME_MATCH_THRESHOLD {
            continue;
        }
        match resolved_address {
            Some(target_addr) if !target_addr.is_empty() => {
                let target = target_addr.to_lowercase();
                let entry_addr = entry.address.as_deref().unwrap_or("").to_lowercase();
                if !entry_addr.is_empty()
                    && (entry_addr.contains(&target) || target.contains(&entry_addr))
                {
                    return Visibility::InTopThree;
                }
            }
            _ => {
                if score >= STRICT_NAME_ONLY_THRESHOLD {
                    return Visibility::InTopThree;
                }
            }
        }
    }
    Visibility::NotInTopThree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u8, name: &str, address: Option<&str>) -> CompetitorEntry {
        CompetitorEntry {
            rank,
            name: name.to_owned(),
            rating: Some(4.6),
            review_count: Some(300),
            address: address.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn empty_panel_is_unavailable() {
        assert_eq!(check_panel("ABC Pest Control", &[]), Visibility::Unavailable);
    }

    #[test]
    fn exact_name_in_panel_is_visible() {
        let panel = vec![
            entry(1, "Bug Busters", None),
            entry(2, "ABC Pest Control", None),
        ];
        assert_eq!(check_panel("ABC Pest Control", &panel), Visibility::InTopThree);
    }

    #[test]
    fn reordered_name_still_matches() {
        let panel = vec![entry(1, "Pest Control ABC", None)];
        assert_eq!(check_panel("ABC Pest Control", &panel), Visibility::InTopThree);
    }

    #[test]
    fn absent_business_is_not_visible() {
        let panel = vec![
            entry(1, "Bug Busters", None),
            entry(2, "Critter Gitters", None),
            entry(3, "Austin Termite Experts", None),
        ];
        assert_eq!(
            check_panel("ABC Pest Control", &panel),
            Visibility::NotInTopThree
        );
    }

    #[test]
    fn strict_requires_address_agreement_when_known() {
        let panel = vec![entry(1, "ABC Pest Control", Some("900 Elm St, Dallas, TX"))];
        assert_eq!(
            check_panel_strict(
                "ABC Pest Control",
                Some("101 Main St, Austin, TX"),
                &panel
            ),
            Visibility::NotInTopThree
        );
        assert_eq!(
            check_panel_strict(
                "ABC Pest Control",
                Some("900 Elm St, Dallas, TX"),
                &panel
            ),
            Visibility::InTopThree
        );
    }

    #[test]
    fn strict_without_address_needs_closer_name() {
        // 80-89 similarity passes the loose check but not the strict one
        // when no address is available for cross-checking.
        let panel = vec![entry(1, "ABC Pest Control", None)];
        assert_eq!(
            check_panel_strict("ABC Pest Control", None, &panel),
            Visibility::InTopThree
        );

        // "ABC Pest Co" scores in the 80s against "ABC Pest Control":
        // enough for the loose check, not for the strict name-only bar.
        let partial = vec![entry(1, "ABC Pest Co", None)];
        assert_eq!(
            check_panel("ABC Pest Control", &partial),
            Visibility::InTopThree
        );
        assert_eq!(
            check_panel_strict("ABC Pest Control", None, &partial),
            Visibility::NotInTopThree
        );
    }

    #[test]
    fn strict_empty_panel_is_unavailable() {
        assert_eq!(
            check_panel_strict("ABC Pest Control", None, &[]),
            Visibility::Unavailable
        );
    }
}
