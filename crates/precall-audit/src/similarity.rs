//! Token-set string similarity.
//!
//! The primitive behind both resolution scoring and the visibility check.
//! Lowercase, tokenize on whitespace, treat tokens as sets, and compare the
//! sorted intersection/union renderings with an indel-based ratio. Robust to
//! word reordering and duplicated words; only the 80/90 thresholds and
//! relative ordering are relied on downstream, not exact parity with any
//! particular fuzzy-matching library.

use std::collections::BTreeSet;

/// Similarity of two strings in `[0, 100]` ignoring token order and
/// duplication.
///
/// Builds three strings — the sorted token intersection, and the
/// intersection followed by each side's sorted remainder — and returns the
/// best pairwise [`ratio`]. Identical token sets score 100.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 100;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // BTreeSet iteration is already sorted, so the joined strings are
    // deterministic regardless of input order.
    let base = intersection.join(" ");
    let combined_a = join_parts(&base, &only_a);
    let combined_b = join_parts(&base, &only_b);

    ratio(&base, &combined_a)
        .max(ratio(&base, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Indel-based similarity of two strings in `[0, 100]`.
///
/// `100 * (1 - indel_distance / (len_a + len_b))`, where the indel distance
/// is edit distance with insertions and deletions only. Equivalent to
/// `100 * 2 * LCS / (len_a + len_b)`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u32 {
    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();
    let total = chars_a.len() + chars_b.len();
    if total == 0 {
        return 100;
    }
    let lcs = lcs_length(&chars_a, &chars_b);
    // Round to nearest rather than truncating so near-identical strings
    // don't drop below threshold by a fraction.
    let scaled = 200 * lcs + total / 2;
    u32::try_from(scaled / total).unwrap_or(0)
}

fn join_parts(base: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        return base.to_owned();
    }
    if base.is_empty() {
        return rest.join(" ");
    }
    format!("{base} {}", rest.join(" "))
}

/// Longest common subsequence length, rolling single-row DP.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0_usize; b.len() + 1];
    for &ca in a {
        let mut prev_diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag + 1
            } else {
                up.max(row[j])
            };
            prev_diag = up;
        }
    }
    row[b.len()]
}
