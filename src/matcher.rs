//! Fuzzy artist-name matching.
//!
//! A local file tagged "The Beatles" should accept a remote result credited
//! to "Beatles", and "Tyler, The Creator" should accept "Tyler The Creator".
//! Exact equality is useless for this, so the matcher combines a
//! longest-common-subsequence similarity ratio with substring containment,
//! both computed on [`normalize`](crate::normalize::normalize)d strings.

use crate::normalize::normalize;

/// Similarity threshold above which two normalized names are considered
/// the same artist.
const SIMILARITY_THRESHOLD: f64 = 0.75;

/// Character-level similarity ratio between two strings, in `0.0..=1.0`.
///
/// Defined as `2 * lcs(a, b) / (a.len() + b.len())` where `lcs` is the
/// longest common subsequence length.  Two empty strings are identical
/// (ratio 1.0).  This tolerates insertions and reordering-by-omission far
/// better than an edit-distance ratio would.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    // Two-row LCS dynamic program.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let lcs = prev[b.len()];
    2.0 * lcs as f64 / (a.len() + b.len()) as f64
}

/// Decide whether any of the remote result's credited artists plausibly
/// matches the locally expected artist name.
///
/// An empty local artist imposes no constraint and always matches.
/// Otherwise both sides are normalized and a candidate matches when the
/// similarity ratio exceeds 0.75 or either normalized name contains the
/// other.  Pure; candidate order is irrelevant.
pub fn is_artist_match(local_artist: &str, candidate_names: &[String]) -> bool {
    if local_artist.is_empty() {
        return true;
    }

    let local = normalize(local_artist);
    for candidate in candidate_names {
        let remote = normalize(candidate);
        if similarity_ratio(&local, &remote) > SIMILARITY_THRESHOLD
            || remote.contains(&local)
            || local.contains(&remote)
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_similarity_ratio_bounds() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", "abc"), 1.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        // "abcd" vs "abed": lcs = 3, ratio = 6/8
        assert!((similarity_ratio("abcd", "abed") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_local_artist_always_matches() {
        assert!(is_artist_match("", &names(&["Anyone"])));
        assert!(is_artist_match("", &[]));
    }

    #[test]
    fn test_substring_match() {
        assert!(is_artist_match("The Beatles", &names(&["Beatles"])));
        assert!(is_artist_match("Beatles", &names(&["The Beatles"])));
    }

    #[test]
    fn test_fuzzy_match_tolerates_decoration() {
        assert!(is_artist_match("Tyler, The Creator", &names(&["Tyler The Creator"])));
        assert!(is_artist_match("Drake", &names(&["Drake (Ft. Future)"])));
    }

    #[test]
    fn test_rejects_dissimilar_names() {
        assert!(!is_artist_match("Abcde", &names(&["Xyz"])));
        assert!(!is_artist_match("Radiohead", &names(&["Taylor Swift", "Muse"])));
    }

    #[test]
    fn test_any_candidate_suffices() {
        assert!(is_artist_match("Muse", &names(&["Taylor Swift", "Muse"])));
    }
}
