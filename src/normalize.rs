//! Text normalization for search queries and artist-name comparison.
//!
//! Remote metadata is full of decoration — "(Remastered 2011)", "[Live]",
//! "feat. Somebody" — that has no bearing on whether two names refer to the
//! same artist.  Everything here reduces a string to its bare
//! lowercase-alphanumeric form before any comparison happens.

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)|\[.*?\]").unwrap());
static FEAT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(feat\.?|ft\.?|featuring)\b").unwrap());
static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 ]").unwrap());
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a piece of track/artist text for comparison.
///
/// Lowercases, removes all parenthesized and bracketed substrings
/// (non-greedy), removes standalone "feat"/"ft"/"featuring" tokens, strips
/// everything outside `[a-z0-9 ]`, collapses whitespace runs and trims.
///
/// Empty input yields an empty string; never fails.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = text.to_lowercase();
    let text = BRACKETED.replace_all(&text, "");
    let text = FEAT_MARKER.replace_all(&text, "");
    let text = NON_ALNUM.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
