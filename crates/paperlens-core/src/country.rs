//! Country list normalization
//!
//! The source spreadsheet stores affiliation countries as a comma-joined
//! string, sometimes with list punctuation left over from an earlier export:
//! ```text
//! ['China', 'United States', 'China']
//! ```
//!
//! Normalization turns that into an ordered list of distinct names,
//! in order of first occurrence.

use rustc_hash::FxHashSet;

/// Characters stripped from the start of a token (after whitespace trim).
const LEADING_JUNK: &[char] = &['\'', '"', '`', '[', '('];
/// Characters stripped from the end of a token (after whitespace trim).
const TRAILING_JUNK: &[char] = &['\'', '"', '`', ']', ')'];

/// Clean a single comma-separated token. Returns `None` for empty tokens.
pub fn clean_token(token: &str) -> Option<&str> {
    let cleaned = token
        .trim()
        .trim_start_matches(LEADING_JUNK)
        .trim_end_matches(TRAILING_JUNK)
        .trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Split, clean and deduplicate a raw country string.
///
/// Duplicates are detected by exact string equality; `"China"` and
/// `"china"` are distinct countries.
pub fn normalize_countries(raw: &str) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();
    for token in raw.split(',').filter_map(clean_token) {
        if seen.insert(token) {
            out.push(token.to_string());
        }
    }
    out
}
