//! Transit-intent detection and keyword stripping.

use std::sync::LazyLock;

use regex::Regex;

/// Substrings that mark a query as naming a transit station.
pub const TRANSIT_KEYWORDS: [&str; 10] = [
    "lrt", "mrt", "brt", "monorail", "komuter", "ktm", "rapid", "station", "stesen", "stn",
];

/// Whole words removed before comparing a query against station names.
///
/// `ktm` signals intent but is kept, since it is part of several station names.
pub const STRIPPED_KEYWORDS: [&str; 9] = [
    "station", "stesen", "stn", "lrt", "mrt", "brt", "monorail", "komuter", "rapid",
];

/// Whether the (already lowercased) query contains any transit keyword.
///
/// This is a plain substring test, so `"stationery"` counts.
pub fn has_transit_intent(query: &str) -> bool {
    TRANSIT_KEYWORDS.iter().any(|k| query.contains(k))
}

static STRIPPED_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\b(?:{})\b", STRIPPED_KEYWORDS.join("|"));
    Regex::new(&pattern).expect("keyword pattern is valid")
});

/// Removes whole-word occurrences of [`STRIPPED_KEYWORDS`] and collapses
/// whitespace.
///
/// Punctuation around a removed word is kept. The query is expected to be
/// lowercased already.
///
/// ```
/// use transit_planner::matching::strip_keywords;
///
/// assert_eq!(strip_keywords("lrt klcc"), "klcc");
/// assert_eq!(strip_keywords("masjid jamek  lrt station"), "masjid jamek");
/// assert_eq!(strip_keywords("stationery"), "stationery");
/// ```
pub fn strip_keywords(query: &str) -> String {
    STRIPPED_WORDS
        .replace_all(query, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
