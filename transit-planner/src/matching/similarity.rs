//! Edit-distance based string similarity.

/// Levenshtein edit distance between two strings, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Normalized similarity in `[0, 1]`: `1 - distance / longer length`.
///
/// Zero when either string is empty.
///
/// ```
/// use transit_planner::matching::similarity;
///
/// assert_eq!(similarity("klcc", "klcc"), 1.0);
/// assert_eq!(similarity("", "klcc"), 0.0);
/// assert_eq!(similarity("klcc", "klc"), 0.75);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b)
}
