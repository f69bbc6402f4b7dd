//! Edit-distance and Jaro-Winkler similarity

use strsim::{damerau_levenshtein, jaro_winkler, levenshtein};

/// `1 - distance / max_len`, counting Unicode scalar values.
fn normalize_distance(distance: usize, a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / max_len as f64
}

/// Levenshtein similarity (unit-cost insert, delete, substitute).
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    normalize_distance(levenshtein(a, b), a, b)
}

/// Damerau-Levenshtein similarity; adjacent transpositions cost one edit.
pub fn damerau_levenshtein_similarity(a: &str, b: &str) -> f64 {
    normalize_distance(damerau_levenshtein(a, b), a, b)
}

/// Jaro-Winkler similarity (prefix up to 4, scaling factor 0.1).
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    // Greedy match flagging depends on argument order; fix it so sim(a, b) == sim(b, a).
    if a <= b {
        jaro_winkler(a, b)
    } else {
        jaro_winkler(b, a)
    }
}
