//! Token and substring ratios
//!
//! Percentages are computed from the Indel distance (insertions and deletions
//! only), so `ratio(a, b) = 2 * LCS(a, b) / (|a| + |b|)`. Each public function
//! rounds its percentage half-to-even to a whole number before scaling it back
//! to `[0.0, 1.0]`, which keeps scores stable across platforms.

use std::collections::{BTreeSet, HashSet};

use crate::normalize::COMPANY_SUFFIXES;

/// Scores at or above this skip the company-suffix boost.
const TOKEN_SET_BOOST_CEILING: f64 = 0.95;
/// Minimum name-token overlap for the company-suffix boost.
const NAME_TOKEN_OVERLAP: f64 = 0.8;
const UNBASE_SCALE: f64 = 0.95;

/// Full-string ratio.
pub fn ratio(a: &str, b: &str) -> f64 {
    to_unit(ratio_pct(&chars(a), &chars(b)))
}

/// Best ratio of the shorter string against any alignment in the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    to_unit(partial_ratio_pct(&chars(a), &chars(b)))
}

/// Ratio of the alphabetically sorted tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    match processed_pair(a, b) {
        Some((a, b)) => to_unit(token_sort_pct(&a, &b)),
        None => 0.0,
    }
}

/// Set-based token ratio: compares the shared tokens against each side's
/// leftovers and keeps the best of the three comparisons.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    match processed_pair(a, b) {
        Some((a, b)) => to_unit(token_set_pct(&a, &b)),
        None => 0.0,
    }
}

/// Composite ratio that weighs full, token and partial comparisons by how
/// different the two lengths are.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    match processed_pair(a, b) {
        Some((a, b)) => to_unit(weighted_ratio_pct(&a, &b)),
        None => 0.0,
    }
}

/// Token set ratio with a boost for names that differ only in their
/// company suffix ("Acme Inc" vs "Acme Corp").
///
/// The boost never lowers the base score.
pub fn company_token_set_similarity(a: &str, b: &str) -> f64 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    if lower_a == lower_b {
        return 1.0;
    }

    let base = token_set_ratio(a, b);
    if base >= TOKEN_SET_BOOST_CEILING {
        return base;
    }

    let tokens_a: HashSet<&str> = lower_a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = lower_b.split_whitespace().collect();
    let is_suffix = |token: &&str| COMPANY_SUFFIXES.contains(token);
    if !tokens_a.iter().chain(tokens_b.iter()).any(is_suffix) {
        return base;
    }

    let names_a: HashSet<&str> = tokens_a.iter().copied().filter(|t| !is_suffix(t)).collect();
    let names_b: HashSet<&str> = tokens_b.iter().copied().filter(|t| !is_suffix(t)).collect();
    if names_a.is_empty() || names_b.is_empty() {
        return base;
    }

    let shared = names_a.intersection(&names_b).count();
    let name_similarity = shared as f64 / names_a.len().max(names_b.len()) as f64;
    if name_similarity > NAME_TOKEN_OVERLAP {
        let boosted = (base * 0.3 + name_similarity * 0.7).min(1.0);
        return base.max(boosted);
    }
    base
}

fn to_unit(pct: f64) -> f64 {
    pct.round_ties_even() / 100.0
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Drop non-ASCII characters, turn everything that is not alphanumeric
/// into a space, lowercase, trim.
fn full_process(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// Both strings fully processed; `None` when either side ends up empty.
fn processed_pair(a: &str, b: &str) -> Option<(String, String)> {
    let a = full_process(a);
    let b = full_process(b);
    if a.is_empty() || b.is_empty() {
        None
    } else {
        Some((a, b))
    }
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

/// `100 - 100 * dist / lensum`, or 100 when there is nothing to compare.
fn norm_distance_pct(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        100.0
    } else {
        100.0 - 100.0 * dist as f64 / lensum as f64
    }
}

fn ratio_pct(a: &[char], b: &[char]) -> f64 {
    norm_distance_pct(indel_distance(a, b), a.len() + b.len())
}

fn partial_ratio_pct(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut best = best_alignment_pct(shorter, longer);
    if best < 100.0 && a.len() == b.len() {
        best = best.max(best_alignment_pct(longer, shorter));
    }
    best
}

/// Slide `needle` across `haystack`, including the windows that hang over
/// either edge. Windows whose boundary character never occurs in the needle
/// cannot improve the score and are skipped.
fn best_alignment_pct(needle: &[char], haystack: &[char]) -> f64 {
    let len1 = needle.len();
    let len2 = haystack.len();
    let needle_chars: HashSet<char> = needle.iter().copied().collect();
    let mut best = 0.0_f64;

    for i in 1..len1 {
        if !needle_chars.contains(&haystack[i - 1]) {
            continue;
        }
        let score = ratio_pct(needle, &haystack[..i]);
        if score > best {
            best = score;
            if best == 100.0 {
                return best;
            }
        }
    }

    for i in 0..len2.saturating_sub(len1) {
        if !needle_chars.contains(&haystack[i + len1 - 1]) {
            continue;
        }
        let score = ratio_pct(needle, &haystack[i..i + len1]);
        if score > best {
            best = score;
            if best == 100.0 {
                return best;
            }
        }
    }

    for i in len2.saturating_sub(len1)..len2 {
        if !needle_chars.contains(&haystack[i]) {
            continue;
        }
        let score = ratio_pct(needle, &haystack[i..]);
        if score > best {
            best = score;
            if best == 100.0 {
                return best;
            }
        }
    }

    best
}

fn sorted_join<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.into_iter().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_pct(a: &str, b: &str) -> f64 {
    let sorted_a = sorted_join(a.split_whitespace());
    let sorted_b = sorted_join(b.split_whitespace());
    ratio_pct(&chars(&sorted_a), &chars(&sorted_b))
}

fn token_set_pct(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side's tokens are contained in the other's.
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined = chars(&diff_ab.join(" "));
    let diff_ba_joined = chars(&diff_ba.join(" "));
    let ab_len = diff_ab_joined.len();
    let ba_len = diff_ba_joined.len();
    let sect_len = intersection.join(" ").chars().count();
    let separator = usize::from(sect_len != 0);

    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let diff_score = norm_distance_pct(
        indel_distance(&diff_ab_joined, &diff_ba_joined),
        sect_ab_len + sect_ba_len,
    );
    if sect_len == 0 {
        return diff_score;
    }

    // "sect" vs "sect + diff" only differs by the appended diff tokens.
    let sect_ab_score = norm_distance_pct(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_score = norm_distance_pct(separator + ba_len, sect_len + sect_ba_len);

    diff_score.max(sect_ab_score).max(sect_ba_score)
}

fn token_ratio_pct(a: &str, b: &str) -> f64 {
    token_set_pct(a, b).max(token_sort_pct(a, b))
}

fn partial_token_ratio_pct(a: &str, b: &str) -> f64 {
    let split_a: Vec<&str> = a.split_whitespace().collect();
    let split_b: Vec<&str> = b.split_whitespace().collect();
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();

    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let result = partial_ratio_pct(
        &chars(&sorted_join(split_a.iter().copied())),
        &chars(&sorted_join(split_b.iter().copied())),
    );
    if split_a.len() == diff_ab.len() && split_b.len() == diff_ba.len() {
        return result;
    }

    result.max(partial_ratio_pct(
        &chars(&diff_ab.join(" ")),
        &chars(&diff_ba.join(" ")),
    ))
}

fn weighted_ratio_pct(a: &str, b: &str) -> f64 {
    let chars_a = chars(a);
    let chars_b = chars(b);
    let (len_a, len_b) = (chars_a.len() as f64, chars_b.len() as f64);
    let len_ratio = if len_a > len_b { len_a / len_b } else { len_b / len_a };

    let mut end_ratio = ratio_pct(&chars_a, &chars_b);
    if len_ratio < 1.5 {
        return end_ratio.max(token_ratio_pct(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio <= 8.0 { 0.9 } else { 0.6 };
    end_ratio = end_ratio.max(partial_ratio_pct(&chars_a, &chars_b) * partial_scale);
    end_ratio.max(partial_token_ratio_pct(a, b) * UNBASE_SCALE * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_len() {
        assert_eq!(lcs_len(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_len(&chars("abc"), &chars("")), 0);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("this is a test", "this is a test"), 1.0);
        // LCS("abcd", "abce") = 3 -> 6 / 8
        assert_eq!(ratio("abcd", "abce"), 0.75);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_full_process() {
        assert_eq!(full_process("  Hello, World!  "), "hello  world");
        assert_eq!(full_process("snake_case"), "snake case");
        assert_eq!(full_process("!!!"), "");
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(
            partial_ratio("The quick brown fox jumps over the lazy dog", "brown fox"),
            1.0
        );
        assert_eq!(partial_ratio("brown fox", "The quick brown fox"), 1.0);
    }

    #[test]
    fn test_partial_ratio_edge_window() {
        // "xab" only aligns with the left edge of "abcdef" ("ab")
        assert_eq!(partial_ratio("xab", "abcdef"), 0.8);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(
            token_sort_ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"),
            1.0
        );
    }

    #[test]
    fn test_token_set_subset_is_full_match() {
        assert_eq!(
            token_set_ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"),
            1.0
        );
        assert_eq!(token_set_ratio("apple", "apple inc"), 1.0);
    }

    #[test]
    fn test_token_set_disjoint_tokens() {
        // No shared tokens: plain ratio of the sorted leftovers
        // "abc" vs "abd" -> LCS 2 -> 4 / 6
        assert_eq!(token_set_ratio("abc", "abd"), 0.67);
    }

    #[test]
    fn test_company_token_set_boost() {
        let base = token_set_ratio("acme widgets inc", "acme widgets corp");
        let boosted = company_token_set_similarity("acme widgets inc", "acme widgets corp");
        assert!(boosted >= base);
        assert!(boosted >= 0.95, "got {boosted}");
    }

    #[test]
    fn test_company_token_set_case_insensitive_equality() {
        assert_eq!(company_token_set_similarity("ACME", "acme"), 1.0);
    }

    #[test]
    fn test_weighted_ratio_length_difference() {
        let score = weighted_ratio("The quick brown fox jumps over the lazy dog", "The brown fox");
        assert!((0.85..=0.86).contains(&score), "got {score}");
    }

    #[test]
    fn test_weighted_ratio_similar_lengths() {
        assert_eq!(weighted_ratio("new york mets", "new york mets"), 1.0);
        assert_eq!(weighted_ratio("new york mets", "mets new york"), 0.95);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(to_unit(85.5), 0.86);
        assert_eq!(to_unit(84.5), 0.84);
        assert_eq!(to_unit(66.666), 0.67);
    }
}
