//! String similarity algorithms
//!
//! A fixed set of algorithms, each mapping a pair of (normalized) strings to a
//! score in `[0.0, 1.0]`. Every algorithm is symmetric and shares the same
//! empty-string rule: two empty strings are identical (`1.0`), one empty
//! string never matches (`0.0`).

mod edit;
mod fuzz;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownAlgorithm;

pub use edit::{damerau_levenshtein_similarity, jaro_winkler_similarity, levenshtein_similarity};
pub use fuzz::{
    company_token_set_similarity, partial_ratio, ratio, token_set_ratio, token_sort_ratio,
    weighted_ratio,
};

/// Identifier used when an unknown algorithm name is requested.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::TokenSetRatio;

/// The named similarity algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Levenshtein,
    DamerauLevenshtein,
    JaroWinkler,
    TokenSetRatio,
    TokenSortRatio,
    PartialRatio,
    WeightedRatio,
}

impl Algorithm {
    /// Every algorithm, in registry order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Levenshtein,
        Algorithm::DamerauLevenshtein,
        Algorithm::JaroWinkler,
        Algorithm::TokenSetRatio,
        Algorithm::TokenSortRatio,
        Algorithm::PartialRatio,
        Algorithm::WeightedRatio,
    ];

    /// Stable string identifier.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Levenshtein => "levenshtein",
            Algorithm::DamerauLevenshtein => "damerau_levenshtein",
            Algorithm::JaroWinkler => "jaro_winkler",
            Algorithm::TokenSetRatio => "token_set_ratio",
            Algorithm::TokenSortRatio => "token_sort_ratio",
            Algorithm::PartialRatio => "partial_ratio",
            Algorithm::WeightedRatio => "weighted_ratio",
        }
    }

    /// Look up an algorithm by name, falling back to [`DEFAULT_ALGORITHM`]
    /// with a warning when the name is unknown.
    pub fn resolve_or_default(name: &str) -> Algorithm {
        match name.parse() {
            Ok(algorithm) => algorithm,
            Err(err) => {
                tracing::warn!(
                    "{}, defaulting to '{}'",
                    err,
                    DEFAULT_ALGORITHM.name()
                );
                DEFAULT_ALGORITHM
            }
        }
    }

    /// Similarity of two strings in `[0.0, 1.0]`.
    pub fn similarity(self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_pair_score(a, b) {
            return score;
        }
        if a == b {
            return 1.0;
        }
        match self {
            Algorithm::Levenshtein => levenshtein_similarity(a, b),
            Algorithm::DamerauLevenshtein => damerau_levenshtein_similarity(a, b),
            Algorithm::JaroWinkler => jaro_winkler_similarity(a, b),
            Algorithm::TokenSetRatio => company_token_set_similarity(a, b),
            Algorithm::TokenSortRatio => token_sort_ratio(a, b),
            Algorithm::PartialRatio => partial_ratio(a, b),
            Algorithm::WeightedRatio => weighted_ratio(a, b),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// The shared empty-string rule; `None` when both strings are non-empty.
pub(crate) fn empty_pair_score(a: &str, b: &str) -> Option<f64> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Some(1.0),
        (true, false) | (false, true) => Some(0.0),
        (false, false) => None,
    }
}
