//! Match scoring
//!
//! Runs every configured similarity algorithm and phonetic encoder over one
//! pair of names and collects the results into a [`ScoreBundle`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::name::{NormalizedName, RawName};
use crate::normalize::Normalizer;
use crate::phonetic::{Encoder, Side};
use crate::similarity::{empty_pair_score, Algorithm};

/// One entry of a score bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    /// Similarity in `[0.0, 1.0]`
    Score(f64),
    /// Phonetic code
    Code(String),
}

/// Every score and phonetic code computed for one pair of names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub first: RawName,
    pub second: RawName,
    pub normalized_first: NormalizedName,
    pub normalized_second: NormalizedName,
    scores: BTreeMap<String, ScoreValue>,
}

impl ScoreBundle {
    pub fn get(&self, key: &str) -> Option<&ScoreValue> {
        self.scores.get(key)
    }

    /// Numeric score for `key`, `0.0` when missing or not numeric.
    pub fn score(&self, key: &str) -> f64 {
        match self.scores.get(key) {
            Some(ScoreValue::Score(score)) => *score,
            _ => 0.0,
        }
    }

    /// Phonetic code for `key`, `""` when missing or not a code.
    pub fn code(&self, key: &str) -> &str {
        match self.scores.get(key) {
            Some(ScoreValue::Code(code)) => code,
            _ => "",
        }
    }

    /// Score of a specific algorithm.
    pub fn algorithm_score(&self, algorithm: Algorithm) -> f64 {
        self.score(algorithm.name())
    }

    /// The codes of both names under `encoder`.
    pub fn phonetic_codes(&self, encoder: Encoder) -> (&str, &str) {
        (
            self.code(&encoder.side_key(Side::First)),
            self.code(&encoder.side_key(Side::Second)),
        )
    }

    /// The shared code under `encoder`, if both names encode to the same
    /// non-empty code.
    pub fn phonetic_match(&self, encoder: Encoder) -> Option<&str> {
        let (first, second) = self.phonetic_codes(encoder);
        (!first.is_empty() && first == second).then_some(first)
    }

    /// Numeric entries keyed by algorithm identifier.
    pub fn numeric_scores(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().filter_map(|(key, value)| match value {
            ScoreValue::Score(score) => Some((key.as_str(), *score)),
            ScoreValue::Code(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Computes score bundles with a fixed algorithm and encoder set.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    pub normalizer: Normalizer,
    pub algorithms: Vec<Algorithm>,
    pub encoders: Vec<Encoder>,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::new(),
            algorithms: Algorithm::ALL.to_vec(),
            encoders: Encoder::ALL.to_vec(),
        }
    }
}

impl MatchScorer {
    pub fn new(algorithms: Vec<Algorithm>, encoders: Vec<Encoder>) -> Self {
        Self {
            normalizer: Normalizer::new(),
            algorithms,
            encoders,
        }
    }

    pub fn calculate_scores(&self, first: &RawName, second: &RawName) -> ScoreBundle {
        let normalized_first = self.normalizer.normalize_name(first);
        let normalized_second = self.normalizer.normalize_name(second);
        let (a, b) = (normalized_first.as_str(), normalized_second.as_str());

        let mut scores = BTreeMap::new();
        for algorithm in &self.algorithms {
            let score = empty_pair_score(a, b).unwrap_or_else(|| algorithm.similarity(a, b));
            scores.insert(algorithm.name().to_string(), ScoreValue::Score(score));
        }
        for encoder in &self.encoders {
            scores.insert(
                encoder.side_key(Side::First),
                ScoreValue::Code(encode_or_empty(*encoder, a)),
            );
            scores.insert(
                encoder.side_key(Side::Second),
                ScoreValue::Code(encode_or_empty(*encoder, b)),
            );
        }

        ScoreBundle {
            first: first.clone(),
            second: second.clone(),
            normalized_first,
            normalized_second,
            scores,
        }
    }
}

fn encode_or_empty(encoder: Encoder, text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        encoder.encode(text)
    }
}
