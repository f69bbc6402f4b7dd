//! Candidate resolution
//!
//! Ranks a list of candidate names against a query with one similarity
//! algorithm. Exact matches, raw or normalized, short-circuit the ranking.

use serde::Serialize;

use crate::config::ResolverConfig;
use crate::name::{NormalizedName, RawName};
use crate::normalize::Normalizer;
use crate::similarity::Algorithm;

/// A candidate name with its score against the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub normalized: NormalizedName,
    pub raw: RawName,
    pub score: f64,
}

impl Candidate {
    fn new(normalized: NormalizedName, score: f64) -> Self {
        Self {
            raw: normalized.original.clone(),
            normalized,
            score,
        }
    }
}

/// Finds the best matching candidates for a query name.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    pub normalizer: Normalizer,
    pub algorithm: Algorithm,
    pub threshold: f64,
    pub limit: usize,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl EntityResolver {
    pub fn new(algorithm: Algorithm, threshold: f64, limit: usize) -> Self {
        Self {
            normalizer: Normalizer::new(),
            algorithm,
            threshold,
            limit,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.algorithm(), config.threshold, config.limit)
    }

    /// Candidates ordered by descending score, ties in input order.
    ///
    /// Returns every exact match with score `1.0` when there is at least one;
    /// otherwise the ranked candidates at or above the threshold, truncated
    /// to the limit. An unmatchable query (empty after normalization) yields
    /// nothing.
    pub fn resolve(&self, query: &RawName, candidates: &[RawName]) -> Vec<Candidate> {
        let query = self.normalizer.normalize_name(query);
        if query.is_empty() {
            return Vec::new();
        }

        let normalized: Vec<NormalizedName> = candidates
            .iter()
            .map(|candidate| self.normalizer.normalize_name(candidate))
            .filter(|candidate| !candidate.is_empty())
            .collect();

        let exact: Vec<Candidate> = normalized
            .iter()
            .filter(|c| c.original == query.original || c.value == query.value)
            .map(|c| Candidate::new(c.clone(), 1.0))
            .collect();
        if !exact.is_empty() {
            tracing::debug!(
                query = %query.original,
                matches = exact.len(),
                "exact match short-circuit"
            );
            return exact;
        }

        let mut ranked: Vec<Candidate> = normalized
            .into_iter()
            .map(|c| {
                let score = self.algorithm.similarity(query.as_str(), c.as_str());
                Candidate::new(c, score)
            })
            .filter(|c| c.score >= self.threshold)
            .collect();
        // Stable: equal scores keep candidate order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.limit);

        tracing::debug!(
            query = %query.original,
            algorithm = %self.algorithm,
            matches = ranked.len(),
            "ranked candidates"
        );
        ranked
    }
}
