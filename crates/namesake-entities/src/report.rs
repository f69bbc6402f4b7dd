//! Caller-facing result records

use std::collections::BTreeMap;

use serde::Serialize;

/// Detailed outcome of comparing two strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub is_match: bool,
    pub match_reasons: Vec<String>,
    /// Similarity per algorithm identifier
    pub scores: BTreeMap<String, f64>,
    pub phonetic: PhoneticSummary,
    pub processed: ProcessedPair,
}

/// Phonetic codes of both inputs and whether they agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneticSummary {
    pub soundex_s1: String,
    pub soundex_s2: String,
    pub soundex_match: bool,
    pub metaphone_s1: String,
    pub metaphone_s2: String,
    pub metaphone_match: bool,
}

/// The normalized form of both inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedPair {
    pub s1: String,
    pub s2: String,
}

/// One hit from matching a query against a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMatch {
    pub original_query: String,
    pub matched_candidate_original: String,
    pub matched_candidate_processed: String,
    pub score: f64,
    /// Algorithm identifier, or `exact_match` / `exact_processed_match`
    pub algorithm_used: String,
}

/// `algorithm_used` for a candidate equal to the query as typed.
pub const EXACT_MATCH: &str = "exact_match";

/// `algorithm_used` for a candidate equal to the query after normalization.
pub const EXACT_PROCESSED_MATCH: &str = "exact_processed_match";
