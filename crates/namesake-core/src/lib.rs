//! namesake-core - Fuzzy entity-name matching
//!
//! This crate turns two free-text names into an explainable match verdict,
//! and ranks candidate names against a query:
//!
//! - **Normalizer**: accent removal, lowercasing, company-suffix standardization, punctuation and whitespace cleanup
//! - **Similarity**: Levenshtein, Damerau-Levenshtein, Jaro-Winkler and the fuzzy ratio family
//! - **Phonetic**: Soundex and Metaphone codes
//! - **Scorer**: every algorithm and encoder over one pair, as a score bundle
//! - **Decision**: ordered threshold rules producing a verdict with reasons
//! - **Resolver**: top-N candidate ranking with an exact-match short-circuit
//!
//! # Pipeline
//!
//! ```text
//! raw names -> Normalizer -> Similarity + Phonetic -> MatchScorer -> MatchDecisionStrategy
//!                        \-> EntityResolver (one algorithm, threshold, limit)
//! ```
//!
//! Everything here is synchronous and free of shared mutable state, so one
//! scorer, strategy or resolver can be used from many threads at once.

pub mod config;
pub mod decision;
pub mod error;
pub mod name;
pub mod normalize;
pub mod phonetic;
pub mod resolver;
pub mod scorer;
pub mod similarity;

pub use config::{DecisionConfig, MatchConfig, ResolverConfig};
pub use decision::{DecisionThresholds, MatchDecisionStrategy, MatchVerdict};
pub use error::{ConfigError, Result, UnknownAlgorithm, UnknownEncoder};
pub use name::{NameInput, NormalizedName, RawName};
pub use normalize::{normalize, Normalizer, COMPANY_SUFFIXES};
pub use phonetic::{metaphone, soundex, Encoder, Side};
pub use resolver::{Candidate, EntityResolver};
pub use scorer::{MatchScorer, ScoreBundle, ScoreValue};
pub use similarity::{Algorithm, DEFAULT_ALGORITHM};
