//! Configuration for namesake-core
//!
//! Decision thresholds and resolver parameters. Every section has defaults,
//! so a TOML document only needs the keys it overrides. Values are not range
//! checked: a negative threshold matches everything, a zero limit returns
//! nothing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::similarity::Algorithm;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pairwise decision thresholds
    pub decision: DecisionConfig,
    /// List resolution parameters
    pub resolver: ResolverConfig,
}

/// Thresholds for the pairwise decision rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// token_set_ratio half of the combined rule
    pub token_set_threshold: f64,
    /// jaro_winkler half of the combined rule
    pub jaro_winkler_threshold: f64,
    pub weighted_ratio_threshold: f64,
    pub high_token_set_threshold: f64,
    pub high_jaro_winkler_threshold: f64,
    /// Whether equal Soundex codes alone make a match
    pub phonetic_match_contributes: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            token_set_threshold: 0.90,
            jaro_winkler_threshold: 0.90,
            weighted_ratio_threshold: 0.90,
            high_token_set_threshold: 0.98,
            high_jaro_winkler_threshold: 0.98,
            phonetic_match_contributes: false,
        }
    }
}

/// Parameters for ranking candidates against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Algorithm identifier; unknown names fall back to token_set_ratio
    pub algorithm: String,
    /// Minimum score for list matches
    pub threshold: f64,
    /// Maximum number of list matches
    pub limit: usize,
    /// Minimum score for resolving a name to a stored entity
    pub resolution_threshold: f64,
    /// Maximum number of candidate names fetched from storage
    pub candidate_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::TokenSetRatio.name().to_string(),
            threshold: 0.7,
            limit: 5,
            resolution_threshold: 0.85,
            candidate_limit: 20,
        }
    }
}

impl ResolverConfig {
    /// The configured algorithm, warning and falling back when unknown.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::resolve_or_default(&self.algorithm)
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.decision.token_set_threshold, 0.90);
        assert_eq!(config.decision.high_jaro_winkler_threshold, 0.98);
        assert!(!config.decision.phonetic_match_contributes);
        assert_eq!(config.resolver.algorithm(), Algorithm::TokenSetRatio);
        assert_eq!(config.resolver.limit, 5);
        assert_eq!(config.resolver.candidate_limit, 20);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = MatchConfig::from_toml_str(
            r#"
            [decision]
            phonetic_match_contributes = true
            weighted_ratio_threshold = 0.8

            [resolver]
            algorithm = "weighted_ratio"
            "#,
        )
        .unwrap();

        assert!(config.decision.phonetic_match_contributes);
        assert_eq!(config.decision.weighted_ratio_threshold, 0.8);
        assert_eq!(config.decision.token_set_threshold, 0.90);
        assert_eq!(config.resolver.algorithm(), Algorithm::WeightedRatio);
        assert_eq!(config.resolver.threshold, 0.7);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(MatchConfig::from_toml_str("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn test_out_of_range_values_are_accepted() {
        let config = MatchConfig::from_toml_str("[resolver]\nthreshold = -1.0\nlimit = 0").unwrap();
        assert_eq!(config.resolver.threshold, -1.0);
        assert_eq!(config.resolver.limit, 0);
    }

    #[test]
    fn test_unknown_algorithm_falls_back() {
        let config = MatchConfig::from_toml_str("[resolver]\nalgorithm = \"nope\"").unwrap();
        assert_eq!(config.resolver.algorithm(), Algorithm::TokenSetRatio);
    }

    #[test]
    fn test_type_error_is_parse_error() {
        let err = MatchConfig::from_toml_str("[resolver]\nlimit = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = MatchConfig::default();
        config.resolver.limit = 3;
        let text = config.to_toml().unwrap();
        assert_eq!(MatchConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decision]\ntoken_set_threshold = 0.75").unwrap();

        let config = MatchConfig::load(file.path()).unwrap();
        assert_eq!(config.decision.token_set_threshold, 0.75);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MatchConfig::load("/nonexistent/namesake.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
