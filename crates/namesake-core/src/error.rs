//! Error types for namesake-core

use thiserror::Error;

/// Result type alias for fallible namesake-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A similarity algorithm identifier that is not part of the fixed set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown similarity algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

/// A phonetic encoder identifier that is not part of the fixed set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown phonetic encoder: {0}")]
pub struct UnknownEncoder(pub String);

/// Errors raised while loading a [`crate::MatchConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or has mistyped fields
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
