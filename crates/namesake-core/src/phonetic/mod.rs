//! Phonetic encoders
//!
//! These map a name to a short code describing how it sounds, so spelling
//! variants of the same pronunciation ("Smith", "Smyth") share a code.
//!
//! # Encoders
//! - **Soundex**: first letter + 3 digits
//! - **Metaphone**: variable-length consonant skeleton

mod metaphone;
mod soundex;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownEncoder;

pub use metaphone::metaphone;
pub use soundex::soundex;

/// The named phonetic encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoder {
    Soundex,
    Metaphone,
}

impl Encoder {
    /// Every encoder, in registry order.
    pub const ALL: [Encoder; 2] = [Encoder::Soundex, Encoder::Metaphone];

    pub fn name(self) -> &'static str {
        match self {
            Encoder::Soundex => "soundex",
            Encoder::Metaphone => "metaphone",
        }
    }

    /// Phonetic code for `text`; empty input yields an empty code.
    pub fn encode(self, text: &str) -> String {
        match self {
            Encoder::Soundex => soundex(text),
            Encoder::Metaphone => metaphone(text),
        }
    }

    /// Score-bundle key for the code of the first or second input.
    pub fn side_key(self, side: Side) -> String {
        format!("{}_{}", self.name(), side.suffix())
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoder {
    type Err = UnknownEncoder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoder::ALL
            .into_iter()
            .find(|encoder| encoder.name() == s)
            .ok_or_else(|| UnknownEncoder(s.to_string()))
    }
}

/// Which input of a compared pair a phonetic code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::First => "s1",
            Side::Second => "s2",
        }
    }
}
