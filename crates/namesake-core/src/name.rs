//! Name value types shared by the scorer, decision strategy and resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The original, unmodified input name.
///
/// Two raw names are equal only when their strings are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawName(String);

impl RawName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RawName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RawName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A raw name paired with its canonical comparison key.
///
/// Only [`crate::Normalizer`] produces these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedName {
    pub original: RawName,
    pub value: String,
}

impl NormalizedName {
    pub(crate) fn new(original: RawName, value: String) -> Self {
        Self { original, value }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Anything the normalizer accepts: text, numbers, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NameInput<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Null,
}

impl NameInput<'_> {
    /// Canonical textual form, `None` for null input.
    pub fn to_text(&self) -> Option<String> {
        match self {
            NameInput::Text(s) => Some((*s).to_string()),
            NameInput::Integer(n) => Some(n.to_string()),
            NameInput::Float(x) => Some(float_text(*x)),
            NameInput::Null => None,
        }
    }
}

/// Render a float the way it is written as a decimal literal (`1.0`, `12.34`).
fn float_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        x.to_string()
    }
}

impl<'a> From<&'a str> for NameInput<'a> {
    fn from(value: &'a str) -> Self {
        NameInput::Text(value)
    }
}

impl<'a> From<&'a String> for NameInput<'a> {
    fn from(value: &'a String) -> Self {
        NameInput::Text(value.as_str())
    }
}

impl<'a> From<&'a RawName> for NameInput<'a> {
    fn from(value: &'a RawName) -> Self {
        NameInput::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for NameInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(NameInput::Null, NameInput::Text)
    }
}

impl From<i64> for NameInput<'_> {
    fn from(value: i64) -> Self {
        NameInput::Integer(value)
    }
}

impl From<i32> for NameInput<'_> {
    fn from(value: i32) -> Self {
        NameInput::Integer(i64::from(value))
    }
}

impl From<u32> for NameInput<'_> {
    fn from(value: u32) -> Self {
        NameInput::Integer(i64::from(value))
    }
}

impl From<f64> for NameInput<'_> {
    fn from(value: f64) -> Self {
        NameInput::Float(value)
    }
}
