//! Text normalization for name comparison
//!
//! Every name passes through the same fixed pipeline before it is scored,
//! indexed or looked up:
//!
//! 1. Type coercion (null and blank input short-circuit to `""`)
//! 2. Accent removal (ASCII transliteration)
//! 3. Lowercasing
//! 4. Company-suffix standardization ("Corporation" -> "corp", ...)
//! 5. Punctuation removal
//! 6. Whitespace collapsing

use deunicode::deunicode_with_tofu;
use lazy_static::lazy_static;
use regex::Regex;

use crate::name::{NameInput, NormalizedName, RawName};

lazy_static! {
    /// Whole-word suffix substitutions. Applied in order; later patterns see
    /// the output of earlier ones.
    static ref SUFFIX_PATTERNS: Vec<(Regex, &'static str)> = [
        // Corporation
        (r"\bcorporation\b", "corp"),
        (r"\bcorp\b", "corp"),
        (r"\bcorp\.\b", "corp"),
        // Incorporated
        (r"\bincorporated\b", "inc"),
        (r"\binc\b", "inc"),
        (r"\binc\.\b", "inc"),
        // Limited
        (r"\blimited\b", "ltd"),
        (r"\bltd\b", "ltd"),
        (r"\bltd\.\b", "ltd"),
        // Company
        (r"\bcompany\b", "co"),
        (r"\bco\b", "co"),
        (r"\bco\.\b", "co"),
        // Public limited company
        (r"\bpublic limited company\b", "plc"),
        (r"\bp\.l\.c\.\b", "plc"),
        (r"\bplc\b", "plc"),
        // Limited liability company
        (r"\blimited liability company\b", "llc"),
        (r"\bl\.l\.c\.\b", "llc"),
        (r"\bllc\b", "llc"),
        // Societe anonyme
        (r"\bsociete anonyme\b", "sa"),
        (r"\bs\.a\.\b", "sa"),
        (r"\bsa\b", "sa"),
        (r"\bsociété anonyme\b", "sa"),
        // Aktiengesellschaft
        (r"\baktiengesellschaft\b", "ag"),
        (r"\ba\.g\.\b", "ag"),
        (r"\bag\b", "ag"),
        // GmbH
        (r"\bgmbh\b", "gmbh"),
        (r"\bgmbh & co\. kg\b", "gmbh"),
        // Holdings
        (r"\bholdings?\b", "hldg"),
        (r"\bhldg\b", "hldg"),
        (r"\bhldg\.\b", "hldg"),
        // Group
        (r"\bgroup\b", "grp"),
        (r"\bgrp\b", "grp"),
        (r"\bgrp\.\b", "grp"),
    ]
    .iter()
    .map(|(pattern, replacement)| {
        (Regex::new(&format!("(?i){pattern}")).unwrap(), *replacement)
    })
    .collect();

    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonical company-suffix tokens produced by suffix standardization.
pub const COMPANY_SUFFIXES: [&str; 11] = [
    "inc", "corp", "llc", "ltd", "co", "plc", "sa", "ag", "gmbh", "hldg", "grp",
];

/// The name normalization pipeline. Stateless; all instances are equivalent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize any supported input to its canonical comparison key.
    pub fn normalize<'a>(&self, input: impl Into<NameInput<'a>>) -> String {
        match input.into().to_text() {
            Some(text) => normalize_text(&text),
            None => String::new(),
        }
    }

    /// Normalize a raw name, keeping the original alongside the key.
    pub fn normalize_name(&self, name: &RawName) -> NormalizedName {
        NormalizedName::new(name.clone(), normalize_text(name.as_str()))
    }
}

/// Normalize a string with the standard pipeline.
pub fn normalize(text: &str) -> String {
    normalize_text(text)
}

fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let folded = lowercase(&remove_accents(text));
    let mut current = collapse_whitespace(&remove_punctuation(&standardize_suffixes(&folded)));

    // Punctuation removal can join fragments into a suffix word ("limi.ted"),
    // so re-run the tail of the pipeline until the key is stable.
    loop {
        let next = collapse_whitespace(&remove_punctuation(&standardize_suffixes(&current)));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Transliterate to the closest ASCII equivalent; unmappable characters vanish.
pub(crate) fn remove_accents(text: &str) -> String {
    deunicode_with_tofu(text, "")
}

fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub(crate) fn standardize_suffixes(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in SUFFIX_PATTERNS.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }
    result
}

/// Drop `.` and `,` first, then anything that is not a word character or whitespace.
pub(crate) fn remove_punctuation(text: &str) -> String {
    let stripped = text.replace(['.', ','], "");
    NON_WORD.replace_all(&stripped, "").into_owned()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_accents() {
        assert_eq!(remove_accents("café"), "cafe");
        assert_eq!(remove_accents("résumé"), "resume");
        assert_eq!(remove_accents("naïve"), "naive");
        assert_eq!(remove_accents("Société Générale"), "Societe Generale");
        assert_eq!(remove_accents("façade"), "facade");
        assert_eq!(remove_accents(""), "");
    }

    #[test]
    fn test_standardize_suffixes() {
        assert_eq!(standardize_suffixes("Apple Corporation"), "Apple corp");
        assert_eq!(standardize_suffixes("Microsoft Incorporated"), "Microsoft inc");
        assert_eq!(standardize_suffixes("Google Limited"), "Google ltd");
        assert_eq!(standardize_suffixes("Amazon Company"), "Amazon co");
        assert_eq!(standardize_suffixes("Facebook LLC"), "Facebook llc");
        assert_eq!(standardize_suffixes("BMW Aktiengesellschaft"), "BMW ag");
        assert_eq!(standardize_suffixes("Acme Holdings"), "Acme hldg");
        assert_eq!(standardize_suffixes("Acme Holding Group"), "Acme hldg grp");
    }

    #[test]
    fn test_standardize_suffixes_whole_words_only() {
        assert_eq!(standardize_suffixes("incorporation"), "incorporation");
        assert_eq!(standardize_suffixes("cobalt saga"), "cobalt saga");
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("Apple, Inc."), "Apple Inc");
        assert_eq!(remove_punctuation("Microsoft Corp."), "Microsoft Corp");
        assert_eq!(remove_punctuation("John & Sons"), "John  Sons");
        assert_eq!(remove_punctuation("!@#$%"), "");
        assert_eq!(remove_punctuation("A.B.C"), "ABC");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Text  "), "Text");
        assert_eq!(
            collapse_whitespace("Text With  Multiple   Spaces"),
            "Text With Multiple Spaces"
        );
        assert_eq!(collapse_whitespace("\tTabbed\nText\r"), "Tabbed Text");
    }

    #[test]
    fn test_normalize_pipeline() {
        assert_eq!(normalize("Apple, Inc."), "apple inc");
        assert_eq!(normalize("Microsoft Corporation"), "microsoft corp");
        assert_eq!(normalize("IBM L.L.C."), "ibm llc");
        assert_eq!(normalize("Société Générale S.A."), "societe generale sa");
        assert_eq!(normalize("   Google   LLC  "), "google llc");
        assert_eq!(normalize("Acme & Co."), "acme co");
        assert_eq!(normalize("HSBC P.L.C."), "hsbc plc");
        assert_eq!(normalize("     "), "");
    }

    #[test]
    fn test_normalize_non_text_input() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize(123_i64), "123");
        assert_eq!(normalizer.normalize(12345_i64), "12345");
        assert_eq!(normalizer.normalize(None::<&str>), "");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_normalize_reaches_fixed_point() {
        let once = normalize("Acme limi.ted");
        assert_eq!(once, "acme ltd");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_name_keeps_original() {
        let raw = RawName::new("Apple Corp.");
        let normalized = Normalizer::new().normalize_name(&raw);
        assert_eq!(normalized.original, raw);
        assert_eq!(normalized.value, "apple corp");
    }
}
