//! Normalization integration tests
//!
//! Fixed input/expected pairs plus property-based checks of the pipeline.

use namesake_core::{normalize, NameInput, Normalizer, RawName};
use proptest::prelude::*;
use rstest::rstest;

// === Full Pipeline ===

#[rstest]
#[case("Apple, Inc.", "apple inc")]
#[case("Microsoft Corporation", "microsoft corp")]
#[case("IBM L.L.C.", "ibm llc")]
#[case("Société Générale S.A.", "societe generale sa")]
#[case("   Google   LLC  ", "google llc")]
#[case("Acme & Co.", "acme co")]
#[case("Deutsche Bank Aktiengesellschaft", "deutsche bank ag")]
#[case("Siemens GmbH & Co. KG", "siemens gmbh")]
#[case("Berkshire Hathaway Holdings", "berkshire hathaway hldg")]
#[case("\tTabbed\nText\r", "tabbed text")]
#[case("", "")]
#[case("     ", "")]
fn test_normalize_pipeline(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize(input), expected, "input: {:?}", input);
}

#[test]
fn test_suffix_round_trip() {
    assert_eq!(normalize("Apple Corporation"), "apple corp");
    assert_eq!(normalize("Apple Corp."), "apple corp");
    assert_eq!(normalize("apple corp"), "apple corp");
}

#[test]
fn test_suffixes_only_match_whole_words() {
    assert_eq!(normalize("Cobalt Saga Agency"), "cobalt saga agency");
    assert_eq!(normalize("Incorporation Services"), "incorporation services");
}

// === Type Coercion ===

#[rstest]
#[case(NameInput::Integer(12345), "12345")]
#[case(NameInput::Float(12.34), "1234")]
#[case(NameInput::Float(1.0), "10")]
#[case(NameInput::Null, "")]
fn test_non_string_input(#[case] input: NameInput<'static>, #[case] expected: &str) {
    assert_eq!(Normalizer::new().normalize(input), expected);
}

#[test]
fn test_optional_input() {
    let normalizer = Normalizer::new();
    assert_eq!(normalizer.normalize(None::<&str>), "");
    assert_eq!(normalizer.normalize(Some("Acme Ltd.")), "acme ltd");
}

#[test]
fn test_normalized_name_keeps_original() {
    let raw = RawName::from("Apple Inc.");
    let normalized = Normalizer::new().normalize_name(&raw);
    assert_eq!(normalized.original, raw);
    assert_eq!(normalized.as_str(), "apple inc");
}

// === Property-Based Tests ===

proptest! {
    #[test]
    fn test_normalize_idempotent(s in "\\PC{0,40}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone(), "input: {:?}", s);
    }

    #[test]
    fn test_normalize_idempotent_company_like(
        s in "[A-Za-zéüö]{1,10}( [A-Za-z.,&]{1,12}){0,3}"
    ) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalized_output_is_clean(s in "\\PC{0,40}") {
        let out = normalize(&s);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(out.chars().all(|c| c == ' ' || c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit()),
            "unexpected character in {:?}", out);
    }
}
