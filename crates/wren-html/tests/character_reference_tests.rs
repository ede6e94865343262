//! Integration tests for character reference resolution.

use wren_html::tokenizer::character_reference::{CharacterReference, resolve};
use wren_html::tokenizer::named_character_references::{
    is_missing_semicolon_recoverable, lookup_entity,
};

/// Helper to resolve the reference that follows an `&` in `text`
fn resolve_text(text: &str, in_attribute: bool) -> CharacterReference {
    let chars: Vec<char> = text.chars().collect();
    resolve(|n| chars.get(n).copied(), None, in_attribute)
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some('&'));
    assert_eq!(lookup_entity("lt"), Some('<'));
    assert_eq!(lookup_entity("gt"), Some('>'));
    assert_eq!(lookup_entity("quot"), Some('"'));
    assert_eq!(lookup_entity("nbsp"), Some('\u{00A0}'));
    assert_eq!(lookup_entity("hellip"), Some('\u{2026}'));
}

#[test]
fn test_lookup_uppercase_aliases() {
    assert_eq!(lookup_entity("AMP"), Some('&'));
    assert_eq!(lookup_entity("COPY"), Some('\u{00A9}'));
    assert_eq!(lookup_entity("TRADE"), Some('\u{2122}'));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
    assert_eq!(lookup_entity("am"), None);
}

#[test]
fn test_missing_semicolon_recoverable_names() {
    assert!(is_missing_semicolon_recoverable("amp"));
    assert!(is_missing_semicolon_recoverable("copy"));
    assert!(!is_missing_semicolon_recoverable("hellip"));
}

#[test]
fn test_named_reference_with_semicolon() {
    let reference = resolve_text("copy; 2024", false);
    assert_eq!(reference.text.as_deref(), Some("\u{00A9}"));
    assert_eq!(reference.consumed, 5);
    assert!(reference.errors.is_empty());
}

#[test]
fn test_named_reference_without_semicolon() {
    let reference = resolve_text("notit", false);
    assert_eq!(reference.text.as_deref(), Some("\u{00AC}"));
    assert_eq!(reference.consumed, 3);
    assert_eq!(reference.errors, vec!["Entity does not end with a semi-colon"]);
}

#[test]
fn test_modern_entity_needs_semicolon() {
    let reference = resolve_text("hellip ", false);
    assert!(reference.text.is_none());
    assert_eq!(reference.consumed, 0);
    assert_eq!(reference.errors, vec!["Named entity not found: hellip"]);
}

#[test]
fn test_ambiguous_ampersand_in_attribute() {
    let reference = resolve_text("amp=1", true);
    assert!(reference.text.is_none());
    assert_eq!(reference.consumed, 0);

    let reference = resolve_text("amp=1", false);
    assert_eq!(reference.text.as_deref(), Some("&"));
}

#[test]
fn test_not_a_reference() {
    for text in ["", " x", "<", "&"] {
        let reference = resolve_text(text, false);
        assert!(reference.text.is_none());
        assert_eq!(reference.consumed, 0);
        assert!(reference.errors.is_empty());
    }
}

#[test]
fn test_additional_allowed_character() {
    let chars: Vec<char> = "\"".chars().collect();
    let reference = resolve(|n| chars.get(n).copied(), Some('"'), true);
    assert!(reference.text.is_none());
    assert!(reference.errors.is_empty());
}

#[test]
fn test_decimal_and_hex_references() {
    let reference = resolve_text("#65;", false);
    assert_eq!(reference.text.as_deref(), Some("A"));
    assert_eq!(reference.consumed, 4);

    let reference = resolve_text("#X263a;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{263A}"));
    assert_eq!(reference.consumed, 7);
}

#[test]
fn test_numeric_reference_without_semicolon() {
    let reference = resolve_text("#65x", false);
    assert_eq!(reference.text.as_deref(), Some("A"));
    assert_eq!(reference.consumed, 3);
    assert_eq!(reference.errors, vec!["Entity does not end with a semi-colon"]);
}

#[test]
fn test_numeric_reference_without_digits() {
    let reference = resolve_text("#;", false);
    assert!(reference.text.is_none());
    assert_eq!(reference.consumed, 0);
    assert_eq!(reference.errors, vec!["Unescaped &#"]);

    let reference = resolve_text("#xg", false);
    assert_eq!(reference.errors, vec!["Unescaped &#x"]);
}

#[test]
fn test_windows_1252_references() {
    let reference = resolve_text("#128;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{20AC}"));
    assert_eq!(reference.errors.len(), 1);

    let reference = resolve_text("#x81;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{0081}"));
}

#[test]
fn test_invalid_code_points() {
    let reference = resolve_text("#0;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{FFFD}"));

    let reference = resolve_text("#13;", false);
    assert_eq!(reference.text.as_deref(), Some("\n"));

    let reference = resolve_text("#xD800;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{FFFD}"));

    let reference = resolve_text("#x110000;", false);
    assert_eq!(reference.text.as_deref(), Some("\u{FFFD}"));
    assert_eq!(reference.consumed, 9);
}
