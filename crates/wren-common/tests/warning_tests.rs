//! Integration tests for the warning and position utilities.

use wren_common::SourcePosition;
use wren_common::warning::{clear_warnings, warn_once};

#[test]
fn test_warn_once_deduplicates_and_clears() {
    let message = "test_warn_once_deduplicates_and_clears";
    let _ = warn_once("Test", message);
    assert!(!warn_once("Test", message));

    // Same message, different component is a different warning
    let _ = warn_once("Other", message);
    assert!(!warn_once("Other", message));

    clear_warnings();
    assert!(warn_once("Test", message));
}

#[test]
fn test_position_starts_at_line_one() {
    assert_eq!(SourcePosition::default(), SourcePosition { line: 1, column: 0 });
}

#[test]
fn test_position_advance() {
    let pos = SourcePosition::START.advance('a').advance('b');
    assert_eq!(pos, SourcePosition { line: 1, column: 2 });

    let pos = pos.advance('\n');
    assert_eq!(pos, SourcePosition { line: 2, column: 0 });
    assert_eq!(pos.advance('c').to_string(), "2:1");
}
