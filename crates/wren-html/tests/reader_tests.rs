//! Tests for the pull-based reader API.

use std::cell::RefCell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

use wren_html::{CompatibilityMode, Event, HtmlError, HtmlReader, NodeKind, ParserOptions};

/// Helper to collect every event, panicking on errors
fn events(html: &str) -> Vec<Event> {
    HtmlReader::new(html)
        .collect::<wren_html::Result<Vec<Event>>>()
        .expect("reading failed")
}

fn element_names(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .filter(|event| event.kind == NodeKind::Element)
        .map(|event| event.name.as_str())
        .collect()
}

/// Yields "ok" and then fails.
struct Failing(bool);

impl Read for Failing {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0 {
            return Err(io::Error::other("connection reset"));
        }
        self.0 = true;
        buf[..2].copy_from_slice(b"ok");
        Ok(2)
    }
}

#[test]
fn test_element_sequence() {
    let events = events("<!DOCTYPE html><p>Hi");
    assert_eq!(element_names(&events), ["html", "head", "body", "p"]);
}

#[test]
fn test_event_depths() {
    let events = events("<!DOCTYPE html><div><p>x");
    let summary: Vec<(NodeKind, &str, usize)> = events
        .iter()
        .map(|event| {
            let label = match event.kind {
                NodeKind::Text => event.value.as_str(),
                _ => event.name.as_str(),
            };
            (event.kind, label, event.depth)
        })
        .collect();
    assert_eq!(
        summary,
        [
            (NodeKind::DocumentType, "html", 0),
            (NodeKind::Element, "html", 0),
            (NodeKind::Element, "head", 1),
            (NodeKind::EndElement, "head", 1),
            (NodeKind::Element, "body", 1),
            (NodeKind::Element, "div", 2),
            (NodeKind::Element, "p", 3),
            (NodeKind::Text, "x", 4),
            (NodeKind::EndElement, "p", 3),
            (NodeKind::EndElement, "div", 2),
            (NodeKind::EndElement, "body", 1),
            (NodeKind::EndElement, "html", 0),
        ]
    );
}

#[test]
fn test_reader_depth_follows_events() {
    let mut reader = HtmlReader::new("<!DOCTYPE html><div><br>");
    while let Some(event) = reader.next_event().expect("reading failed") {
        match event.kind {
            NodeKind::Element if !event.is_empty_element => {
                assert_eq!(reader.depth(), event.depth + 1);
            }
            _ => assert_eq!(reader.depth(), event.depth),
        }
    }
}

#[test]
fn test_element_attributes() {
    let events = events(r#"<!DOCTYPE html><a href="/x" title='t' hidden>link</a>"#);
    let anchor = events
        .iter()
        .find(|event| event.kind == NodeKind::Element && event.name == "a")
        .expect("anchor event");
    assert_eq!(anchor.attribute_count(), 3);
    assert_eq!(anchor.attribute_by_name("href"), Some("/x"));
    assert_eq!(anchor.attribute_by_name("title"), Some("t"));
    assert_eq!(anchor.attribute_by_name("hidden"), Some(""));
    assert_eq!(anchor.attribute_by_name("missing"), None);
    assert_eq!(anchor.attribute(0).map(|attribute| attribute.name.as_str()), Some("href"));
    assert!(anchor.attribute(3).is_none());
}

#[test]
fn test_void_elements_are_empty() {
    let events = events("<!DOCTYPE html><img src=a><hr><input>");
    for name in ["img", "hr", "input"] {
        let event = events
            .iter()
            .find(|event| event.name == name)
            .expect("void element event");
        assert!(event.is_empty_element, "{name} should be empty");
    }
    assert!(!events.iter().any(|event| event.kind == NodeKind::EndElement
        && matches!(event.name.as_str(), "img" | "hr" | "input")));
}

#[test]
fn test_text_and_whitespace_events() {
    let events = events("<!DOCTYPE html><p>a</p> <p>b</p>");
    let whitespace = events
        .iter()
        .find(|event| event.kind == NodeKind::Whitespace)
        .expect("whitespace event");
    assert_eq!(whitespace.value, " ");
    assert!(whitespace.is_character_data());

    let text = events
        .iter()
        .find(|event| event.kind == NodeKind::Text)
        .expect("text event");
    assert_eq!(text.value, "a");
    assert!(text.is_character_data());
}

#[test]
fn test_document_type_identifiers() {
    let events = events(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
    );
    let doctype = &events[0];
    assert_eq!(doctype.kind, NodeKind::DocumentType);
    assert_eq!(doctype.name, "html");
    assert_eq!(doctype.depth, 0);
    assert!(doctype.is_empty_element);
    assert_eq!(
        doctype.attribute_by_name("PUBLIC"),
        Some("-//W3C//DTD XHTML 1.0 Strict//EN")
    );
    assert_eq!(
        doctype.attribute_by_name("SYSTEM"),
        Some("http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd")
    );
}

#[test]
fn test_document_type_without_identifiers() {
    let events = events("<!DOCTYPE html>");
    assert_eq!(events[0].attribute_count(), 0);
}

#[test]
fn test_merged_html_attributes() {
    let events = events("<!DOCTYPE html><html lang=en><body><html lang=fr class=x>");
    let merged: Vec<&Event> = events
        .iter()
        .filter(|event| event.name == "html" && event.is_empty_element)
        .collect();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].attribute_by_name("class"), Some("x"));
    assert_eq!(merged[0].attribute_by_name("lang"), None);
}

#[test]
fn test_compat_mode_after_reading() {
    let mut reader = HtmlReader::new("<p>no doctype");
    while let Ok(Some(_)) = reader.next_event() {}
    assert_eq!(reader.compat_mode(), CompatibilityMode::Quirks);
}

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn test_parse_errors_are_collected() {
    let mut reader = HtmlReader::new("<p>x</b>");
    while let Ok(Some(_)) = reader.next_event() {}
    let messages: Vec<&str> = reader
        .parse_errors()
        .iter()
        .map(|error| error.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Unexpected start tag (p). Expected DOCTYPE.",
            "Unexpected end tag (b). Ignored.",
        ]
    );
}

#[test]
fn test_parse_error_callback() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut reader = HtmlReader::new("<p>x</b><td>");
    reader.on_parse_error(move |error| sink.borrow_mut().push(error.message.clone()));
    while let Ok(Some(_)) = reader.next_event() {}

    let seen = seen.borrow();
    assert_eq!(seen.len(), reader.parse_errors().len());
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2], "Unexpected start tag (td) in body. Ignored.");
}

#[test]
fn test_fatal_parse_errors() {
    let mut reader = HtmlReader::new("<p>x");
    reader.set_fatal_parse_errors().expect("not started yet");

    let result = reader.next_event();
    assert!(matches!(
        result,
        Err(HtmlError::Parse(ref error)) if error.message == "Unexpected start tag (p). Expected DOCTYPE."
    ));
    assert!(reader.eof());
    assert!(matches!(reader.next_event(), Ok(None)));
}

#[test]
fn test_fatal_parse_errors_through_options() {
    let mut reader = HtmlReader::new("<!DOCTYPE html><p>a</b>")
        .with_options(ParserOptions::default().with_fatal_parse_errors());
    let results: Vec<_> = reader.by_ref().collect();
    assert!(matches!(results.last(), Some(Err(HtmlError::Parse(_)))));
    assert!(results[..results.len() - 1].iter().all(Result::is_ok));
    assert!(reader.next().is_none());
}

#[test]
fn test_valid_document_in_fatal_mode() {
    let mut reader = HtmlReader::new("<!DOCTYPE html><title>t</title><p>a</p>");
    reader.set_fatal_parse_errors().expect("not started yet");
    let events = reader
        .collect::<wren_html::Result<Vec<Event>>>()
        .expect("no parse errors");
    assert_eq!(element_names(&events), ["html", "head", "title", "body", "p"]);
}

#[test]
fn test_fatal_mode_after_start_is_rejected() {
    let mut reader = HtmlReader::new("<!DOCTYPE html>");
    let _ = reader.next_event().expect("reading failed");
    assert!(matches!(
        reader.set_fatal_parse_errors(),
        Err(HtmlError::InvalidOperation(_))
    ));
}

// =============================================================================
// Byte sources
// =============================================================================

#[test]
fn test_read_from_byte_source() {
    let reader = HtmlReader::from_reader(Cursor::new("<!DOCTYPE html><p>caf\u{e9}".as_bytes().to_vec()));
    let events = reader
        .collect::<wren_html::Result<Vec<Event>>>()
        .expect("reading failed");
    let text = events
        .iter()
        .find(|event| event.kind == NodeKind::Text)
        .expect("text event");
    assert_eq!(text.value, "caf\u{e9}");
}

#[test]
fn test_io_error_ends_reading() {
    let mut reader = HtmlReader::from_reader(Failing(false));
    let results: Vec<_> = reader.by_ref().collect();

    assert!(matches!(results.last(), Some(Err(HtmlError::Io(_)))));
    assert!(results.iter().any(|result| matches!(
        result,
        Ok(event) if event.kind == NodeKind::Text && event.value == "ok"
    )));
    assert!(reader.eof());
    assert!(reader.next().is_none());
}

#[test]
fn test_eof_flag() {
    let mut reader = HtmlReader::new("");
    assert!(!reader.eof());
    while let Ok(Some(_)) = reader.next_event() {}
    assert!(reader.eof());
    assert!(matches!(reader.next_event(), Ok(None)));
}
