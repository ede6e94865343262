//! Integration tests for the normalized input stream.

use std::io::{self, Read};

use wren_common::SourcePosition;
use wren_html::InputStream;

/// A byte source that hands out one byte per read call
struct Trickle(Vec<u8>, usize);

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(&byte) = self.0.get(self.1) else {
            return Ok(0);
        };
        buf[0] = byte;
        self.1 += 1;
        Ok(1)
    }
}

/// A byte source that fails after its first chunk
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
fn test_newlines_are_normalized() {
    let mut input = InputStream::from_string("a\r\nb\rc\n\rd");
    assert_eq!(input.read_to_end(), "a\nb\nc\n\nd");
}

#[test]
fn test_crlf_split_across_reads_is_one_newline() {
    let mut input = InputStream::from_reader(Trickle(b"a\r\nb".to_vec(), 0));
    assert_eq!(input.read_to_end(), "a\nb");
}

#[test]
fn test_nul_is_replaced_once() {
    let mut input = InputStream::from_string("a\0b");
    assert_eq!(input.peek(1), Some('\u{FFFD}'));
    assert_eq!(input.read_to_end(), "a\u{FFFD}b");

    let errors = input.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "U+0000 (NUL) replaced with U+FFFD");
    assert_eq!(errors[0].position(), SourcePosition { line: 1, column: 2 });
}

#[test]
fn test_peek_does_not_consume() {
    let mut input = InputStream::from_string("xyz");
    assert_eq!(input.peek(0), Some('x'));
    assert_eq!(input.peek(2), Some('z'));
    assert_eq!(input.peek(3), None);
    assert_eq!(input.read(), Some('x'));
}

#[test]
fn test_mark_and_reset() {
    let mut input = InputStream::from_string("DOCTYPE html");
    input.mark();
    assert!(input.is_marked());
    assert_eq!(input.read_n(4), "DOCT");
    input.reset_to_mark();
    assert!(!input.is_marked());
    assert_eq!(input.position(), SourcePosition::START);
    assert_eq!(input.read_n(7), "DOCTYPE");
}

#[test]
fn test_unmark_keeps_consumed_characters() {
    let mut input = InputStream::from_string("abc");
    input.mark();
    let _ = input.read();
    input.unmark();
    input.reset_to_mark();
    assert_eq!(input.read(), Some('b'));
}

#[test]
fn test_reread_after_reset_reports_nul_once() {
    let mut input = InputStream::from_string("\0\0");
    input.mark();
    let _ = input.read_n(2);
    input.reset_to_mark();
    let _ = input.read_to_end();
    assert_eq!(input.take_errors().len(), 2);
}

#[test]
fn test_positions_track_lines() {
    let mut input = InputStream::from_string("ab\ncd");
    let _ = input.read_n(2);
    assert_eq!(input.position(), SourcePosition { line: 1, column: 2 });
    let _ = input.read();
    assert_eq!(input.position(), SourcePosition { line: 2, column: 0 });
    let _ = input.read();
    assert_eq!(input.position(), SourcePosition { line: 2, column: 1 });
}

#[test]
fn test_utf8_split_across_reads() {
    let bytes = "é€😀".as_bytes().to_vec();
    let mut input = InputStream::from_reader(Trickle(bytes, 0));
    assert_eq!(input.read_to_end(), "é€😀");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut input = InputStream::from_reader(&b"a\xFFb\xE2\x82"[..]);
    assert_eq!(input.read_to_end(), "a\u{FFFD}b\u{FFFD}");
}

#[test]
fn test_malformed_utf8_split_across_reads() {
    let bytes = b"\xE2\x82x\xF0\x9F\x98".to_vec();
    let mut input = InputStream::from_reader(Trickle(bytes, 0));
    assert_eq!(input.read_to_end(), "\u{FFFD}x\u{FFFD}");
}

#[test]
fn test_sequence_split_across_chunks() {
    let text = "\u{20AC}".repeat(2000);
    let mut input = InputStream::from_reader(io::Cursor::new(text.clone().into_bytes()));
    assert_eq!(input.read_to_end(), text);
}

#[test]
fn test_io_error_ends_stream() {
    let mut input = InputStream::from_reader(Failing(false));
    assert_eq!(input.read_to_end(), "ok");
    assert!(input.is_at_end());
    let error = input.take_io_error();
    assert_eq!(error.map(|error| error.kind()), Some(io::ErrorKind::Other));
}
