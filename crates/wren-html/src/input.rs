//! The normalized character stream the tokenizer reads from.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! Newlines are normalized while characters are pulled from the source:
//! "any U+000D CARRIAGE RETURN (CR) characters that are followed by
//! U+000A LINE FEED (LF) characters must be removed, and any U+000D
//! CARRIAGE RETURN (CR) characters not followed by U+000A LINE FEED (LF)
//! characters must be converted to U+000A LINE FEED (LF) characters."
//!
//! U+0000 is handed out as U+FFFD and reported once, even if the
//! character is read again after [`InputStream::reset_to_mark`].

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};

use encoding_rs::{CoderResult, Decoder, UTF_8};
use wren_common::SourcePosition;

use crate::error::ParseError;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

const READ_CHUNK_SIZE: usize = 4096;

/// Where characters come from before normalization.
enum Source {
    Text {
        text: String,
        offset: usize,
    },
    Bytes {
        reader: Box<dyn Read>,
        // Holds an incomplete sequence at the end of a chunk until the next one.
        decoder: Decoder,
        decoded: VecDeque<char>,
        finished: bool,
    },
}

impl Source {
    fn next_char(&mut self, io_error: &mut Option<io::Error>) -> Option<char> {
        match self {
            Self::Text { text, offset } => {
                let c = text[*offset..].chars().next()?;
                *offset += c.len_utf8();
                Some(c)
            }
            Self::Bytes {
                reader,
                decoder,
                decoded,
                finished,
            } => loop {
                if let Some(c) = decoded.pop_front() {
                    return Some(c);
                }
                if *finished {
                    return None;
                }
                if let Err(error) = fill(reader.as_mut(), decoder, decoded, finished) {
                    // An I/O failure ends the stream; the reader reports it.
                    *finished = true;
                    *io_error = Some(error);
                }
            },
        }
    }
}

/// Read one chunk from `reader` and decode it.
fn fill(
    reader: &mut dyn Read,
    decoder: &mut Decoder,
    decoded: &mut VecDeque<char>,
    finished: &mut bool,
) -> io::Result<()> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let read = loop {
        match reader.read(&mut chunk) {
            Ok(read) => break read,
            Err(error) if error.kind() == ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    };

    // An empty read is the end of the stream; a truncated sequence left in
    // the decoder becomes U+FFFD.
    let last = read == 0;
    if last {
        *finished = true;
    }
    decode_chunk(decoder, &chunk[..read], last, decoded);
    Ok(())
}

/// Decode `bytes` as UTF-8, replacing malformed sequences with U+FFFD.
fn decode_chunk(decoder: &mut Decoder, bytes: &[u8], last: bool, decoded: &mut VecDeque<char>) {
    let mut text = String::with_capacity(buffer_length(decoder, bytes.len()));
    let mut remaining = bytes;
    loop {
        let (result, read, _) = decoder.decode_to_string(remaining, &mut text, last);
        remaining = &remaining[read..];
        decoded.extend(text.drain(..));
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => text.reserve(buffer_length(decoder, remaining.len())),
        }
    }
}

fn buffer_length(decoder: &Decoder, byte_length: usize) -> usize {
    decoder
        .max_utf8_buffer_length(byte_length)
        .unwrap_or(READ_CHUNK_SIZE * 4)
}

/// The checkpoint set by [`InputStream::mark`].
struct Mark {
    replay: Vec<char>,
    position: SourcePosition,
    offset: usize,
}

/// A normalized character stream with lookahead and a single mark.
///
/// Lookahead and replay storage only grow as far as the caller peeks or
/// reads while marked, never with the size of the input.
pub struct InputStream {
    source: Source,
    /// Normalized characters that have been pulled but not consumed.
    lookahead: VecDeque<char>,
    last_was_cr: bool,
    mark: Option<Mark>,
    position: SourcePosition,
    /// Characters consumed so far.
    offset: usize,
    /// Largest `offset` ever reached; re-reads below it report nothing.
    high_water: usize,
    errors: Vec<ParseError>,
    io_error: Option<io::Error>,
}

impl InputStream {
    /// Read from an in-memory string.
    #[must_use]
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::with_source(Source::Text {
            text: text.into(),
            offset: 0,
        })
    }

    /// Read UTF-8 from any byte source, decoding incrementally.
    ///
    /// Invalid sequences become U+FFFD.
    #[must_use]
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::with_source(Source::Bytes {
            reader: Box::new(reader),
            decoder: UTF_8.new_decoder_without_bom_handling(),
            decoded: VecDeque::new(),
            finished: false,
        })
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            lookahead: VecDeque::new(),
            last_was_cr: false,
            mark: None,
            position: SourcePosition::START,
            offset: 0,
            high_water: 0,
            errors: Vec::new(),
            io_error: None,
        }
    }

    /// The next normalized character from the source.
    fn next_normalized(&mut self) -> Option<char> {
        loop {
            let c = self.source.next_char(&mut self.io_error)?;
            match c {
                '\r' => {
                    self.last_was_cr = true;
                    return Some('\n');
                }
                '\n' if self.last_was_cr => {
                    self.last_was_cr = false;
                }
                c => {
                    self.last_was_cr = false;
                    return Some(c);
                }
            }
        }
    }

    /// Make sure `lookahead[index]` exists. Returns false at the end of the
    /// stream.
    fn fill_to(&mut self, index: usize) -> bool {
        while self.lookahead.len() <= index {
            match self.next_normalized() {
                Some(c) => self.lookahead.push_back(c),
                None => return false,
            }
        }
        true
    }

    /// Look at the character `offset` positions ahead without consuming it.
    /// `peek(0)` is the next character to be read.
    pub fn peek(&mut self, offset: usize) -> Option<char> {
        if !self.fill_to(offset) {
            return None;
        }
        self.lookahead
            .get(offset)
            .map(|&c| if c == '\0' { REPLACEMENT_CHARACTER } else { c })
    }

    /// Consume the next character, or `None` at the end of the stream.
    pub fn read(&mut self) -> Option<char> {
        if !self.fill_to(0) {
            return None;
        }
        let c = self.lookahead.pop_front()?;
        if let Some(mark) = self.mark.as_mut() {
            mark.replay.push(c);
        }
        self.position = self.position.advance(c);
        self.offset += 1;
        let fresh = self.offset > self.high_water;
        if fresh {
            self.high_water = self.offset;
        }

        if c == '\0' {
            if fresh {
                self.errors.push(ParseError::new(
                    "U+0000 (NUL) replaced with U+FFFD",
                    self.position,
                ));
            }
            return Some(REPLACEMENT_CHARACTER);
        }
        Some(c)
    }

    /// Consume up to `count` characters.
    pub fn read_n(&mut self, count: usize) -> String {
        let mut text = String::with_capacity(count);
        for _ in 0..count {
            match self.read() {
                Some(c) => text.push(c),
                None => break,
            }
        }
        text
    }

    /// Consume everything up to the end of the stream.
    pub fn read_to_end(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.read() {
            text.push(c);
        }
        text
    }

    /// True once every character has been consumed.
    pub fn is_at_end(&mut self) -> bool {
        self.peek(0).is_none()
    }

    /// Set the checkpoint. A previous checkpoint is discarded.
    pub fn mark(&mut self) {
        self.mark = Some(Mark {
            replay: Vec::new(),
            position: self.position,
            offset: self.offset,
        });
    }

    /// Un-read everything consumed since [`mark`](Self::mark) and drop the
    /// checkpoint. Does nothing without a checkpoint.
    pub fn reset_to_mark(&mut self) {
        if let Some(mark) = self.mark.take() {
            for c in mark.replay.into_iter().rev() {
                self.lookahead.push_front(c);
            }
            self.position = mark.position;
            self.offset = mark.offset;
        }
    }

    /// Drop the checkpoint, keeping everything consumed since.
    pub fn unmark(&mut self) {
        self.mark = None;
    }

    /// True while a checkpoint is set.
    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.mark.is_some()
    }

    /// Position after the last consumed character.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Drain the parse errors noticed while normalizing.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// The I/O error that ended the stream early, if any.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }
}
