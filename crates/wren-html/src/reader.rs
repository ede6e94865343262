//! Pull-based reader over the tree constructor.

use core::fmt;
use std::io::Read;

use crate::error::{HtmlError, ParseError, Result};
use crate::event::{Event, NodeKind};
use crate::input::InputStream;
use crate::options::ParserOptions;
use crate::parser::{CompatibilityMode, TreeConstructor};

/// Callback invoked for every parse error, in order.
pub type ParseErrorHandler = Box<dyn FnMut(&ParseError)>;

/// Reads an HTML document as a sequence of [`Event`]s.
///
/// The sequence is produced lazily: each call to
/// [`next_event`](Self::next_event) runs the tokenizer and the tree
/// constructor until at least one event is ready. Once the reader has
/// returned `None` or an error it stays exhausted.
///
/// ```
/// use wren_html::{HtmlReader, NodeKind};
///
/// let names: Vec<String> = HtmlReader::new("<!DOCTYPE html><p>Hi")
///     .filter_map(Result::ok)
///     .filter(|event| event.kind == NodeKind::Element)
///     .map(|event| event.name)
///     .collect();
/// assert_eq!(names, ["html", "head", "body", "p"]);
/// ```
pub struct HtmlReader {
    constructor: TreeConstructor,
    errors: Vec<ParseError>,
    on_parse_error: Option<ParseErrorHandler>,
    started: bool,
    exhausted: bool,
    depth: usize,
}

impl HtmlReader {
    /// Read from an in-memory document.
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self::from_input(InputStream::from_string(html))
    }

    /// Read UTF-8 from a byte source, decoding as it goes.
    #[must_use]
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::from_input(InputStream::from_reader(reader))
    }

    /// Read from an existing input stream.
    #[must_use]
    pub fn from_input(input: InputStream) -> Self {
        Self {
            constructor: TreeConstructor::new(input, ParserOptions::default()),
            errors: Vec::new(),
            on_parse_error: None,
            started: false,
            exhausted: false,
            depth: 0,
        }
    }

    /// Use `options` for this document.
    #[must_use]
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.constructor.set_options(options);
        self
    }

    /// Turn the first parse error into [`HtmlError::Parse`].
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::InvalidOperation`] once the first event has been
    /// requested.
    pub fn set_fatal_parse_errors(&mut self) -> Result<()> {
        if self.started {
            return Err(HtmlError::InvalidOperation(
                "fatal parse errors can only be enabled before reading starts",
            ));
        }
        let options = self.constructor.options().with_fatal_parse_errors();
        self.constructor.set_options(options);
        Ok(())
    }

    /// Call `handler` for every parse error as it is reported.
    pub fn on_parse_error(&mut self, handler: impl FnMut(&ParseError) + 'static) {
        self.on_parse_error = Some(Box::new(handler));
    }

    /// Produce the next event, or `None` at the end of the document.
    ///
    /// # Errors
    ///
    /// - [`HtmlError::Parse`] for the first parse error in fatal mode.
    /// - [`HtmlError::Io`] if the byte source failed.
    /// - [`HtmlError::ImplementationFault`] if the parser's bookkeeping is
    ///   inconsistent.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        if self.exhausted {
            return Ok(None);
        }
        self.started = true;

        let result = self.pull_event();
        if !matches!(result, Ok(Some(_))) {
            self.exhausted = true;
        }
        result
    }

    fn pull_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.dispatch_parse_errors()?;

            if let Some(event) = self.constructor.pop_event() {
                self.depth = match event.kind {
                    NodeKind::Element if !event.is_empty_element => event.depth + 1,
                    _ => event.depth,
                };
                return Ok(Some(event));
            }

            if self.constructor.is_finished() {
                return match self.constructor.take_io_error() {
                    Some(error) => Err(HtmlError::Io(error)),
                    None => Ok(None),
                };
            }

            self.constructor.step()?;
        }
    }

    fn dispatch_parse_errors(&mut self) -> Result<()> {
        let fatal = self.constructor.options().fatal_parse_errors;
        for error in self.constructor.take_errors() {
            if let Some(handler) = self.on_parse_error.as_mut() {
                handler(&error);
            }
            self.errors.push(error.clone());
            if fatal {
                return Err(HtmlError::Parse(error));
            }
        }
        Ok(())
    }

    /// Number of elements open after the last event. Inside an element
    /// this is one more than the element event's own depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// True once the reader is exhausted.
    #[must_use]
    pub const fn eof(&self) -> bool {
        self.exhausted
    }

    /// The compatibility mode chosen from the DOCTYPE.
    #[must_use]
    pub const fn compat_mode(&self) -> CompatibilityMode {
        self.constructor.compat_mode()
    }

    /// Every parse error reported so far.
    #[must_use]
    pub fn parse_errors(&self) -> &[ParseError] {
        &self.errors
    }
}

impl Iterator for HtmlReader {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

impl fmt::Debug for HtmlReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlReader")
            .field("phase", &self.constructor.phase())
            .field("insertion_mode", &self.constructor.insertion_mode())
            .field("depth", &self.depth)
            .field("errors", &self.errors.len())
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
