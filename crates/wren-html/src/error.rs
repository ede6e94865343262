//! Error types for the parser.
//!
//! Parse errors and implementation faults are kept apart: a [`ParseError`]
//! is a recoverable deviation from the HTML grammar and is normally only
//! reported, while [`HtmlError::ImplementationFault`] means the parser's own
//! bookkeeping went wrong.

use core::fmt;

use serde::Serialize;
use thiserror::Error;
use wren_common::SourcePosition;

/// A recoverable parse error, reported with the position where it was noticed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Human readable description.
    pub message: String,
    /// 1-based line number.
    pub line: usize,
    /// Characters consumed on the line when the error was noticed.
    pub column: usize,
}

impl ParseError {
    /// Create a parse error at `position`.
    #[must_use]
    pub fn new(message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// The position as a [`SourcePosition`].
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Errors returned by the reader and tokenizer.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// A parse error while fatal mode is enabled.
    #[error("parse error at {0}")]
    Parse(ParseError),

    /// The parser reached a state its own invariants rule out.
    #[error("implementation fault: {0}")]
    ImplementationFault(String),

    /// The API was used in a way that is not allowed at this point.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// The underlying byte source failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, HtmlError>;
