//! Source positions for diagnostics.

use std::fmt;

use serde::Serialize;

/// A position in the normalized character stream.
///
/// Lines are 1-based. The column counts the characters consumed on the
/// current line, so it is 0 before the first character of a line has been
/// read and equals the 1-based column of the last consumed character
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: usize,
    /// Characters consumed on the current line.
    pub column: usize,
}

impl SourcePosition {
    /// The position before any character has been read.
    pub const START: Self = Self { line: 1, column: 0 };

    /// Advance past `c`. A line feed starts a new line.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 0,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
