//! Lookahead buffer between the tokenizer and the tree constructor.
//!
//! "Reprocess the current token" and "act as if a start tag token with the
//! tag name X had been seen" both come down to putting tokens back in front
//! of the tokenizer's output. Tokens pushed last are read first.

use crate::tokenizer::{HtmlTokenizer, Token};

#[derive(Debug, Default)]
pub(crate) struct PendingTokenBuffer {
    stack: Vec<Token>,
}

impl PendingTokenBuffer {
    /// The token that will be read next, pulled from the tokenizer if
    /// nothing is buffered. `None` means end of file.
    pub(crate) fn current(&mut self, tokenizer: &mut HtmlTokenizer) -> Option<&Token> {
        if self.stack.is_empty()
            && let Some(token) = tokenizer.next_token()
        {
            self.stack.push(token);
        }
        self.stack.last()
    }

    /// Remove and return the current token.
    pub(crate) fn take(&mut self, tokenizer: &mut HtmlTokenizer) -> Option<Token> {
        self.stack.pop().or_else(|| tokenizer.next_token())
    }

    /// Make `token` the current token. The token that was current before is
    /// read again after it.
    pub(crate) fn push(&mut self, token: Token) {
        self.stack.push(token);
    }

    /// Swap the current token for `token` without reading anything new.
    /// Returns the token that was replaced, or `None` (and buffers nothing)
    /// if no token was current.
    pub(crate) fn replace(&mut self, token: Token) -> Option<Token> {
        let slot = self.stack.last_mut()?;
        Some(std::mem::replace(slot, token))
    }

    /// Drop the current token.
    pub(crate) fn discard(&mut self) {
        let _ = self.stack.pop();
    }
}
