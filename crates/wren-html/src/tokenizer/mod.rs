//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! with the content model flag (PCDATA, RCDATA, CDATA, PLAINTEXT) deciding
//! how the contents of special elements are read.

/// Character reference resolution per § 13.2.5.72.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Comment and DOCTYPE states.
mod declarations;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HtmlTokenizer, TokenizerState};
pub use token::{Attribute, QuoteStyle, Token, is_space_character};
