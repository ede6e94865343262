//! Streaming HTML5 parser exposed as a pull-based event stream.
//!
//! # Scope
//!
//! This crate implements:
//! - **Input stream**: newline and NUL normalization, incremental UTF-8
//!   decoding, lookahead with a single mark/reset checkpoint
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - PCDATA, RCDATA, CDATA (with the escape flag) and PLAINTEXT content models
//!   - Tag, attribute, comment and DOCTYPE states
//!   - Named and numeric character references
//!
//! - **Tree Constructor** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Every insertion mode from "before head" to "after frameset"
//!   - Stack of open elements and list of active formatting elements
//!   - Adoption agency algorithm and formatting element reconstruction
//!   - Compatibility mode from the DOCTYPE
//!
//! - **Reader**: [`HtmlReader`] yields [`Event`]s one at a time.
//!
//! # Not Implemented
//!
//! - Script execution and encoding sniffing
//! - Templates, foreign content (SVG, MathML) and fragment parsing
//! - Moving nodes that were already emitted: foster parenting and the
//!   furthest-block branch of the adoption agency are approximated

/// Tag name classes used by the tree constructor.
pub mod elements;
/// Error types.
pub mod error;
/// Events produced by the reader.
pub mod event;
/// Normalized character input.
pub mod input;
/// Parser and tokenizer options.
pub mod options;
/// Tree construction.
pub mod parser;
/// Pull-based reader.
pub mod reader;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{HtmlError, ParseError, Result};
pub use event::{Event, NodeKind};
pub use input::InputStream;
pub use options::{ContentModel, ParserOptions, TokenizerOptions};
pub use parser::{CompatibilityMode, InsertionMode, Phase, TreeConstructor};
pub use reader::HtmlReader;
pub use tokenizer::{Attribute, HtmlTokenizer, QuoteStyle, Token};

/// Namespace of every element the parser reports.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
