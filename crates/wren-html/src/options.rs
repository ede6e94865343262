//! Parser and tokenizer configuration.

use strum_macros::{Display, EnumString};

/// The content model flag of the tokenizer.
///
/// Decides which markup is recognised inside the current element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ContentModel {
    /// Full markup recognition.
    #[default]
    #[strum(serialize = "pcdata")]
    Pcdata,
    /// Character references only; `<` opens nothing but the matching end tag
    /// (`title`, `textarea`).
    #[strum(serialize = "rcdata")]
    Rcdata,
    /// Like RCDATA without character references (`style`, `script`, `xmp`,
    /// `iframe`, `noembed`, `noframes`).
    #[strum(serialize = "cdata")]
    Cdata,
    /// Everything up to the end of the stream is text.
    #[strum(serialize = "plaintext")]
    Plaintext,
}

/// Options for the tree-constructing reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Turn the first parse error into [`HtmlError::Parse`].
    ///
    /// [`HtmlError::Parse`]: crate::HtmlError::Parse
    pub fatal_parse_errors: bool,
    /// Parse `<noscript>` as raw text, as a user agent with scripting enabled
    /// would.
    pub scripting: bool,
}

impl ParserOptions {
    /// Enable fatal parse errors.
    #[must_use]
    pub const fn with_fatal_parse_errors(mut self) -> Self {
        self.fatal_parse_errors = true;
        self
    }

    /// Enable the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self) -> Self {
        self.scripting = true;
        self
    }
}

/// Options for using the tokenizer on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizerOptions {
    /// Initial content model.
    pub content_model: ContentModel,
    /// Name of the start tag whose end tag closes RCDATA or CDATA content.
    pub last_start_tag: Option<String>,
}

impl TokenizerOptions {
    /// Start in `content_model`, as if the start tag `last_start_tag` had
    /// just been emitted.
    #[must_use]
    pub fn new(content_model: ContentModel, last_start_tag: Option<&str>) -> Self {
        Self {
            content_model,
            last_start_tag: last_start_tag.map(str::to_ascii_lowercase),
        }
    }
}
