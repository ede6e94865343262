use core::fmt;

use serde::Serialize;

/// "The space characters, for the purposes of this specification, are
/// U+0020 SPACE, U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
/// U+000C FORM FEED (FF), and U+000D CARRIAGE RETURN (CR)."
#[must_use]
pub const fn is_space_character(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// How an attribute value was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuoteStyle {
    /// `name=value`, or no value at all (`<input disabled>`).
    #[default]
    Unquoted,
    /// `name='value'`
    SingleQuoted,
    /// `name="value"`
    DoubleQuoted,
}

/// An attribute on a start or end tag token.
///
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Attribute value with character references resolved.
    pub value: String,
    /// The quotes used around the value.
    pub quote: QuoteStyle,
}

impl Attribute {
    /// Create an attribute with an unquoted value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote: QuoteStyle::Unquoted,
        }
    }
}

/// A token produced by the tokenizer.
///
/// The end of the stream is not a token: [`HtmlTokenizer::next_token`]
/// returns `None` instead.
///
/// [`HtmlTokenizer::next_token`]: super::HtmlTokenizer::next_token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag."
    Doctype {
        /// Lower-cased DOCTYPE name, `None` when missing.
        name: Option<String>,
        /// `None` when missing, which is distinct from the empty string.
        public_identifier: Option<String>,
        /// `None` when missing, which is distinct from the empty string.
        system_identifier: Option<String>,
        /// Set for malformed DOCTYPEs and for names other than `html`.
        force_quirks: bool,
    },

    /// A start tag. Attribute names are unique: the first occurrence wins.
    StartTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
        /// Set when the tag ends with `/>`.
        self_closing: bool,
    },

    /// An end tag. Attributes and `/>` are parse errors but still recorded.
    EndTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
        /// Set when the tag ends with `/>`.
        self_closing: bool,
    },

    /// A comment, including bogus comments such as `<?xml ...>`.
    Comment {
        /// Comment text without the delimiters.
        data: String,
    },

    /// A run of character data. Adjacent characters are coalesced.
    Character {
        /// The characters.
        data: String,
        /// True if every character is a space character.
        whitespace_only: bool,
    },
}

impl Token {
    /// A start tag without attributes, used for tags implied by the parser.
    #[must_use]
    pub fn start_tag(name: impl Into<String>) -> Self {
        Self::StartTag {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    /// An end tag without attributes, used for tags implied by the parser.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    /// A comment token.
    #[must_use]
    pub fn comment(data: impl Into<String>) -> Self {
        Self::Comment { data: data.into() }
    }

    /// A character token; `whitespace_only` is computed from `data`.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        let data = data.into();
        let whitespace_only = data.chars().all(is_space_character);
        Self::Character {
            data,
            whitespace_only,
        }
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True for a start tag whose name is one of `names`.
    #[must_use]
    pub fn is_start_tag_in(&self, names: &[&str]) -> bool {
        matches!(self, Self::StartTag { name, .. } if names.contains(&name.as_str()))
    }

    /// True for an end tag whose name is one of `names`.
    #[must_use]
    pub fn is_end_tag_in(&self, names: &[&str]) -> bool {
        matches!(self, Self::EndTag { name, .. } if names.contains(&name.as_str()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "<!DOCTYPE {}", name.as_deref().unwrap_or(""))?;
                if let Some(public) = public_identifier {
                    write!(f, " PUBLIC \"{public}\"")?;
                }
                if let Some(system) = system_identifier {
                    write!(f, " \"{system}\"")?;
                }
                write!(f, ">")?;
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attribute in attributes {
                    write!(f, " {}=\"{}\"", attribute.name, attribute.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data, .. } => write!(f, "{data:?}"),
        }
    }
}
