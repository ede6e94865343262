//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Lookahead with the input checkpoint (keywords, end tag names)
//! - Building the current token (tag names, attributes, comments, DOCTYPEs)
//! - Token emission ("Emit the current token") and character coalescing

use super::character_reference;
use super::core::{HtmlTokenizer, TokenizerState};
use super::declarations::DoctypeIdentifier;
use super::token::{Attribute, QuoteStyle, Token, is_space_character};
use crate::elements::is_void_element;
use crate::error::ParseError;
use crate::options::ContentModel;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl HtmlTokenizer {
    /// Consume `keyword` if the next characters are an ASCII case-insensitive
    /// match for it.
    ///
    /// On a match the input checkpoint stays set, so the caller can still
    /// reject what follows with `reset_to_mark` or accept it with `unmark`.
    /// On a mismatch nothing is consumed.
    pub(super) fn consume_keyword(&mut self, keyword: &str) -> bool {
        self.input.mark();
        for expected in keyword.chars() {
            match self.input.read() {
                Some(c) if c.eq_ignore_ascii_case(&expected) => {}
                _ => {
                    self.input.reset_to_mark();
                    return false;
                }
            }
        }
        true
    }

    /// Report a parse error at the current input position.
    pub(super) fn parse_error(&mut self, message: impl Into<String>) {
        self.collect_input_errors();
        self.errors
            .push(ParseError::new(message, self.input.position()));
    }

    /// Move errors noticed by the input stream into our own list, keeping
    /// them in order with the tokenizer's errors.
    pub(super) fn collect_input_errors(&mut self) {
        let input_errors = self.input.take_errors();
        self.errors.extend(input_errors);
    }
}

// =============================================================================
// Character Token Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Emit the current input character as a character token."
    ///
    /// Characters are coalesced until a non-character token is emitted.
    pub(super) fn append_text_char(&mut self, c: char) {
        if !is_space_character(c) {
            self.text_is_whitespace = false;
        }
        self.text.push(c);
    }

    pub(super) fn append_text(&mut self, text: &str) {
        for c in text.chars() {
            self.append_text_char(c);
        }
    }

    /// Emit the pending characters as one character token.
    pub(super) fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.text);
        self.tokens.push_back(Token::Character {
            data,
            whitespace_only: self.text_is_whitespace,
        });
        self.text_is_whitespace = true;
    }
}

// =============================================================================
// Tag Token Helpers
// =============================================================================

impl HtmlTokenizer {
    pub(super) fn create_tag_token(&mut self, token: Token) {
        self.current_token = Some(token);
        self.current_attribute = None;
        self.slash_error_reported = false;
    }

    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(Token::StartTag { name, .. } | Token::EndTag { name, .. }) =
            self.current_token.as_mut()
        {
            name.push(c);
        }
    }

    /// "Parse error unless this is a permitted slash."
    ///
    /// A slash is permitted directly before the `>` of a void element's start
    /// tag. The error is reported once per tag. A slash before `>` sets the
    /// self-closing flag either way.
    pub(super) fn handle_solidus(&mut self) {
        let before_gt = self.input.peek(0) == Some('>');
        let mut permitted = false;
        match self.current_token.as_mut() {
            Some(Token::StartTag {
                name, self_closing, ..
            }) => {
                *self_closing |= before_gt;
                permitted = before_gt && is_void_element(name);
            }
            Some(Token::EndTag { self_closing, .. }) => *self_closing |= before_gt,
            _ => {}
        }
        if !permitted && !self.slash_error_reported {
            self.slash_error_reported = true;
            self.parse_error("Not a permitted slash");
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, first: char) {
        self.commit_attribute();
        self.current_attribute = Some((first.to_string(), String::new(), QuoteStyle::Unquoted));
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some((name, _, _)) = self.current_attribute.as_mut() {
            name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, text: &str) {
        if let Some((_, value, _)) = self.current_attribute.as_mut() {
            value.push_str(text);
        }
    }

    pub(super) fn set_attribute_quote(&mut self, quote_style: QuoteStyle) {
        if let Some((_, _, quote)) = self.current_attribute.as_mut() {
            *quote = quote_style;
        }
    }

    /// Add the attribute being read to the current tag.
    ///
    /// "If there is already an attribute on the token with the exact same name,
    /// then this is a parse error and the new attribute must be dropped, along
    /// with the value that gets associated with it (if any)."
    pub(super) fn commit_attribute(&mut self) {
        let Some((name, value, quote)) = self.current_attribute.take() else {
            return;
        };
        let duplicate = match self.current_token.as_mut() {
            Some(Token::StartTag { attributes, .. } | Token::EndTag { attributes, .. }) => {
                if attributes.iter().any(|attribute| attribute.name == name) {
                    true
                } else {
                    attributes.push(Attribute {
                        name: name.clone(),
                        value,
                        quote,
                    });
                    false
                }
            }
            _ => false,
        };
        if duplicate {
            self.parse_error(format!("Duplicate attribute: {name}"));
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "Attempt to consume an entity. If nothing is returned, append a U+0026
    /// AMPERSAND character to the current attribute's value. Otherwise, append
    /// the returned character token to the current attribute's value."
    pub(super) fn consume_character_reference_in_attribute(&mut self, additional: Option<char>) {
        let input = &mut self.input;
        let reference =
            character_reference::resolve(|offset| input.peek(offset), additional, true);
        for message in reference.errors {
            self.parse_error(message);
        }
        let _ = self.input.read_n(reference.consumed);
        match reference.text {
            Some(text) => self.append_to_attribute_value(&text),
            None => self.append_to_attribute_value("&"),
        }
    }
}

// =============================================================================
// Comment and DOCTYPE Helpers
// =============================================================================

impl HtmlTokenizer {
    pub(super) fn append_to_comment(&mut self, c: char) {
        if let Some(Token::Comment { data }) = self.current_token.as_mut() {
            data.push(c);
        }
    }

    /// "Set the DOCTYPE token's force-quirks flag to on."
    pub(super) fn set_force_quirks(&mut self) {
        if let Some(Token::Doctype { force_quirks, .. }) = self.current_token.as_mut() {
            *force_quirks = true;
        }
    }

    pub(super) fn append_to_doctype_name(&mut self, c: char) {
        if let Some(Token::Doctype { name, .. }) = self.current_token.as_mut() {
            name.get_or_insert_with(String::new).push(c);
        }
    }

    /// Set a DOCTYPE identifier to the empty string (as opposed to missing).
    pub(super) fn start_doctype_identifier(&mut self, identifier: DoctypeIdentifier) {
        if let Some(slot) = self.doctype_identifier_mut(identifier) {
            *slot = Some(String::new());
        }
    }

    pub(super) fn append_to_doctype_identifier(&mut self, identifier: DoctypeIdentifier, c: char) {
        if let Some(slot) = self.doctype_identifier_mut(identifier) {
            slot.get_or_insert_with(String::new).push(c);
        }
    }

    fn doctype_identifier_mut(
        &mut self,
        identifier: DoctypeIdentifier,
    ) -> Option<&mut Option<String>> {
        match self.current_token.as_mut() {
            Some(Token::Doctype {
                public_identifier,
                system_identifier,
                ..
            }) => Some(match identifier {
                DoctypeIdentifier::Public => public_identifier,
                DoctypeIdentifier::System => system_identifier,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Emit the current token"
    ///
    /// Pending characters are emitted first.
    pub(super) fn emit_current_token(&mut self) {
        self.commit_attribute();
        let Some(mut token) = self.current_token.take() else {
            return;
        };

        match &mut token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            // "When an end tag token is emitted, the content model flag must be switched to
            // the PCDATA state."
            // "If an end tag token is emitted with attributes, then this is a parse error."
            Token::EndTag { attributes, .. } => {
                if !attributes.is_empty() {
                    self.parse_error("End tag with attributes");
                }
                self.content_model = ContentModel::Pcdata;
                self.escape_flag = false;
            }
            Token::Doctype {
                name, force_quirks, ..
            } => {
                if name.as_deref() != Some("html") {
                    *force_quirks = true;
                }
            }
            Token::Comment { .. } | Token::Character { .. } => {}
        }

        self.flush_text();
        self.tokens.push_back(token);
    }
}
