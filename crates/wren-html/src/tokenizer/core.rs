use std::collections::VecDeque;

use strum_macros::Display;

use super::character_reference;
use super::token::{QuoteStyle, Token, is_space_character};
use crate::error::{HtmlError, ParseError};
use crate::input::InputStream;
use crate::options::{ContentModel, TokenizerOptions};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. What RCDATA, CDATA and PLAINTEXT content
/// looks like is decided by the [`ContentModel`] flag, not by separate
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReferenceInData,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    CloseTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDoctypeName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DoctypeName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDoctypeName,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDoctypePublicId,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DoctypePublicIdDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DoctypePublicIdSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDoctypePublicId,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDoctypeSystemId,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DoctypeSystemIdDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DoctypeSystemIdSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDoctypeSystemId,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDoctype,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// The tokenizer is pulled one token at a time. It stops as soon as a
/// non-character token is ready, so the tree constructor can change the
/// content model before the element's contents are read.
pub struct HtmlTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: InputStream,
    pub(super) current_input_character: Option<char>,
    // When true, the next step will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    pub(super) content_model: ContentModel,
    /// Set inside `<!-- ... -->` in RCDATA and CDATA content, where `<`
    /// cannot start an end tag.
    pub(super) escape_flag: bool,

    pub(super) current_token: Option<Token>,
    /// Attribute being read; added to the current tag when complete.
    pub(super) current_attribute: Option<(String, String, QuoteStyle)>,
    /// The misplaced-slash error is reported once per tag.
    pub(super) slash_error_reported: bool,

    /// Character data not yet emitted.
    pub(super) text: String,
    pub(super) text_is_whitespace: bool,

    /// "The last start tag token emitted" closes RCDATA and CDATA content.
    pub(super) last_start_tag_name: Option<String>,

    pub(super) tokens: VecDeque<Token>,
    pub(super) errors: Vec<ParseError>,
    pub(super) started: bool,
    pub(super) finished: bool,
}

impl HtmlTokenizer {
    /// Create a tokenizer over a string, starting in the PCDATA content model.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self::from_input(InputStream::from_string(input))
    }

    /// Create a tokenizer over an existing input stream.
    ///
    /// "The initial state is the data state."
    #[must_use]
    pub fn from_input(input: InputStream) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_input_character: None,
            reconsume: false,
            content_model: ContentModel::Pcdata,
            escape_flag: false,
            current_token: None,
            current_attribute: None,
            slash_error_reported: false,
            text: String::new(),
            text_is_whitespace: true,
            last_start_tag_name: None,
            tokens: VecDeque::new(),
            errors: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Create a tokenizer that starts in the given content model.
    #[must_use]
    pub fn with_options(input: InputStream, options: TokenizerOptions) -> Self {
        let mut tokenizer = Self::from_input(input);
        tokenizer.content_model = options.content_model;
        tokenizer.last_start_tag_name = options.last_start_tag;
        tokenizer
    }

    /// The current content model flag.
    #[must_use]
    pub const fn content_model(&self) -> ContentModel {
        self.content_model
    }

    /// Change the content model before the first token is read.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::InvalidOperation`] once tokenizing has started.
    pub fn set_content_model(&mut self, content_model: ContentModel) -> Result<(), HtmlError> {
        if self.started {
            return Err(HtmlError::InvalidOperation(
                "the content model can only be set before tokenizing starts",
            ));
        }
        self.content_model = content_model;
        Ok(())
    }

    /// Content model switch driven by the tree constructor.
    pub(crate) const fn switch_content_model(&mut self, content_model: ContentModel) {
        self.content_model = content_model;
        self.escape_flag = false;
    }

    /// The current state, for diagnostics.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Name of the last start tag emitted.
    #[must_use]
    pub fn last_start_tag_name(&self) -> Option<&str> {
        self.last_start_tag_name.as_deref()
    }

    /// Position after the last consumed character.
    #[must_use]
    pub const fn position(&self) -> wren_common::SourcePosition {
        self.input.position()
    }

    /// Drain the parse errors reported so far, in order.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        self.collect_input_errors();
        std::mem::take(&mut self.errors)
    }

    /// The I/O error that ended the input early, if any.
    pub fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.input.take_io_error()
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.started = true;
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            self.step();
        }
    }

    /// Run one state of the machine.
    fn step(&mut self) {
        // These states only look ahead; they decide for themselves how much
        // of the input to consume.
        match self.state {
            TokenizerState::MarkupDeclarationOpen => {
                self.handle_markup_declaration_open_state();
                return;
            }
            TokenizerState::CharacterReferenceInData => {
                self.handle_character_reference_in_data_state();
                return;
            }
            TokenizerState::CloseTagOpen if self.content_model != ContentModel::Pcdata => {
                self.handle_close_tag_open_in_raw_text();
                return;
            }
            _ => {}
        }

        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.input.read();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::CloseTagOpen => self.handle_close_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
            TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
            TokenizerState::DoctypeName => self.handle_doctype_name_state(),
            TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
            TokenizerState::BeforeDoctypePublicId => self.handle_before_doctype_public_id_state(),
            TokenizerState::DoctypePublicIdDoubleQuoted => {
                self.handle_doctype_public_id_quoted_state('"');
            }
            TokenizerState::DoctypePublicIdSingleQuoted => {
                self.handle_doctype_public_id_quoted_state('\'');
            }
            TokenizerState::AfterDoctypePublicId => self.handle_after_doctype_public_id_state(),
            TokenizerState::BeforeDoctypeSystemId => self.handle_before_doctype_system_id_state(),
            TokenizerState::DoctypeSystemIdDoubleQuoted => {
                self.handle_doctype_system_id_quoted_state('"');
            }
            TokenizerState::DoctypeSystemIdSingleQuoted => {
                self.handle_doctype_system_id_quoted_state('\'');
            }
            TokenizerState::AfterDoctypeSystemId => self.handle_after_doctype_system_id_state(),
            TokenizerState::BogusDoctype => self.handle_bogus_doctype_state(),
            TokenizerState::MarkupDeclarationOpen | TokenizerState::CharacterReferenceInData => {}
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        let content_model = self.content_model;
        let raw_text = matches!(content_model, ContentModel::Rcdata | ContentModel::Cdata);

        match self.current_input_character {
            Some(c) if content_model == ContentModel::Plaintext => {
                self.append_text_char(c);
                let rest = self.input.read_to_end();
                self.append_text(&rest);
            }
            // "U+0026 AMPERSAND (&) - When the content model flag is set to one of the
            // PCDATA or RCDATA states: switch to the character reference data state."
            // The escape flag is not consulted: a reference inside an escaped
            // `<!-- -->` span of RCDATA is still resolved.
            Some('&') if matches!(content_model, ContentModel::Pcdata | ContentModel::Rcdata) => {
                self.switch_to(TokenizerState::CharacterReferenceInData);
            }
            // "U+002D HYPHEN-MINUS (-) - If the content model flag is set to either the
            // RCDATA state or the CDATA state, and the escape flag is false, and there are
            // at least three characters before this one in the input stream, and the last
            // four characters in the input stream, including this one, are U+003C
            // LESS-THAN SIGN, U+0021 EXCLAMATION MARK, U+002D HYPHEN-MINUS, and U+002D
            // HYPHEN-MINUS ("<!--"), then set the escape flag to true."
            Some('-') => {
                self.append_text_char('-');
                if raw_text && !self.escape_flag && self.text.ends_with("<!--") {
                    self.escape_flag = true;
                }
            }
            // "U+003C LESS-THAN SIGN (<) - When the content model flag is set to the PCDATA
            // state: switch to the tag open state. When the content model flag is set to
            // either the RCDATA state or the CDATA state, and the escape flag is false:
            // switch to the tag open state."
            Some('<') if content_model == ContentModel::Pcdata || !self.escape_flag => {
                self.switch_to(TokenizerState::TagOpen);
            }
            // "U+003E GREATER-THAN SIGN (>) - If the content model flag is set to either the
            // RCDATA state or the CDATA state, and the escape flag is true, and the last
            // three characters in the input stream including this one are U+002D
            // HYPHEN-MINUS, U+002D HYPHEN-MINUS, U+003E GREATER-THAN SIGN ("-->"), set the
            // escape flag to false."
            Some('>') => {
                self.append_text_char('>');
                if raw_text && self.escape_flag && self.text.ends_with("-->") {
                    self.escape_flag = false;
                }
            }
            // "EOF - Emit an end-of-file token."
            None => {
                self.flush_text();
                self.finished = true;
            }
            // "Anything else - Emit the input character as a character token."
            Some(c) => self.append_text_char(c),
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "Attempt to consume an entity. If nothing is returned, emit a U+0026
    /// AMPERSAND character token. Otherwise, emit the character token that was
    /// returned. Finally, switch to the data state."
    fn handle_character_reference_in_data_state(&mut self) {
        let input = &mut self.input;
        let reference = character_reference::resolve(|offset| input.peek(offset), None, false);
        for message in reference.errors {
            self.parse_error(message);
        }
        let _ = self.input.read_n(reference.consumed);
        match reference.text {
            Some(text) => self.append_text(&text),
            None => self.append_text_char('&'),
        }
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        // "If the content model flag is set to the RCDATA or CDATA states: If the next
        // input character is a U+002F SOLIDUS (/) character, consume it and switch to the
        // close tag open state. Otherwise, emit a U+003C LESS-THAN SIGN character token
        // and reconsume the current input character in the data state."
        if self.content_model != ContentModel::Pcdata {
            if self.current_input_character == Some('/') {
                self.switch_to(TokenizerState::CloseTagOpen);
            } else {
                self.append_text_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
            return;
        }

        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/) - Switch to the close tag open state."
            Some('/') => self.switch_to(TokenizerState::CloseTagOpen),
            // "U+0041 LATIN CAPITAL LETTER A through to U+005A LATIN CAPITAL LETTER Z - Create
            // a new start tag token, set its tag name to the lowercase version of the input
            // character. Switch to the tag name state."
            // "U+0061 LATIN SMALL LETTER A through to U+007A LATIN SMALL LETTER Z - Create a
            // new start tag token, set its tag name to the input character."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag_token(Token::start_tag(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Emit a U+003C LESS-THAN SIGN
            // character token and a U+003E GREATER-THAN SIGN character token. Switch to the
            // data state."
            Some('>') => {
                self.parse_error("Unescaped <>");
                self.append_text("<>");
                self.switch_to(TokenizerState::Data);
            }
            // "U+003F QUESTION MARK (?) - Parse error. Switch to the bogus comment state."
            Some('?') => {
                self.parse_error("Bogus comment starting with <?");
                self.current_token = Some(Token::comment(""));
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "Anything else - Parse error. Emit a U+003C LESS-THAN SIGN character token and
            // reconsume the current input character in the data state."
            _ => {
                self.parse_error("Unescaped <");
                self.append_text_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    ///
    /// RCDATA and CDATA content: "If the next few characters do not match the tag
    /// name of the last start tag token emitted (compared in an ASCII
    /// case-insensitive manner), or if they do but they are not immediately followed
    /// by one of the following characters: U+0009 CHARACTER TABULATION, U+000A LINE
    /// FEED (LF), U+000C FORM FEED (FF), U+0020 SPACE, U+003E GREATER-THAN SIGN (>),
    /// U+002F SOLIDUS (/), U+003C LESS-THAN SIGN (<), EOF ...then emit a U+003C
    /// LESS-THAN SIGN character token, a U+002F SOLIDUS character token, and switch
    /// to the data state to process the next input character."
    fn handle_close_tag_open_in_raw_text(&mut self) {
        let Some(name) = self.last_start_tag_name.clone() else {
            self.append_text("</");
            self.switch_to(TokenizerState::Data);
            return;
        };

        if self.consume_keyword(&name) {
            let follows = self.input.peek(0);
            let terminated = match follows {
                None => true,
                Some(c) => is_space_character(c) || matches!(c, '>' | '/' | '<'),
            };
            if terminated {
                self.input.unmark();
                self.create_tag_token(Token::end_tag(name));
                self.switch_to(TokenizerState::TagName);
                return;
            }
            self.input.reset_to_mark();
        }

        self.append_text("</");
        self.switch_to(TokenizerState::Data);
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_close_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0041 LATIN CAPITAL LETTER A through to U+005A LATIN CAPITAL LETTER Z -
            // Create a new end tag token, set its tag name to the lowercase version of the
            // input character. Switch to the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag_token(Token::end_tag(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Switch to the data state."
            Some('>') => {
                self.parse_error("Unescaped </>, all three characters ignored.");
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - Parse error. Emit a U+003C LESS-THAN SIGN character token and a U+002F
            // SOLIDUS character token. Reconsume the EOF character in the data state."
            None => {
                self.parse_error("Unexpected end of stream in end tag.");
                self.append_text("</");
                self.reconsume_in(TokenizerState::Data);
            }
            // "Anything else - Parse error. Switch to the bogus comment state."
            Some(_) => {
                self.parse_error(
                    "End tag name not beginning with a letter, treat as a bogus comment.",
                );
                self.current_token = Some(Token::comment(""));
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the before attribute name state."
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Emit the current tag token. Switch to the data state."
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "U+002F SOLIDUS (/) - Parse error unless this is a permitted slash. Switch to
            // the before attribute name state."
            Some('/') => {
                self.handle_solidus();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "EOF - Parse error. Emit the current tag token. Reconsume the EOF character in
            // the data state."
            None => {
                self.parse_error("Unexpected end of stream in tag name");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "Anything else - Append the current input character to the current tag
            // token's tag name." Upper case letters are appended lower-cased.
            Some(c) => self.append_to_tag_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Stay in the before attribute name state."
            Some(c) if is_space_character(c) => {}
            // "U+003E GREATER-THAN SIGN (>) - Emit the current tag token. Switch to the data state."
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "U+002F SOLIDUS (/) - Parse error unless this is a permitted slash. Stay in the
            // before attribute name state."
            Some('/') => self.handle_solidus(),
            // "EOF - Parse error. Emit the current tag token. Reconsume the EOF character in
            // the data state."
            None => {
                self.parse_error("Unexpected end of stream before attribute name");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<),
            // U+003D EQUALS SIGN (=) - Parse error. Treat it as per the "anything else" entry
            // below."
            Some(c @ ('"' | '\'' | '<' | '=' | '&')) => {
                self.parse_error(format!("Invalid character {c} in attribute name"));
                self.start_new_attribute(c);
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else - Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character, and its value to the empty
            // string. Switch to the attribute name state."
            Some(c) => {
                self.start_new_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value state."
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('/') => {
                self.handle_solidus();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            None => {
                self.parse_error("Unexpected end of stream in attribute name");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<) -
            // Parse error. Treat it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error(format!("Invalid character {c} in attribute name"));
                self.append_to_attribute_name(c);
            }
            Some(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('/') => {
                self.handle_solidus();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            None => {
                self.parse_error("Unexpected end of stream after attribute name");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            Some(c @ ('"' | '\'' | '<' | '&')) => {
                self.parse_error(format!("Invalid character {c} in attribute name"));
                self.start_new_attribute(c);
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(c) => {
                self.start_new_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            // "U+0022 QUOTATION MARK (") - Switch to the attribute value (double-quoted) state."
            Some('"') => {
                self.set_attribute_quote(QuoteStyle::DoubleQuoted);
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            // "U+0026 AMPERSAND (&) - Switch to the attribute value (unquoted) state and
            // reconsume this input character."
            Some('&') => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
            // "U+0027 APOSTROPHE (') - Switch to the attribute value (single-quoted) state."
            Some('\'') => {
                self.set_attribute_quote(QuoteStyle::SingleQuoted);
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.parse_error("Unexpected end of stream before attribute value");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "U+003D EQUALS SIGN (=) - Parse error. Treat it as per the "anything else"
            // entry below."
            Some('=') => {
                self.parse_error("Invalid character = in unquoted attribute value");
                self.append_to_attribute_value("=");
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
            // "Anything else - Append the current input character to the current
            // attribute's value. Switch to the attribute value (unquoted) state."
            Some(c) => {
                self.append_to_attribute_value(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (") - Switch to the after attribute value (quoted) state."
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            // "U+0026 AMPERSAND (&) - Switch to the character reference in attribute value
            // state, with the additional allowed character being U+0022 QUOTATION MARK (")."
            Some('&') => self.consume_character_reference_in_attribute(Some(quote)),
            // "EOF - Parse error. Emit the current tag token. Reconsume the character in the
            // data state."
            None => {
                self.parse_error("Unexpected end of stream in attribute value");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+0026 AMPERSAND (&) - Switch to the character reference in attribute value
            // state, with the additional allowed character being U+003E GREATER-THAN SIGN (>)."
            Some('&') => self.consume_character_reference_in_attribute(Some('>')),
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.parse_error("Unexpected end of stream in attribute value");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C LESS-THAN SIGN (<),
            // U+003D EQUALS SIGN (=) - Parse error. Treat it as per the "anything else"
            // entry below."
            Some(c @ ('"' | '\'' | '<' | '=')) => {
                self.parse_error(format!("Invalid character {c} in unquoted attribute value"));
                self.append_to_attribute_value(c.encode_utf8(&mut [0; 4]));
            }
            Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('/') => {
                self.handle_solidus();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            None => {
                self.parse_error("Unexpected end of stream after attribute value");
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            // "Anything else - Parse error. Reconsume the character in the before attribute
            // name state."
            Some(_) => {
                self.parse_error("No space between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// "Consume every character up to the first U+003E GREATER-THAN SIGN character (>)
    /// or the end of the file (EOF), whichever comes first. Emit a comment token whose
    /// data is the concatenation of all the characters starting from and including the
    /// character that caused the state machine to switch into the bogus comment state,
    /// up to and including the last consumed character before the U+003E character, if
    /// any, or up to the end of the file otherwise."
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.emit_current_token();
                self.reconsume_in(TokenizerState::Data);
            }
            Some(c) => self.append_to_comment(c),
        }
    }
}

impl Iterator for HtmlTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
