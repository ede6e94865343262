//! Markup declarations: comments and DOCTYPEs.
//!
//! [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
//! through [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use super::core::{HtmlTokenizer, TokenizerState};
use super::token::{Token, is_space_character};

/// Which DOCTYPE identifier is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DoctypeIdentifier {
    Public,
    System,
}

impl HtmlTokenizer {
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// This state only looks ahead; nothing has been consumed yet.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "If the next two characters are both U+002D HYPHEN-MINUS (-) characters,
        // consume those two characters, create a comment token whose data is the empty
        // string, and switch to the comment start state."
        if self.input.peek(0) == Some('-') && self.input.peek(1) == Some('-') {
            let _ = self.input.read_n(2);
            self.current_token = Some(Token::comment(""));
            self.switch_to(TokenizerState::CommentStart);
            return;
        }

        // "Otherwise, if the next seven characters are an ASCII case-insensitive match
        // for the word "DOCTYPE", then consume those characters and switch to the
        // DOCTYPE state."
        if self.consume_keyword("doctype") {
            self.input.unmark();
            self.current_token = Some(Token::Doctype {
                name: None,
                public_identifier: None,
                system_identifier: None,
                force_quirks: false,
            });
            self.switch_to(TokenizerState::Doctype);
            return;
        }

        // "Otherwise, this is a parse error. Switch to the bogus comment state. The next
        // character that is consumed, if any, is the first character that will be in the
        // comment."
        self.parse_error("Bogus comment");
        self.current_token = Some(Token::comment(""));
        self.switch_to(TokenizerState::BogusComment);
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment start dash state."
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Emit the comment token. Switch to
            // the data state."
            Some('>') => {
                self.parse_error("Incorrect comment");
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_comment(),
            // "Anything else - Append the input character to the comment token's data.
            // Switch to the comment state."
            Some(c) => {
                self.append_to_comment(c);
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state"
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error("Incorrect comment");
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_comment(),
            // "Anything else - Append a U+002D HYPHEN-MINUS (-) character and the input
            // character to the comment token's data. Switch to the comment state."
            Some(c) => {
                self.append_to_comment('-');
                self.append_to_comment(c);
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end dash state"
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            // "EOF - Parse error. Emit the comment token. Reconsume the EOF character in the
            // data state."
            None => self.eof_in_comment(),
            Some(c) => self.append_to_comment(c),
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(c) => {
                self.append_to_comment('-');
                self.append_to_comment(c);
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Emit the comment token. Switch to the data state."
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "U+002D HYPHEN-MINUS (-) - Parse error. Append a U+002D HYPHEN-MINUS (-)
            // character to the comment token's data."
            Some('-') => {
                self.parse_error("Unexpected - after -- in comment");
                self.append_to_comment('-');
            }
            None => self.eof_in_comment(),
            // "Anything else - Parse error. Append two U+002D HYPHEN-MINUS (-) characters and
            // the input character to the comment token's data. Switch to the comment state."
            Some(c) => {
                self.parse_error("Unexpected character after -- in comment");
                self.append_to_comment('-');
                self.append_to_comment('-');
                self.append_to_comment(c);
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    fn eof_in_comment(&mut self) {
        self.parse_error("Unexpected end of stream in comment");
        self.emit_current_token();
        self.reconsume_in(TokenizerState::Data);
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE - Switch to the before DOCTYPE name state."
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            // "Anything else - Parse error. Reconsume the current character in the before
            // DOCTYPE name state."
            _ => {
                self.parse_error("No space after DOCTYPE");
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Create a new DOCTYPE token. Set its
            // force-quirks flag to on. Emit the token. Switch to the data state."
            Some('>') => {
                self.parse_error("Missing DOCTYPE name");
                self.set_force_quirks();
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            // "Anything else - Create a new DOCTYPE token. Set the token's name to the
            // current input character. Switch to the DOCTYPE name state."
            Some(c) => {
                self.append_to_doctype_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_doctype_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        let current = self.current_input_character;
        match current {
            Some(c) if is_space_character(c) => {}
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            // "If the six characters starting from the current input character are an
            // ASCII case-insensitive match for the word "PUBLIC", then consume those
            // characters and switch to the before DOCTYPE public identifier state."
            Some('p' | 'P') if self.consume_keyword("ublic") => {
                self.input.unmark();
                self.switch_to(TokenizerState::BeforeDoctypePublicId);
            }
            // "Otherwise, if the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word "SYSTEM", then consume those
            // characters and switch to the before DOCTYPE system identifier state."
            Some('s' | 'S') if self.consume_keyword("ystem") => {
                self.input.unmark();
                self.switch_to(TokenizerState::BeforeDoctypeSystemId);
            }
            // "Otherwise, this is the parse error. Set the DOCTYPE token's force-quirks flag
            // to on. Switch to the bogus DOCTYPE state."
            Some(_) => {
                self.parse_error("Expected PUBLIC or SYSTEM in DOCTYPE");
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_id_state(&mut self) {
        self.before_doctype_identifier(DoctypeIdentifier::Public);
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_id_state(&mut self) {
        self.before_doctype_identifier(DoctypeIdentifier::System);
    }

    fn before_doctype_identifier(&mut self, identifier: DoctypeIdentifier) {
        let (double_quoted, single_quoted) = match identifier {
            DoctypeIdentifier::Public => (
                TokenizerState::DoctypePublicIdDoubleQuoted,
                TokenizerState::DoctypePublicIdSingleQuoted,
            ),
            DoctypeIdentifier::System => (
                TokenizerState::DoctypeSystemIdDoubleQuoted,
                TokenizerState::DoctypeSystemIdSingleQuoted,
            ),
        };

        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            // "U+0022 QUOTATION MARK (") - Set the DOCTYPE token's public identifier to the
            // empty string, then switch to the DOCTYPE public identifier (double-quoted) state."
            Some('"') => {
                self.start_doctype_identifier(identifier);
                self.switch_to(double_quoted);
            }
            Some('\'') => {
                self.start_doctype_identifier(identifier);
                self.switch_to(single_quoted);
            }
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Set the DOCTYPE token's
            // force-quirks flag to on. Emit that DOCTYPE token. Switch to the data state."
            Some('>') => {
                self.parse_error("Unexpected end of DOCTYPE");
                self.set_force_quirks();
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            // "Anything else - Parse error. Set the DOCTYPE token's force-quirks flag to on.
            // Switch to the bogus DOCTYPE state."
            Some(_) => {
                self.parse_error("Unexpected character in DOCTYPE identifier");
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    pub(super) fn handle_doctype_public_id_quoted_state(&mut self, quote: char) {
        self.doctype_identifier_quoted(
            DoctypeIdentifier::Public,
            quote,
            TokenizerState::AfterDoctypePublicId,
        );
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    pub(super) fn handle_doctype_system_id_quoted_state(&mut self, quote: char) {
        self.doctype_identifier_quoted(
            DoctypeIdentifier::System,
            quote,
            TokenizerState::AfterDoctypeSystemId,
        );
    }

    fn doctype_identifier_quoted(
        &mut self,
        identifier: DoctypeIdentifier,
        quote: char,
        after: TokenizerState,
    ) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(after),
            // "U+003E GREATER-THAN SIGN (>) - Parse error. Set the DOCTYPE token's
            // force-quirks flag to on. Emit that DOCTYPE token. Switch to the data state."
            Some('>') => {
                self.parse_error("Unexpected end of DOCTYPE in identifier");
                self.set_force_quirks();
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_doctype_identifier(identifier, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_id_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            Some('"') => {
                self.start_doctype_identifier(DoctypeIdentifier::System);
                self.switch_to(TokenizerState::DoctypeSystemIdDoubleQuoted);
            }
            Some('\'') => {
                self.start_doctype_identifier(DoctypeIdentifier::System);
                self.switch_to(TokenizerState::DoctypeSystemIdSingleQuoted);
            }
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error("Unexpected character after public identifier");
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_id_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_space_character(c) => {}
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            // "Anything else - Parse error. Switch to the bogus DOCTYPE state. (This does
            // not set the DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error("Unexpected character after system identifier");
                self.switch_to(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            Some(_) => {}
        }
    }

    /// "EOF - Parse error. Set the DOCTYPE token's force-quirks flag to on. Emit that
    /// DOCTYPE token. Reconsume the EOF character in the data state."
    fn eof_in_doctype(&mut self) {
        self.parse_error("Unexpected end of stream in DOCTYPE");
        self.set_force_quirks();
        self.emit_current_token();
        self.reconsume_in(TokenizerState::Data);
    }
}
