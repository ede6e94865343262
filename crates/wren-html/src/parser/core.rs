use std::collections::VecDeque;

use strum_macros::Display;
use wren_common::warning::warn_once;

use super::arena::{ElementArena, ElementId};
use super::compat::{CompatibilityMode, compatibility_mode_for_doctype};
use super::formatting::ActiveFormattingList;
use super::pending::PendingTokenBuffer;
use crate::error::{HtmlError, ParseError, Result};
use crate::event::Event;
use crate::input::InputStream;
use crate::options::{ContentModel, ParserOptions};
use crate::tokenizer::{HtmlTokenizer, Token, is_space_character};

/// Coarse construction phase wrapping the insertion mode.
///
/// The phase covers bootstrapping of the document (DOCTYPE and root
/// element), raw text elements, and the tail after `</html>`. While the
/// phase is [`Phase::Main`] the [`InsertionMode`] decides what a token means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    Root,
    /// Dispatch by insertion mode.
    Main,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    GenericCdataOrRcdata,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    /// and [§ 13.2.6.4.23 "after after frameset"](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    TrailingEnd,
}

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Consumes tokens and produces the event stream of the document the HTML
/// parsing algorithm describes. Nothing is built in memory: inserting an
/// element emits an [`Event`], popping it from the stack of open elements
/// emits its end.
pub struct TreeConstructor {
    pub(super) tokenizer: HtmlTokenizer,
    pub(super) pending: PendingTokenBuffer,
    pub(super) options: ParserOptions,

    pub(super) phase: Phase,
    pub(super) mode: InsertionMode,

    /// Backing storage for the stack and the formatting list.
    pub(super) arena: ElementArena,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) open_elements: Vec<ElementId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) formatting: ActiveFormattingList,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element: Option<ElementId>,
    /// Set while the head has left the stack but its end has not been
    /// emitted yet.
    pub(super) head_end_pending: bool,
    pub(super) form_element: Option<ElementId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#other-parsing-state-flags)
    pub(super) frameset_ok: bool,

    pub(super) compat_mode: CompatibilityMode,

    pub(super) events: VecDeque<Event>,
    /// Number of elements whose start has been emitted but not their end.
    pub(super) depth: usize,
    pub(super) errors: Vec<ParseError>,
    pub(super) finished: bool,
}

impl TreeConstructor {
    /// Create a tree constructor reading from `input`.
    #[must_use]
    pub fn new(input: InputStream, options: ParserOptions) -> Self {
        Self {
            tokenizer: HtmlTokenizer::from_input(input),
            pending: PendingTokenBuffer::default(),
            options,
            phase: Phase::Initial,
            mode: InsertionMode::BeforeHead,
            arena: ElementArena::default(),
            open_elements: Vec::new(),
            formatting: ActiveFormattingList::default(),
            head_element: None,
            head_end_pending: false,
            form_element: None,
            frameset_ok: true,
            compat_mode: CompatibilityMode::Standards,
            events: VecDeque::new(),
            depth: 0,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Replace the options. Tokens already processed are not revisited.
    pub const fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    /// The current construction phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The current insertion mode. Only meaningful in [`Phase::Main`].
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.mode
    }

    /// The compatibility mode decided by the DOCTYPE (or its absence).
    #[must_use]
    pub const fn compat_mode(&self) -> CompatibilityMode {
        self.compat_mode
    }

    /// Tag names on the stack of open elements, bottom first.
    #[must_use]
    pub fn open_element_names(&self) -> Vec<&str> {
        self.open_elements
            .iter()
            .filter_map(|&id| self.arena.name(id))
            .collect()
    }

    /// True once the end of the input has been processed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Remove the next queued event.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drain the parse errors reported so far, in order.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        self.collect_tokenizer_errors();
        std::mem::take(&mut self.errors)
    }

    /// The I/O error that ended the input early, if any.
    pub fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.tokenizer.take_io_error()
    }

    /// Process one token, queueing whatever events it produces.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::ImplementationFault`] if the parser's own
    /// bookkeeping is found to be inconsistent.
    pub fn step(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        let token = self.pending.take(&mut self.tokenizer);
        self.collect_tokenizer_errors();
        self.process_token(token)
    }

    /// Dispatch a token on the current phase. `None` is the end of file.
    fn process_token(&mut self, token: Option<Token>) -> Result<()> {
        match self.phase {
            Phase::Initial => self.handle_initial_phase(token),
            Phase::Root => self.handle_root_phase(token),
            Phase::Main => self.process_using(self.mode, token),
            Phase::GenericCdataOrRcdata => self.handle_raw_text_phase(token),
            Phase::TrailingEnd => self.handle_trailing_end_phase(token),
        }
    }

    /// "Process the token using the rules for the X insertion mode."
    pub(super) fn process_using(
        &mut self,
        mode: InsertionMode,
        token: Option<Token>,
    ) -> Result<()> {
        match mode {
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
        }
    }

    /// "Reprocess the token." The end of file needs no buffering: the
    /// tokenizer keeps reporting it.
    pub(super) fn reprocess(&mut self, token: Option<Token>) {
        if let Some(token) = token {
            self.pending.push(token);
        }
    }

    /// Switch the insertion mode and reprocess the token.
    pub(super) fn reprocess_in(&mut self, mode: InsertionMode, token: Option<Token>) {
        self.mode = mode;
        self.reprocess(token);
    }

    /// Queue the leading space characters of a character token separately
    /// from the rest. Returns false if there was nothing to split.
    pub(super) fn split_leading_whitespace(&mut self, data: &str) -> bool {
        let split = data
            .find(|c: char| !is_space_character(c))
            .unwrap_or(data.len());
        if split == 0 || split == data.len() {
            return false;
        }
        self.pending.push(Token::text(&data[split..]));
        self.pending.push(Token::text(&data[..split]));
        true
    }

    pub(super) fn parse_error(&mut self, message: impl Into<String>) {
        self.collect_tokenizer_errors();
        self.errors
            .push(ParseError::new(message, self.tokenizer.position()));
    }

    fn collect_tokenizer_errors(&mut self) {
        let tokenizer_errors = self.tokenizer.take_errors();
        self.errors.extend(tokenizer_errors);
    }

    pub(super) fn fault(message: impl Into<String>) -> HtmlError {
        HtmlError::ImplementationFault(message.into())
    }

    /// Switch the tokenizer's content model for the contents of a raw text
    /// element.
    pub(super) fn switch_content_model(&mut self, content_model: ContentModel) {
        self.tokenizer.switch_content_model(content_model);
    }

    /// [§ 13.2.6.1 "Insert an HTML element"](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    /// followed by the generic raw text or RCDATA element parsing algorithm.
    ///
    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    pub(super) fn insert_raw_text_element(
        &mut self,
        token: &Token,
        content_model: ContentModel,
    ) -> Result<ElementId> {
        let id = self.insert_html_element(token)?;
        self.switch_content_model(content_model);
        self.phase = Phase::GenericCdataOrRcdata;
        Ok(id)
    }

    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one."
    pub(super) fn skip_leading_newline(&mut self) {
        let Some(Token::Character { data, .. }) = self.pending.current(&mut self.tokenizer) else {
            return;
        };
        let Some(rest) = data.strip_prefix('\n') else {
            return;
        };
        if rest.is_empty() {
            self.pending.discard();
        } else {
            let rest = Token::text(rest);
            let _ = self.pending.replace(rest);
        }
    }
}

// =============================================================================
// Construction phases
// =============================================================================

impl TreeConstructor {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    fn handle_initial_phase(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE
            // FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020
            // SPACE - Ignore the token."
            Some(Token::Character {
                whitespace_only: true,
                ..
            }) => {}

            // "A comment token - Insert a comment as the last child of the Document object."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - If the DOCTYPE token's name is not "html", ... then there
            // is a parse error."
            Some(Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            }) => {
                if name.as_deref() != Some("html") {
                    self.parse_error("Erroneous DOCTYPE.");
                }
                self.compat_mode = compatibility_mode_for_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                );
                self.events.push_back(Event::document_type(
                    name.clone(),
                    public_identifier.clone(),
                    system_identifier.clone(),
                ));
                self.phase = Phase::Root;
            }

            // "Anything else - If the document is not an iframe srcdoc document, then this
            // is a parse error; if the parser cannot change the mode flag is false, set
            // the Document to quirks mode. In any case, switch the insertion mode to
            // "before html", then reprocess the token."
            _ => {
                let message = match &token {
                    Some(Token::StartTag { name, .. }) => {
                        format!("Unexpected start tag ({name}). Expected DOCTYPE.")
                    }
                    Some(Token::EndTag { name, .. }) => {
                        format!("Unexpected end tag ({name}). Expected DOCTYPE.")
                    }
                    None => "Unexpected end of stream. Expected DOCTYPE.".to_string(),
                    _ => "Unexpected non-space characters. Expected DOCTYPE.".to_string(),
                };
                self.parse_error(message);
                self.compat_mode = CompatibilityMode::Quirks;
                self.phase = Phase::Root;
                self.reprocess(token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_root_phase(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Misplaced or duplicate DOCTYPE. Ignored.");
            }

            // "A comment token - Insert a comment as the last child of the Document object."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A character token that is one of ... whitespace - Ignore the token."
            Some(Token::Character {
                whitespace_only: true,
                ..
            }) => {}

            // "A start tag whose tag name is "html" - Create an element for the token in
            // the HTML namespace, with the Document as the intended parent. Append it to
            // the Document object. Put this element in the stack of open elements. Switch
            // the insertion mode to "before head"."
            Some(tag @ Token::StartTag { name, .. }) if name == "html" => {
                let _ = self.insert_html_element(tag)?;
                self.phase = Phase::Main;
                self.mode = InsertionMode::BeforeHead;
            }

            // "Any other end tag - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) before html."));
            }

            // "Anything else - Create an html element whose node document is the Document
            // object. Append it to the Document object. Put this element in the stack of
            // open elements. Switch the insertion mode to "before head", then reprocess
            // the token."
            _ => {
                let _ = self.insert_element("html", Vec::new());
                self.phase = Phase::Main;
                self.mode = InsertionMode::BeforeHead;
                self.reprocess(token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    ///
    /// The current node is a raw text or RCDATA element. Only its contents and
    /// its own end tag are expected.
    fn handle_raw_text_phase(&mut self, token: Option<Token>) -> Result<()> {
        let current_name = self
            .current_node_name()
            .map(str::to_string)
            .ok_or_else(|| Self::fault("raw text phase without a current node"))?;

        match &token {
            // "A character token - Insert the token's character."
            Some(Token::Character {
                data,
                whitespace_only,
            }) => self.insert_character(data, *whitespace_only),

            // "Any other end tag - Pop the current node off the stack of open elements.
            // Switch the insertion mode to the original insertion mode."
            Some(Token::EndTag { name, .. }) if *name == current_name => {
                let _ = self.pop_current()?;
                self.phase = Phase::Main;
            }

            // "An end-of-file token - Parse error. ... Pop the current node off the stack
            // of open elements. Switch the insertion mode to the original insertion mode
            // and reprocess the token."
            None => {
                self.parse_error(format!(
                    "Unexpected end of stream in {current_name}. Missing closing tag."
                ));
                self.close_raw_text_element(token)?;
            }

            Some(_) => {
                self.parse_error(format!(
                    "Unexpected token in {current_name}. Closing it early."
                ));
                self.close_raw_text_element(token)?;
            }
        }
        Ok(())
    }

    fn close_raw_text_element(&mut self, token: Option<Token>) -> Result<()> {
        self.switch_content_model(ContentModel::Pcdata);
        let _ = self.pop_current()?;
        self.phase = Phase::Main;
        self.reprocess(token);
        Ok(())
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    /// and [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    fn handle_trailing_end_phase(&mut self, token: Option<Token>) -> Result<()> {
        let after_frameset = self.mode == InsertionMode::AfterFrameset;

        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A comment token - Insert a comment as the last child of the Document object."
            Some(Token::Comment { data }) => {
                let _ = warn_once(
                    "HTML Parser",
                    "comment after </html> is emitted inside the open elements",
                );
                self.insert_comment(data);
            }

            // "A DOCTYPE token, a character token that is whitespace, a start tag whose tag
            // name is "html" - Process the token using the rules for the "in body"
            // insertion mode."
            Some(Token::Doctype { .. } | Token::Character { whitespace_only: true, .. }) => {
                self.process_using(InsertionMode::InBody, token)?;
            }
            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "An end-of-file token - Stop parsing."
            None => self.stop_parsing()?,

            // "A start tag whose tag name is "noframes" - Process the token using the rules
            // for the "in head" insertion mode."
            Some(Token::StartTag { name, .. }) if after_frameset && name == "noframes" => {
                self.process_using(InsertionMode::InHead, token)?;
            }

            // "Anything else - Parse error. Ignore the token." (after after frameset)
            Some(_) if after_frameset => {
                self.parse_error("Unexpected token after </html>. Ignored.");
            }

            // "Anything else - Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            Some(_) => {
                self.parse_error("Unexpected token after </html>.");
                self.phase = Phase::Main;
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
        Ok(())
    }
}
