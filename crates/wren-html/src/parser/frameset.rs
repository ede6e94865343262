//! The insertion modes that follow the body: "after body", "in frameset"
//! and "after frameset".

use wren_common::warning::warn_once;

use super::core::{InsertionMode, Phase, TreeConstructor};
use crate::error::Result;
use crate::tokenizer::Token;

impl TreeConstructor {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE
            // FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020
            // SPACE - Process the token using the rules for the "in body" insertion mode."
            Some(Token::Character {
                whitespace_only: true,
                ..
            }) => self.process_using(InsertionMode::InBody, token)?,

            // "A comment token - Insert a comment as the last child of the first element in
            // the stack of open elements (the html element)."
            Some(Token::Comment { data }) => {
                let _ = warn_once(
                    "HTML Parser",
                    "comment after </body> is emitted inside the body",
                );
                self.insert_comment(data);
            }

            Some(Token::Doctype { .. }) => {
                self.parse_error("Unexpected DOCTYPE after body. Ignored.");
            }

            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "An end tag whose tag name is "html" - ... Otherwise, switch the insertion
            // mode to "after after body"."
            Some(Token::EndTag { name, .. }) if name == "html" => {
                self.phase = Phase::TrailingEnd;
            }

            // "An end-of-file token - Stop parsing."
            None => self.stop_parsing()?,

            // "Anything else - Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            Some(_) => {
                self.parse_error("Unexpected content after body.");
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A character token that is one of ... SPACE - Insert the character."
            Some(Token::Character {
                data,
                whitespace_only: true,
            }) => self.insert_character(data, true),

            Some(Token::Comment { data }) => self.insert_comment(data),

            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is "frameset" - Insert an HTML element for the
            // token."
            Some(tag @ Token::StartTag { name, .. }) if name == "frameset" => {
                let _ = self.insert_html_element(tag)?;
            }

            // "An end tag whose tag name is "frameset" - If the current node is the root
            // html element, then this is a parse error; ignore the token. Otherwise, pop
            // the current node from the stack of open elements. If ... the current node is
            // no longer a frameset element, then switch the insertion mode to "after
            // frameset"."
            Some(Token::EndTag { name, .. }) if name == "frameset" => {
                if self.open_elements.len() <= 1 {
                    self.parse_error("Unexpected end tag (frameset). Ignored.");
                } else {
                    let _ = self.pop_current()?;
                    if !self.current_node_is("frameset") {
                        self.mode = InsertionMode::AfterFrameset;
                    }
                }
            }

            // "A start tag whose tag name is "frame" - Insert an HTML element for the
            // token. Immediately pop the current node off the stack of open elements."
            Some(tag @ Token::StartTag { name, .. }) if name == "frame" => {
                self.insert_empty_element(tag)?;
            }

            // "A start tag whose tag name is "noframes" - Process the token using the rules
            // for the "in head" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "noframes" => {
                self.process_using(InsertionMode::InHead, token)?;
            }

            // "An end-of-file token - If the current node is not the root html element,
            // then this is a parse error. Stop parsing."
            None => {
                if self.open_elements.len() > 1 {
                    self.parse_error("Unexpected end of stream in frameset.");
                }
                self.stop_parsing()?;
            }

            // "Anything else - Parse error. Ignore the token."
            Some(_) => self.parse_error("Unexpected content in frameset. Ignored."),
        }
        Ok(())
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            Some(Token::Character {
                data,
                whitespace_only: true,
            }) => self.insert_character(data, true),

            Some(Token::Comment { data }) => self.insert_comment(data),

            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "An end tag whose tag name is "html" - Switch the insertion mode to "after
            // after frameset"."
            Some(Token::EndTag { name, .. }) if name == "html" => {
                self.phase = Phase::TrailingEnd;
            }

            Some(Token::StartTag { name, .. }) if name == "noframes" => {
                self.process_using(InsertionMode::InHead, token)?;
            }

            None => self.stop_parsing()?,

            // "Anything else - Parse error. Ignore the token."
            Some(_) => self.parse_error("Unexpected content after frameset. Ignored."),
        }
        Ok(())
    }
}
