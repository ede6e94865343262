//! Insertion modes before the body: "before head", "in head",
//! "in head noscript" and "after head".

use wren_common::warning::warn_once;

use super::core::{InsertionMode, TreeConstructor};
use crate::error::Result;
use crate::options::ContentModel;
use crate::tokenizer::Token;

impl TreeConstructor {
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: Option<Token>) -> Result<()> {
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

            // "A comment token - Insert a comment."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Misplaced or duplicate DOCTYPE. Ignored.");
            }

            // "A start tag whose tag name is "html" - Process the token using the rules
            // for the "in body" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is "head" - Insert an HTML element for the
            // token. Set the head element pointer to the newly created head element.
            // Switch the insertion mode to "in head"."
            Some(tag @ Token::StartTag { name, .. }) if name == "head" => {
                let head = self.insert_html_element(tag)?;
                self.head_element = Some(head);
                self.mode = InsertionMode::InHead;
            }

            // "Any other end tag - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) before head. Ignored."));
            }

            // "Anything else - Insert an HTML element for a "head" start tag token with no
            // attributes. Set the head element pointer to the newly created head element.
            // Switch the insertion mode to "in head". Reprocess the current token."
            _ => {
                let head = self.insert_element("head", Vec::new());
                self.head_element = Some(head);
                self.reprocess_in(InsertionMode::InHead, token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE
            // FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020
            // SPACE - Insert the character."
            Some(Token::Character {
                data,
                whitespace_only: true,
            }) => self.insert_character(data, true),

            // "A comment token - Insert a comment."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Misplaced or duplicate DOCTYPE. Ignored.");
            }

            // "A start tag whose tag name is "html" - Process the token using the rules
            // for the "in body" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound",
            // "link" - Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "A start tag whose tag name is "meta" - Insert an HTML element for the
            // token. Immediately pop the current node off the stack of open elements."
            Some(tag @ Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "command" | "link" | "meta"
                ) =>
            {
                self.insert_empty_element(tag)?;
            }

            // "A start tag whose tag name is "title" - Follow the generic RCDATA element
            // parsing algorithm."
            Some(tag @ Token::StartTag { name, .. }) if name == "title" => {
                let _ = self.insert_raw_text_element(tag, ContentModel::Rcdata)?;
            }

            // "A start tag whose tag name is "noscript", if the scripting flag is enabled
            // / A start tag whose tag name is one of: "noframes", "style" - Follow the
            // generic raw text element parsing algorithm."
            Some(tag @ Token::StartTag { name, .. })
                if matches!(name.as_str(), "noframes" | "style")
                    || (name == "noscript" && self.options.scripting) =>
            {
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }

            // "A start tag whose tag name is "noscript", if the scripting flag is disabled -
            // Insert an HTML element for the token. Switch the insertion mode to "in head
            // noscript"."
            Some(tag @ Token::StartTag { name, .. }) if name == "noscript" => {
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InHeadNoscript;
            }

            // "A start tag whose tag name is "script" - ... Switch the tokenizer to the
            // script data state."
            Some(tag @ Token::StartTag { name, .. }) if name == "script" => {
                let _ = warn_once("HTML Parser", "<script> content is not executed");
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }

            // "An end tag whose tag name is "head" - Pop the current node (which will be
            // the head element) off the stack of open elements. Switch the insertion mode
            // to "after head"."
            Some(Token::EndTag { name, .. }) if name == "head" => {
                let _ = self.pop_current()?;
                self.mode = InsertionMode::AfterHead;
            }

            // "A start tag whose tag name is "head" / Any other end tag - Parse error.
            // Ignore the token."
            Some(Token::StartTag { name, .. }) if name == "head" => {
                self.parse_error("Unexpected start tag (head) in head. Ignored.");
            }
            Some(Token::EndTag { name, .. })
                if !matches!(name.as_str(), "body" | "html" | "br") =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in head. Ignored."));
            }

            // "Anything else - Pop the current node (which will be the head element) off
            // the stack of open elements. Switch the insertion mode to "after head".
            // Reprocess the token."
            _ => {
                let _ = self.pop_current()?;
                self.reprocess_in(InsertionMode::AfterHead, token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: Option<Token>) -> Result<()> {
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

            // "A start tag whose tag name is "html" - Process the token using the rules
            // for the "in body" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "An end tag whose tag name is "noscript" - Pop the current node (which will
            // be a noscript element) from the stack of open elements; the new current node
            // will be a head element. Switch the insertion mode to "in head"."
            Some(Token::EndTag { name, .. }) if name == "noscript" => {
                let _ = self.pop_current()?;
                self.mode = InsertionMode::InHead;
            }

            // "A character token that is whitespace, A comment token, A start tag whose
            // tag name is one of: "basefont", "bgsound", "link", "meta", "noframes",
            // "style" - Process the token using the rules for the "in head" insertion
            // mode."
            Some(
                Token::Character {
                    whitespace_only: true,
                    ..
                }
                | Token::Comment { .. },
            ) => self.process_using(InsertionMode::InHead, token)?,
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using(InsertionMode::InHead, token)?;
            }

            // "A start tag whose tag name is one of: "head", "noscript" / Any other end tag
            // - Parse error. Ignore the token."
            Some(Token::StartTag { name, .. }) if matches!(name.as_str(), "head" | "noscript") => {
                self.parse_error(format!("Unexpected start tag ({name}) in noscript. Ignored."));
            }
            Some(Token::EndTag { name, .. }) if name != "br" => {
                self.parse_error(format!("Unexpected end tag ({name}) in noscript. Ignored."));
            }

            // "Anything else - Parse error. Pop the current node (which will be a noscript
            // element) from the stack of open elements; the new current node will be a
            // head element. Switch the insertion mode to "in head". Reprocess the token."
            _ => {
                self.parse_error("Unexpected token in noscript in head.");
                let _ = self.pop_current()?;
                self.reprocess_in(InsertionMode::InHead, token);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: Option<Token>) -> Result<()> {
        if let Some(Token::Character { data, .. }) = &token
            && self.split_leading_whitespace(data)
        {
            return Ok(());
        }

        match &token {
            // "A character token that is whitespace - Insert the character."
            Some(Token::Character {
                data,
                whitespace_only: true,
            }) => self.insert_character(data, true),

            // "A comment token - Insert a comment."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Misplaced or duplicate DOCTYPE. Ignored.");
            }

            // "A start tag whose tag name is "html" - Process the token using the rules
            // for the "in body" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is "body" - Insert an HTML element for the
            // token. Set the frameset-ok flag to "not ok". Switch the insertion mode to
            // "in body"."
            Some(tag @ Token::StartTag { name, .. }) if name == "body" => {
                self.flush_pending_head_end();
                let _ = self.insert_html_element(tag)?;
                self.frameset_ok = false;
                self.mode = InsertionMode::InBody;
            }

            // "A start tag whose tag name is "frameset" - Insert an HTML element for the
            // token. Switch the insertion mode to "in frameset"."
            Some(tag @ Token::StartTag { name, .. }) if name == "frameset" => {
                self.flush_pending_head_end();
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link",
            // "meta", "noframes", "script", "style", "template", "title" - Parse error.
            // Push the node pointed to by the head element pointer onto the stack of open
            // elements. Process the token using the rules for the "in head" insertion
            // mode. Remove the node pointed to by the head element pointer from the stack
            // of open elements. (It might not be the current node at this point.)"
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "title"
                ) =>
            {
                self.parse_error(format!("Unexpected start tag ({name}) after head."));
                let head = self
                    .head_element
                    .ok_or_else(|| Self::fault("after head mode without a head element"))?;
                self.open_elements.push(head);
                self.process_using(InsertionMode::InHead, token)?;
                self.remove_head_from_stack();
            }

            // "A start tag whose tag name is "head" / Any other end tag - Parse error.
            // Ignore the token."
            Some(Token::StartTag { name, .. }) if name == "head" => {
                self.parse_error("Unexpected start tag (head) after head. Ignored.");
            }
            Some(Token::EndTag { name, .. })
                if !matches!(name.as_str(), "body" | "html" | "br") =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) after head. Ignored."));
            }

            // "Anything else - Insert an HTML element for a "body" start tag token with no
            // attributes. Switch the insertion mode to "in body". Reprocess the current
            // token."
            _ => {
                self.flush_pending_head_end();
                let _ = self.insert_element("body", Vec::new());
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
        Ok(())
    }
}
