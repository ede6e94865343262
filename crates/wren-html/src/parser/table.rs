//! Table insertion modes.
//!
//! Foster parenting moves misplaced content in front of the table in a
//! tree. Events for the table have already been reported by then, so
//! misplaced content is reported where it occurs instead.

use wren_common::warning::warn_once;

use super::core::{InsertionMode, TreeConstructor};
use super::scope::Scope;
use crate::error::Result;
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl TreeConstructor {
    /// Process a token that is misplaced in a table using the "in body"
    /// rules.
    ///
    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn foster_parent(&mut self, token: Option<Token>) -> Result<()> {
        let _ = warn_once(
            "HTML Parser",
            "content misplaced in a table is emitted where it occurs",
        );
        self.process_using(InsertionMode::InBody, token)
    }

    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "A character token, if the current node is table, tbody, template, tfoot,
            // thead, or tr element" - whitespace is inserted, anything else goes through
            // the "in table text" anything-else rules.
            Some(Token::Character {
                data,
                whitespace_only,
            }) if self.current_node_is_one_of(&["table", "tbody", "tfoot", "thead", "tr"]) => {
                if *whitespace_only {
                    self.insert_character(data, true);
                } else {
                    self.parse_error("Unexpected non-space characters in table.");
                    self.foster_parent(token)?;
                }
            }

            // "A comment token - Insert a comment."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Unexpected DOCTYPE in table. Ignored.");
            }

            // "A start tag whose tag name is "caption" - Clear the stack back to a table
            // context. Insert a marker at the end of the list of active formatting
            // elements. Insert an HTML element for the token, then switch the insertion
            // mode to "in caption"."
            Some(tag @ Token::StartTag { name, .. }) if name == "caption" => {
                self.clear_stack_back_to_table_context()?;
                self.formatting.push_marker();
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InCaption;
            }

            // "A start tag whose tag name is "colgroup" - Clear the stack back to a table
            // context. Insert an HTML element for the token, then switch the insertion
            // mode to "in column group"."
            Some(tag @ Token::StartTag { name, .. }) if name == "colgroup" => {
                self.clear_stack_back_to_table_context()?;
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InColumnGroup;
            }

            // "A start tag whose tag name is "col" - Clear the stack back to a table
            // context. Insert an HTML element for a "colgroup" start tag token with no
            // attributes, then switch the insertion mode to "in column group". Reprocess
            // the current token."
            Some(Token::StartTag { name, .. }) if name == "col" => {
                self.clear_stack_back_to_table_context()?;
                let _ = self.insert_element("colgroup", Vec::new());
                self.reprocess_in(InsertionMode::InColumnGroup, token);
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead" - Clear the
            // stack back to a table context. Insert an HTML element for the token, then
            // switch the insertion mode to "in table body"."
            Some(tag @ Token::StartTag { name, .. }) if TABLE_SECTIONS.contains(&name.as_str()) => {
                self.clear_stack_back_to_table_context()?;
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InTableBody;
            }

            // "A start tag whose tag name is one of: "td", "th", "tr" - Clear the stack
            // back to a table context. Insert an HTML element for a "tbody" start tag token
            // with no attributes, then switch the insertion mode to "in table body".
            // Reprocess the current token."
            Some(Token::StartTag { name, .. }) if matches!(name.as_str(), "td" | "th" | "tr") => {
                self.clear_stack_back_to_table_context()?;
                let _ = self.insert_element("tbody", Vec::new());
                self.reprocess_in(InsertionMode::InTableBody, token);
            }

            // "A start tag whose tag name is "table" - Parse error. If the stack of open
            // elements does not have a table element in table scope, ignore the token.
            // Otherwise: Pop elements from this stack until a table element has been
            // popped from the stack. Reset the insertion mode appropriately. Reprocess
            // the token."
            Some(Token::StartTag { name, .. }) if name == "table" => {
                self.parse_error("Unexpected start tag (table) implies end tag (table).");
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table")?;
                    self.reset_insertion_mode_appropriately();
                    self.reprocess(token);
                }
            }

            // "An end tag whose tag name is "table" - If the stack of open elements does
            // not have a table element in table scope, this is a parse error; ignore the
            // token. Otherwise: Pop elements from this stack until a table element has
            // been popped from the stack. Reset the insertion mode appropriately."
            Some(Token::EndTag { name, .. }) if name == "table" => {
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table")?;
                    self.reset_insertion_mode_appropriately();
                } else {
                    self.parse_error("Unexpected end tag (table). Ignored.");
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr" - Parse error. Ignore the
            // token."
            Some(Token::EndTag { name, .. })
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                        | "th" | "thead" | "tr"
                ) =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in table. Ignored."));
            }

            // "A start tag whose tag name is one of: "style", "script", "template" ... -
            // Process the token using the rules for the "in head" insertion mode."
            Some(Token::StartTag { name, .. }) if matches!(name.as_str(), "style" | "script") => {
                self.process_using(InsertionMode::InHead, token)?;
            }

            // "A start tag whose tag name is "input" - If the token does not have an
            // attribute with the name "type", or if it does, but that attribute's value is
            // not an ASCII case-insensitive match for the string "hidden", then: act as
            // described in the "anything else" entry below. Otherwise: Parse error.
            // Insert an HTML element for the token. Pop that input element off the stack
            // of open elements."
            Some(
                tag @ Token::StartTag {
                    name, attributes, ..
                },
            ) if name == "input"
                && attributes.iter().any(|attribute| {
                    attribute.name == "type" && attribute.value.eq_ignore_ascii_case("hidden")
                }) =>
            {
                self.parse_error("Unexpected hidden input in table.");
                self.insert_empty_element(tag)?;
            }

            // "A start tag whose tag name is "form" - Parse error. If ... the form element
            // pointer is not null, ignore the token. Otherwise: Insert an HTML element for
            // the token, and set the form element pointer to point to the element
            // created. Pop that form element off the stack of open elements."
            Some(tag @ Token::StartTag { name, .. }) if name == "form" => {
                self.parse_error("Unexpected start tag (form) in table.");
                if self.form_element.is_none() {
                    let form = self.insert_html_element(tag)?;
                    self.form_element = Some(form);
                    let _ = self.pop_current()?;
                }
            }

            // "An end-of-file token - Process the token using the rules for the "in body"
            // insertion mode."
            None => self.process_using(InsertionMode::InBody, token)?,

            // "Anything else - Parse error. Enable foster parenting, process the token
            // using the rules for the "in body" insertion mode, and then disable foster
            // parenting."
            Some(other) => {
                let message = match other {
                    Token::StartTag { name, .. } => format!("Unexpected start tag ({name}) in table."),
                    Token::EndTag { name, .. } => format!("Unexpected end tag ({name}) in table."),
                    _ => "Unexpected non-space characters in table.".to_string(),
                };
                self.parse_error(message);
                self.foster_parent(token)?;
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "An end tag whose tag name is "caption""
            Some(Token::EndTag { name, .. }) if name == "caption" => {
                if self.has_element_in_table_scope("caption") {
                    self.close_caption()?;
                } else {
                    self.parse_error("Unexpected end tag (caption). Ignored.");
                }
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup", "tbody",
            // "td", "tfoot", "th", "thead", "tr" / An end tag whose tag name is "table" -
            // If the stack of open elements does not have a caption element in table
            // scope, this is a parse error; ignore the token. Otherwise: ... Reprocess the
            // token."
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                self.close_caption_and_reprocess(token)?;
            }
            Some(Token::EndTag { name, .. }) if name == "table" => {
                self.close_caption_and_reprocess(token)?;
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup", "html",
            // "tbody", "td", "tfoot", "th", "thead", "tr" - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                        | "thead" | "tr"
                ) =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in caption. Ignored."));
            }

            // "Anything else - Process the token using the rules for the "in body"
            // insertion mode."
            _ => self.process_using(InsertionMode::InBody, token)?,
        }
        Ok(())
    }

    fn close_caption_and_reprocess(&mut self, token: Option<Token>) -> Result<()> {
        if !self.has_element_in_table_scope("caption") {
            self.parse_error("Table structure inside caption without an open caption. Ignored.");
            return Ok(());
        }
        self.parse_error("Caption closed implicitly.");
        self.close_caption()?;
        self.reprocess(token);
        Ok(())
    }

    /// "Generate implied end tags. Now, if the current node is not a caption
    /// element, then this is a parse error. Pop elements from this stack until
    /// a caption element has been popped from the stack. Clear the list of
    /// active formatting elements up to the last marker. Switch the insertion
    /// mode to "in table"."
    fn close_caption(&mut self) -> Result<()> {
        self.generate_implied_end_tags()?;
        if !self.current_node_is("caption") {
            self.report_unclosed_elements("caption");
        }
        self.pop_until_tag("caption")?;
        self.clear_active_formatting_elements_to_last_marker();
        self.mode = InsertionMode::InTable;
        Ok(())
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: Option<Token>) -> Result<()> {
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

            Some(Token::Comment { data }) => self.insert_comment(data),

            Some(Token::Doctype { .. }) => {
                self.parse_error("Unexpected DOCTYPE in column group. Ignored.");
            }

            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is "col" - Insert an HTML element for the token.
            // Immediately pop the current node off the stack of open elements."
            Some(tag @ Token::StartTag { name, .. }) if name == "col" => {
                self.insert_empty_element(tag)?;
            }

            // "An end tag whose tag name is "colgroup" - If the current node is not a
            // colgroup element, then this is a parse error; ignore the token. Otherwise,
            // pop the current node from the stack of open elements. Switch the insertion
            // mode to "in table"."
            Some(Token::EndTag { name, .. }) if name == "colgroup" => {
                if self.current_node_is("colgroup") {
                    let _ = self.pop_current()?;
                    self.mode = InsertionMode::InTable;
                } else {
                    self.parse_error("Unexpected end tag (colgroup). Ignored.");
                }
            }

            // "An end tag whose tag name is "col" - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. }) if name == "col" => {
                self.parse_error("Unexpected end tag (col). Ignored.");
            }

            // "An end-of-file token - Process the token using the rules for the "in body"
            // insertion mode."
            None => self.process_using(InsertionMode::InBody, token)?,

            // "Anything else - If the current node is not a colgroup element, then this is
            // a parse error; ignore the token. Otherwise, pop the current node from the
            // stack of open elements. Switch the insertion mode to "in table". Reprocess
            // the token."
            Some(_) => {
                if self.current_node_is("colgroup") {
                    let _ = self.pop_current()?;
                    self.reprocess_in(InsertionMode::InTable, token);
                } else {
                    self.parse_error("Unexpected token in column group. Ignored.");
                }
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "A start tag whose tag name is "tr" - Clear the stack back to a table body
            // context. Insert an HTML element for the token, then switch the insertion
            // mode to "in row"."
            Some(tag @ Token::StartTag { name, .. }) if name == "tr" => {
                self.clear_stack_back_to_table_body_context()?;
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "th", "td" - Parse error. Clear the
            // stack back to a table body context. Insert an HTML element for a "tr" start
            // tag token with no attributes, then switch the insertion mode to "in row".
            // Reprocess the current token."
            Some(Token::StartTag { name, .. }) if matches!(name.as_str(), "td" | "th") => {
                self.parse_error(format!("Unexpected start tag ({name}) outside a row."));
                self.clear_stack_back_to_table_body_context()?;
                let _ = self.insert_element("tr", Vec::new());
                self.reprocess_in(InsertionMode::InRow, token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead" - If the
            // stack of open elements does not have an element in table scope that is an
            // HTML element with the same tag name as the token, this is a parse error;
            // ignore the token. Otherwise: Clear the stack back to a table body context.
            // Pop the current node from the stack of open elements. Switch the insertion
            // mode to "in table"."
            Some(Token::EndTag { name, .. }) if TABLE_SECTIONS.contains(&name.as_str()) => {
                if self.has_element_in_table_scope(name) {
                    self.clear_stack_back_to_table_body_context()?;
                    let _ = self.pop_current()?;
                    self.mode = InsertionMode::InTable;
                } else {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                }
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup", "tbody",
            // "tfoot", "thead" / An end tag whose tag name is "table" - If the stack of
            // open elements does not have a tbody, thead, or tfoot element in table scope,
            // this is a parse error; ignore the token. Otherwise: Clear the stack back to a
            // table body context. Pop the current node from the stack of open elements.
            // Switch the insertion mode to "in table". Reprocess the token."
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section_and_reprocess(token)?;
            }
            Some(Token::EndTag { name, .. }) if name == "table" => {
                self.close_table_section_and_reprocess(token)?;
            }

            // "An end tag whose tag name is one of: "body", "caption", "col", "colgroup",
            // "html", "td", "th", "tr" - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in table body. Ignored."));
            }

            // "Anything else - Process the token using the rules for the "in table"
            // insertion mode."
            _ => self.process_using(InsertionMode::InTable, token)?,
        }
        Ok(())
    }

    fn close_table_section_and_reprocess(&mut self, token: Option<Token>) -> Result<()> {
        if !self.has_any_in_scope(TABLE_SECTIONS, Scope::Table) {
            self.parse_error("Table structure without an open table section. Ignored.");
            return Ok(());
        }
        self.clear_stack_back_to_table_body_context()?;
        let _ = self.pop_current()?;
        self.reprocess_in(InsertionMode::InTable, token);
        Ok(())
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(super) fn handle_in_row_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "A start tag whose tag name is one of: "th", "td" - Clear the stack back to a
            // table row context. Insert an HTML element for the token, then switch the
            // insertion mode to "in cell". Insert a marker at the end of the list of
            // active formatting elements."
            Some(tag @ Token::StartTag { name, .. }) if matches!(name.as_str(), "td" | "th") => {
                self.clear_stack_back_to_table_row_context()?;
                let _ = self.insert_html_element(tag)?;
                self.mode = InsertionMode::InCell;
                self.formatting.push_marker();
            }

            // "An end tag whose tag name is "tr" - If the stack of open elements does not
            // have a tr element in table scope, this is a parse error; ignore the token.
            // Otherwise: Clear the stack back to a table row context. Pop the current node
            // (which will be a tr element) from the stack of open elements. Switch the
            // insertion mode to "in table body"."
            Some(Token::EndTag { name, .. }) if name == "tr" => {
                if self.has_element_in_table_scope("tr") {
                    self.close_row()?;
                } else {
                    self.parse_error("Unexpected end tag (tr). Ignored.");
                }
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup", "tbody",
            // "tfoot", "thead", "tr" / An end tag whose tag name is "table" - If the stack
            // of open elements does not have a tr element in table scope, this is a parse
            // error; ignore the token. Otherwise: ... Reprocess the token."
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                self.close_row_and_reprocess(token)?;
            }
            Some(Token::EndTag { name, .. }) if name == "table" => {
                self.close_row_and_reprocess(token)?;
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead" - If the
            // stack of open elements does not have an element in table scope that is an
            // HTML element with the same tag name as the token, this is a parse error;
            // ignore the token. If the stack of open elements does not have a tr element in
            // table scope, ignore the token. Otherwise: ... Reprocess the token."
            Some(Token::EndTag { name, .. }) if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_table_scope(name) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                } else if self.has_element_in_table_scope("tr") {
                    self.close_row()?;
                    self.reprocess(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col", "colgroup",
            // "html", "td", "th" - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in row. Ignored."));
            }

            // "Anything else - Process the token using the rules for the "in table"
            // insertion mode."
            _ => self.process_using(InsertionMode::InTable, token)?,
        }
        Ok(())
    }

    fn close_row_and_reprocess(&mut self, token: Option<Token>) -> Result<()> {
        if !self.has_element_in_table_scope("tr") {
            self.parse_error("Table structure without an open row. Ignored.");
            return Ok(());
        }
        self.close_row()?;
        self.reprocess(token);
        Ok(())
    }

    fn close_row(&mut self) -> Result<()> {
        self.clear_stack_back_to_table_row_context()?;
        let _ = self.pop_current()?;
        self.mode = InsertionMode::InTableBody;
        Ok(())
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(super) fn handle_in_cell_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "An end tag whose tag name is one of: "td", "th" - If the stack of open
            // elements does not have an element in table scope that is an HTML element
            // with the same tag name as that of the token, then this is a parse error;
            // ignore the token. Otherwise: Generate implied end tags. Now, if the current
            // node is not an HTML element with the same tag name as the token, then this
            // is a parse error. Pop elements from the stack of open elements until an
            // HTML element with the same tag name as the token has been popped from the
            // stack. Clear the list of active formatting elements up to the last marker.
            // Switch the insertion mode to "in row"."
            Some(Token::EndTag { name, .. }) if matches!(name.as_str(), "td" | "th") => {
                if !self.has_element_in_table_scope(name) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                    return Ok(());
                }
                self.generate_implied_end_tags()?;
                if !self.current_node_is(name) {
                    self.report_unclosed_elements(name);
                }
                self.pop_until_tag(name)?;
                self.clear_active_formatting_elements_to_last_marker();
                self.mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup", "tbody",
            // "td", "tfoot", "th", "thead", "tr" - Assert: The stack of open elements has a
            // td or th element in table scope. Close the cell (see below) and reprocess
            // the token."
            Some(Token::StartTag { name, .. })
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                if self.has_any_in_scope(&["td", "th"], Scope::Table) {
                    self.close_cell()?;
                    self.reprocess(token);
                } else {
                    self.parse_error(format!("Unexpected start tag ({name}) outside a cell."));
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col", "colgroup",
            // "html" - Parse error. Ignore the token."
            Some(Token::EndTag { name, .. })
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.parse_error(format!("Unexpected end tag ({name}) in cell. Ignored."));
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot", "thead", "tr"
            // - If the stack of open elements does not have an element in table scope that
            // is an HTML element with the same tag name as that of the token, then this is
            // a parse error; ignore the token. Otherwise, close the cell (see below) and
            // reprocess the token."
            Some(Token::EndTag { name, .. })
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if self.has_element_in_table_scope(name) {
                    self.close_cell()?;
                    self.reprocess(token);
                } else {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                }
            }

            // "Anything else - Process the token using the rules for the "in body"
            // insertion mode."
            _ => self.process_using(InsertionMode::InBody, token)?,
        }
        Ok(())
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Generate implied end tags. If the current node is not now a td element
    /// or a th element, then this is a parse error. Pop elements from the stack
    /// of open elements until a td element or a th element has been popped from
    /// the stack. Clear the list of active formatting elements up to the last
    /// marker. Switch the insertion mode to "in row"."
    fn close_cell(&mut self) -> Result<()> {
        self.generate_implied_end_tags()?;
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.report_unclosed_elements("td");
        }
        self.pop_until_one_of(&["td", "th"])?;
        self.clear_active_formatting_elements_to_last_marker();
        self.mode = InsertionMode::InRow;
        Ok(())
    }
}
