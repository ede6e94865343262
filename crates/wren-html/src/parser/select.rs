use super::core::{InsertionMode, TreeConstructor};
use crate::error::Result;
use crate::tokenizer::Token;

const TABLE_STRUCTURE: &[&str] = &["caption", "table", "tbody", "td", "tfoot", "th", "thead", "tr"];

impl TreeConstructor {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn handle_in_select_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "Any other character token - Insert the token's character."
            Some(Token::Character {
                data,
                whitespace_only,
            }) => self.insert_character(data, *whitespace_only),

            Some(Token::Comment { data }) => self.insert_comment(data),

            Some(Token::Doctype { .. }) => {
                self.parse_error("Unexpected DOCTYPE in select. Ignored.");
            }

            Some(Token::StartTag { name, .. }) if name == "html" => {
                self.process_using(InsertionMode::InBody, token)?;
            }

            // "A start tag whose tag name is "option" - If the current node is an option
            // element, pop that node from the stack of open elements. Insert an HTML
            // element for the token."
            Some(tag @ Token::StartTag { name, .. }) if name == "option" => {
                if self.current_node_is("option") {
                    let _ = self.pop_current()?;
                }
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is "optgroup" - If the current node is an option
            // element, pop that node from the stack of open elements. If the current node
            // is an optgroup element, pop that node from the stack of open elements.
            // Insert an HTML element for the token."
            Some(tag @ Token::StartTag { name, .. }) if name == "optgroup" => {
                self.pop_open_options()?;
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is "hr" - If the current node is an option
            // element, pop that node from the stack of open elements. If the current node
            // is an optgroup element, pop that node from the stack of open elements.
            // Insert an HTML element for the token. Immediately pop the current node off
            // the stack of open elements."
            Some(tag @ Token::StartTag { name, .. }) if name == "hr" => {
                self.pop_open_options()?;
                self.insert_empty_element(tag)?;
            }

            // "An end tag whose tag name is "optgroup" - First, if the current node is an
            // option element, and the node immediately before it in the stack of open
            // elements is an optgroup element, then pop the current node from the stack of
            // open elements. If the current node is an optgroup element, then pop that
            // node from the stack of open elements. Otherwise, this is a parse error;
            // ignore the token."
            Some(Token::EndTag { name, .. }) if name == "optgroup" => {
                let parent_is_optgroup = self
                    .open_elements
                    .len()
                    .checked_sub(2)
                    .and_then(|index| self.open_elements.get(index))
                    .is_some_and(|&id| self.arena.name(id) == Some("optgroup"));
                if self.current_node_is("option") && parent_is_optgroup {
                    let _ = self.pop_current()?;
                }
                if self.current_node_is("optgroup") {
                    let _ = self.pop_current()?;
                } else {
                    self.parse_error("Unexpected end tag (optgroup). Ignored.");
                }
            }

            // "An end tag whose tag name is "option" - If the current node is an option
            // element, then pop that node from the stack of open elements. Otherwise, this
            // is a parse error; ignore the token."
            Some(Token::EndTag { name, .. }) if name == "option" => {
                if self.current_node_is("option") {
                    let _ = self.pop_current()?;
                } else {
                    self.parse_error("Unexpected end tag (option). Ignored.");
                }
            }

            // "An end tag whose tag name is "select" - If the stack of open elements does
            // not have a select element in select scope, this is a parse error; ignore
            // the token. Otherwise: Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the insertion mode
            // appropriately."
            Some(Token::EndTag { name, .. }) if name == "select" => {
                if self.has_element_in_select_scope("select") {
                    self.close_select()?;
                } else {
                    self.parse_error("Unexpected end tag (select). Ignored.");
                }
            }

            // "A start tag whose tag name is "select" - Parse error. If the stack of open
            // elements does not have a select element in select scope, ignore the token.
            // Otherwise: Pop elements from the stack of open elements until a select
            // element has been popped from the stack. Reset the insertion mode
            // appropriately."
            Some(Token::StartTag { name, .. }) if name == "select" => {
                self.parse_error("Unexpected start tag (select) implies end tag (select).");
                if self.has_element_in_select_scope("select") {
                    self.close_select()?;
                }
            }

            // "A start tag whose tag name is one of: "input", "keygen", "textarea" - Parse
            // error. If the stack of open elements does not have a select element in
            // select scope, ignore the token. Otherwise: ... Reprocess the token."
            Some(Token::StartTag { name, .. })
                if matches!(name.as_str(), "input" | "keygen" | "textarea") =>
            {
                self.parse_error(format!("Unexpected start tag ({name}) in select."));
                if self.has_element_in_select_scope("select") {
                    self.close_select()?;
                    self.reprocess(token);
                }
            }

            // "A start tag whose tag name is one of: "script", "template" ... - Process the
            // token using the rules for the "in head" insertion mode."
            Some(Token::StartTag { name, .. }) if name == "script" => {
                self.process_using(InsertionMode::InHead, token)?;
            }

            // "An end-of-file token - Process the token using the rules for the "in body"
            // insertion mode."
            None => self.process_using(InsertionMode::InBody, token)?,

            // "Anything else - Parse error. Ignore the token."
            Some(Token::StartTag { name, .. }) => {
                self.parse_error(format!("Unexpected start tag ({name}) in select. Ignored."));
            }
            Some(Token::EndTag { name, .. }) => {
                self.parse_error(format!("Unexpected end tag ({name}) in select. Ignored."));
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "A start tag whose tag name is one of: "caption", "table", "tbody", "tfoot",
            // "thead", "tr", "td", "th" - Parse error. Pop elements from the stack of open
            // elements until a select element has been popped from the stack. Reset the
            // insertion mode appropriately. Reprocess the token."
            Some(tag) if tag.is_start_tag_in(TABLE_STRUCTURE) => {
                self.parse_error(format!("Unexpected {tag} in select in table."));
                self.close_select()?;
                self.reprocess(token);
            }

            // "An end tag whose tag name is one of: "caption", "table", "tbody", "tfoot",
            // "thead", "tr", "td", "th" - Parse error. If the stack of open elements does
            // not have an element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token. Otherwise: ... Reprocess
            // the token."
            Some(Token::EndTag { name, .. }) if TABLE_STRUCTURE.contains(&name.as_str()) => {
                self.parse_error(format!("Unexpected end tag ({name}) in select in table."));
                if self.has_element_in_table_scope(name) {
                    self.close_select()?;
                    self.reprocess(token);
                }
            }

            // "Anything else - Process the token using the rules for the "in select"
            // insertion mode."
            _ => self.handle_in_select_mode(token)?,
        }
        Ok(())
    }

    /// Pop an open option and then an open optgroup.
    fn pop_open_options(&mut self) -> Result<()> {
        if self.current_node_is("option") {
            let _ = self.pop_current()?;
        }
        if self.current_node_is("optgroup") {
            let _ = self.pop_current()?;
        }
        Ok(())
    }

    fn close_select(&mut self) -> Result<()> {
        self.pop_until_tag("select")?;
        self.reset_insertion_mode_appropriately();
        Ok(())
    }
}
