//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use wren_common::warning::warn_once;

use super::compat::CompatibilityMode;
use super::core::{InsertionMode, TreeConstructor};
use super::scope::Scope;
use crate::elements::{
    is_formatting_element, is_heading_element, is_special_element, may_be_left_open,
};
use crate::error::Result;
use crate::options::ContentModel;
use crate::tokenizer::{Attribute, Token};

/// Tag names that close a `p` element and start a block.
fn is_block_start(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "header"
            | "hgroup"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "search"
            | "section"
            | "summary"
            | "ul"
    )
}

/// Tag names whose end tag closes the element if it is in scope.
fn is_block_end(name: &str) -> bool {
    (is_block_start(name) && name != "p") || matches!(name, "listing" | "pre")
}

impl TreeConstructor {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(super) fn handle_in_body_mode(&mut self, token: Option<Token>) -> Result<()> {
        match &token {
            // "A character token" - "Reconstruct the active formatting elements, if any.
            // Insert the token's character." For anything but whitespace: "Set the
            // frameset-ok flag to "not ok"."
            Some(Token::Character {
                data,
                whitespace_only,
            }) => {
                self.reconstruct_active_formatting_elements()?;
                self.insert_character(data, *whitespace_only);
                if !*whitespace_only {
                    self.frameset_ok = false;
                }
            }

            // "A comment token - Insert a comment."
            Some(Token::Comment { data }) => self.insert_comment(data),

            // "A DOCTYPE token - Parse error. Ignore the token."
            Some(Token::Doctype { .. }) => {
                self.parse_error("Misplaced or duplicate DOCTYPE. Ignored.");
            }

            // "An end-of-file token - If there is a node in the stack of open elements
            // that is not either a dd element, a dt element, an li element, ... the body
            // element, or the html element, then this is a parse error. Stop parsing."
            None => {
                self.check_for_unclosed_elements("Unexpected end of stream. Missing closing tags.");
                self.stop_parsing()?;
            }

            Some(tag @ Token::StartTag { name, .. }) => {
                let name = name.clone();
                self.handle_in_body_start_tag(&name, tag)?;
            }

            Some(Token::EndTag { name, .. }) => {
                let name = name.clone();
                self.handle_in_body_end_tag(&name, token)?;
            }
        }
        Ok(())
    }

    /// Report a parse error if an element that must be closed explicitly is
    /// still open.
    fn check_for_unclosed_elements(&mut self, message: &str) {
        let unclosed = self
            .open_elements
            .iter()
            .any(|&id| self.arena.name(id).is_some_and(|name| !may_be_left_open(name)));
        if unclosed {
            self.parse_error(message);
        }
    }
}

// =============================================================================
// Start tags
// =============================================================================

impl TreeConstructor {
    #[allow(clippy::too_many_lines)]
    fn handle_in_body_start_tag(&mut self, name: &str, tag: &Token) -> Result<()> {
        let attributes: &[Attribute] = match tag {
            Token::StartTag { attributes, .. } => attributes,
            _ => &[],
        };

        match name {
            // "A start tag whose tag name is "html" - Parse error. ... for each attribute
            // on the token, check to see if the attribute is already present on the top
            // element of the stack of open elements. If it is not, add the attribute and
            // its corresponding value to that element."
            "html" => {
                self.parse_error("Unexpected start tag (html). Ignored.");
                if let Some(&root) = self.open_elements.first() {
                    self.merge_attributes(root, attributes);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link",
            // "meta", "noframes", "script", "style", "template", "title" - Process the
            // token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "command" | "link" | "meta" | "noframes"
            | "script" | "style" | "title" => {
                self.process_using(InsertionMode::InHead, Some(tag.clone()))?;
            }

            // "A start tag whose tag name is "body" - Parse error. If the second element on
            // the stack of open elements is not a body element, if the stack of open
            // elements has only one node on it ... ignore the token. Otherwise, set the
            // frameset-ok flag to "not ok"; then, for each attribute on the token, check to
            // see if the attribute is already present on the body element ... If it is
            // not, add the attribute and its corresponding value to that element."
            "body" => {
                self.parse_error("Unexpected start tag (body).");
                if let Some(&body) = self.open_elements.get(1)
                    && self.arena.name(body) == Some("body")
                {
                    self.frameset_ok = false;
                    self.merge_attributes(body, attributes);
                }
            }

            // "A start tag whose tag name is "frameset" - Parse error. If the stack of open
            // elements has only one node on it, or if the second element on the stack of
            // open elements is not a body element, then ignore the token. If the
            // frameset-ok flag is set to "not ok", ignore the token. Otherwise: Remove the
            // second element on the stack of open elements from its parent node, if it
            // has one. Pop all the nodes from the bottom of the stack of open elements,
            // from the current node up to, but not including, the root html element.
            // Insert an HTML element for the token. Switch the insertion mode to "in
            // frameset"."
            "frameset" => {
                self.parse_error("Unexpected start tag (frameset).");
                let second_is_body = self
                    .open_elements
                    .get(1)
                    .is_some_and(|&id| self.arena.name(id) == Some("body"));
                if second_is_body && self.frameset_ok {
                    let _ = warn_once(
                        "HTML Parser",
                        "a frameset replacing the body is emitted after the closed body",
                    );
                    while self.open_elements.len() > 1 {
                        let _ = self.pop_current()?;
                    }
                    let _ = self.insert_html_element(tag)?;
                    self.mode = InsertionMode::InFrameset;
                }
            }

            // "A start tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "center", "details", "dialog", "dir", "div", "dl", "fieldset",
            // "figcaption", "figure", "footer", "header", "hgroup", "main", "menu", "nav",
            // "ol", "p", "search", "section", "summary", "ul" - If the stack of open
            // elements has a p element in button scope, then close a p element. Insert an
            // HTML element for the token."
            _ if is_block_start(name) => {
                self.close_p_element_if_in_button_scope()?;
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6" -
            // If the stack of open elements has a p element in button scope, then close a
            // p element. If the current node is an HTML element whose tag name is one of
            // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse error; pop the
            // current node off the stack of open elements. Insert an HTML element for the
            // token."
            _ if is_heading_element(name) => {
                self.close_p_element_if_in_button_scope()?;
                if self.current_node_name().is_some_and(is_heading_element) {
                    self.parse_error(format!(
                        "Unexpected start tag ({name}). Headings cannot nest."
                    ));
                    let _ = self.pop_current()?;
                }
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is one of: "pre", "listing" - If the stack of
            // open elements has a p element in button scope, then close a p element.
            // Insert an HTML element for the token. If the next token is a U+000A LINE
            // FEED (LF) character token, then ignore that token and move on to the next
            // one. Set the frameset-ok flag to "not ok"."
            "pre" | "listing" => {
                self.close_p_element_if_in_button_scope()?;
                let _ = self.insert_html_element(tag)?;
                self.skip_leading_newline();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form" - If the form element pointer is not
            // null, then this is a parse error; ignore the token. Otherwise: If the stack
            // of open elements has a p element in button scope, then close a p element.
            // Insert an HTML element for the token, and set the form element pointer to
            // point to the element created."
            "form" => {
                if self.form_element.is_some() {
                    self.parse_error("Unexpected start tag (form). Nested forms are ignored.");
                } else {
                    self.close_p_element_if_in_button_scope()?;
                    let form = self.insert_html_element(tag)?;
                    self.form_element = Some(form);
                }
            }

            // "A start tag whose tag name is "li"" / "A start tag whose tag name is one of:
            // "dd", "dt""
            "li" | "dd" | "dt" => self.handle_list_item_start_tag(name, tag)?,

            // "A start tag whose tag name is "plaintext" - If the stack of open elements
            // has a p element in button scope, then close a p element. Insert an HTML
            // element for the token. Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_element_if_in_button_scope()?;
                let _ = self.insert_html_element(tag)?;
                self.switch_content_model(ContentModel::Plaintext);
            }

            // "A start tag whose tag name is "button" - If the stack of open elements has
            // a button element in scope, then this is a parse error; generate implied end
            // tags, then pop elements from the stack of open elements until a button
            // element has been popped from the stack. Reconstruct the active formatting
            // elements, if any. Insert an HTML element for the token. Set the frameset-ok
            // flag to "not ok"."
            // A button is also a formatting context: formatting elements opened
            // inside it are not reconstructed after it closes.
            "button" => {
                if self.has_element_in_scope("button") {
                    self.parse_error("Unexpected start tag (button). Closing the open button.");
                    self.generate_implied_end_tags()?;
                    self.pop_until_tag("button")?;
                    self.clear_active_formatting_elements_to_last_marker();
                }
                self.reconstruct_active_formatting_elements()?;
                let _ = self.insert_html_element(tag)?;
                self.formatting.push_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a" - If the list of active formatting
            // elements contains an a element between the end of the list and the last
            // marker on the list (or the start of the list if there is no marker on the
            // list), then this is a parse error; run the adoption agency algorithm for
            // the token, then remove that element from the list of active formatting
            // elements and the stack of open elements if the adoption agency algorithm
            // didn't already remove it."
            "a" => {
                if let Some(previous) = self.formatting.find_after_last_marker("a", &self.arena) {
                    self.parse_error("Unexpected start tag (a) implies end tag (a).");
                    self.run_adoption_agency("a")?;
                    // An element that is still open cannot leave the event stream;
                    // it stays open and only stops being reconstructed.
                    self.remove_active_formatting_element(previous);
                }
                self.reconstruct_active_formatting_elements()?;
                let element = self.insert_html_element(tag)?;
                self.push_active_formatting_element(element);
            }

            // "A start tag whose tag name is "nobr" - Reconstruct the active formatting
            // elements, if any. If the stack of open elements has a nobr element in
            // scope, then this is a parse error; run the adoption agency algorithm for the
            // token, then once again reconstruct the active formatting elements, if any.
            // Insert an HTML element for the token. Push onto the list of active
            // formatting elements that element."
            "nobr" => {
                self.reconstruct_active_formatting_elements()?;
                if self.has_element_in_scope("nobr") {
                    self.parse_error("Unexpected start tag (nobr) implies end tag (nobr).");
                    self.run_adoption_agency("nobr")?;
                    self.reconstruct_active_formatting_elements()?;
                }
                let element = self.insert_html_element(tag)?;
                self.push_active_formatting_element(element);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em", "font",
            // "i", "s", "small", "strike", "strong", "tt", "u" - Reconstruct the active
            // formatting elements, if any. Insert an HTML element for the token. Push onto
            // the list of active formatting elements that element."
            _ if is_formatting_element(name) => {
                self.reconstruct_active_formatting_elements()?;
                let element = self.insert_html_element(tag)?;
                self.push_active_formatting_element(element);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object" -
            // Reconstruct the active formatting elements, if any. Insert an HTML element
            // for the token. Insert a marker at the end of the list of active formatting
            // elements. Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements()?;
                let _ = self.insert_html_element(tag)?;
                self.formatting.push_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table" - If the Document is not set to
            // quirks mode, and the stack of open elements has a p element in button
            // scope, then close a p element. Insert an HTML element for the token. Set the
            // frameset-ok flag to "not ok". Switch the insertion mode to "in table"."
            "table" => {
                if self.compat_mode != CompatibilityMode::Quirks {
                    self.close_p_element_if_in_button_scope()?;
                }
                let _ = self.insert_html_element(tag)?;
                self.frameset_ok = false;
                self.mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed", "img",
            // "keygen", "wbr" - Reconstruct the active formatting elements, if any. Insert
            // an HTML element for the token. Immediately pop the current node off the
            // stack of open elements. Acknowledge the token's self-closing flag, if it is
            // set. Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements()?;
                self.insert_empty_element(tag)?;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input" - ... If the token does not have an
            // attribute with the name "type", or if it does, but that attribute's value
            // is not an ASCII case-insensitive match for the string "hidden", then: set
            // the frameset-ok flag to "not ok"."
            "input" => {
                self.reconstruct_active_formatting_elements()?;
                self.insert_empty_element(tag)?;
                let hidden = attributes.iter().any(|attribute| {
                    attribute.name == "type" && attribute.value.eq_ignore_ascii_case("hidden")
                });
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track" - Insert
            // an HTML element for the token. Immediately pop the current node off the
            // stack of open elements."
            "param" | "source" | "track" | "event-source" => {
                self.insert_empty_element(tag)?;
            }

            // "A start tag whose tag name is "hr" - If the stack of open elements has a p
            // element in button scope, then close a p element. Insert an HTML element for
            // the token. Immediately pop the current node off the stack of open elements.
            // Set the frameset-ok flag to "not ok"."
            "hr" => {
                self.close_p_element_if_in_button_scope()?;
                self.insert_empty_element(tag)?;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image" - Parse error. Change the token's tag
            // name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.parse_error("Unexpected start tag (image). Treated as img.");
                if let Token::StartTag {
                    attributes,
                    self_closing,
                    ..
                } = tag
                {
                    self.pending.push(Token::StartTag {
                        name: "img".to_string(),
                        attributes: attributes.clone(),
                        self_closing: *self_closing,
                    });
                }
            }

            "isindex" => {
                self.parse_error("Unexpected start tag (isindex). Ignored.");
            }

            // "A start tag whose tag name is "textarea" - Insert an HTML element for the
            // token. If the next token is a U+000A LINE FEED (LF) character token, then
            // ignore that token and move on to the next one. Switch the tokenizer to the
            // RCDATA state. ... Set the frameset-ok flag to "not ok"."
            "textarea" => {
                let _ = self.insert_raw_text_element(tag, ContentModel::Rcdata)?;
                self.skip_leading_newline();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "xmp" - If the stack of open elements has a p
            // element in button scope, then close a p element. Reconstruct the active
            // formatting elements, if any. Set the frameset-ok flag to "not ok". Follow
            // the generic raw text element parsing algorithm."
            "xmp" => {
                self.close_p_element_if_in_button_scope()?;
                self.reconstruct_active_formatting_elements()?;
                self.frameset_ok = false;
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }

            // "A start tag whose tag name is "iframe" - Set the frameset-ok flag to "not
            // ok". Follow the generic raw text element parsing algorithm."
            "iframe" => {
                self.frameset_ok = false;
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }

            // "A start tag whose tag name is "noembed" / A start tag whose tag name is
            // "noscript", if the scripting flag is enabled - Follow the generic raw text
            // element parsing algorithm."
            "noembed" => {
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }
            "noscript" if self.options.scripting => {
                let _ = self.insert_raw_text_element(tag, ContentModel::Cdata)?;
            }

            // "A start tag whose tag name is "select" - Reconstruct the active formatting
            // elements, if any. Insert an HTML element for the token. Set the frameset-ok
            // flag to "not ok". If the insertion mode is one of "in table", "in caption",
            // "in table body", "in row", or "in cell", then switch the insertion mode to
            // "in select in table". Otherwise, switch the insertion mode to "in select"."
            "select" => {
                self.reconstruct_active_formatting_elements()?;
                let _ = self.insert_html_element(tag)?;
                self.frameset_ok = false;
                self.mode = match self.mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option" - If the current
            // node is an option element, then pop the current node off the stack of open
            // elements. Reconstruct the active formatting elements, if any. Insert an HTML
            // element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.pop_current()?;
                }
                self.reconstruct_active_formatting_elements()?;
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is one of: "rb", "rtc" - If the stack of open
            // elements has a ruby element in scope, then generate implied end tags. If the
            // current node is not now a ruby element, this is a parse error. Insert an
            // HTML element for the token."
            // "A start tag whose tag name is one of: "rp", "rt" - If the stack of open
            // elements has a ruby element in scope, then generate implied end tags, except
            // for rtc elements. If the current node is not now a rtc element or a ruby
            // element, this is a parse error. Insert an HTML element for the token."
            "rb" | "rp" | "rt" | "rtc" => {
                if self.has_element_in_scope("ruby") {
                    let inside_rtc = matches!(name, "rp" | "rt");
                    self.generate_implied_end_tags_excluding(inside_rtc.then_some("rtc"))?;
                    let expected = self.current_node_is("ruby")
                        || (inside_rtc && self.current_node_is("rtc"));
                    if !expected {
                        self.parse_error(format!("Unexpected start tag ({name}) outside ruby."));
                    }
                }
                let _ = self.insert_html_element(tag)?;
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup", "frame",
            // "head", "tbody", "td", "tfoot", "th", "thead", "tr" - Parse error. Ignore the
            // token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot"
            | "th" | "thead" | "tr" => {
                self.parse_error(format!("Unexpected start tag ({name}) in body. Ignored."));
            }

            // "Any other start tag - Reconstruct the active formatting elements, if any.
            // Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements()?;
                let _ = self.insert_html_element(tag)?;
            }
        }
        Ok(())
    }

    /// "A start tag whose tag name is "li"" and "A start tag whose tag name is
    /// one of: "dd", "dt""
    fn handle_list_item_start_tag(&mut self, name: &str, tag: &Token) -> Result<()> {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        let closes: &[&str] = if name == "li" { &["li"] } else { &["dd", "dt"] };

        // STEP 2-5: "Loop: If node is an li element, then run these substeps: Generate
        //            implied end tags, except for li elements. If the current node is not
        //            an li element, then this is a parse error. Pop elements from the
        //            stack of open elements until an li element has been popped from the
        //            stack. Jump to the step below labeled done."
        //           "If node is in the special category, but is not an address, div, or
        //            p element, then jump to the step below labeled done."
        let mut to_close = None;
        for &id in self.open_elements.iter().rev() {
            let Some(node_name) = self.arena.name(id) else {
                continue;
            };
            if closes.contains(&node_name) {
                to_close = Some(node_name.to_string());
                break;
            }
            if is_special_element(node_name) && !matches!(node_name, "address" | "div" | "p") {
                break;
            }
        }
        if let Some(open_item) = to_close {
            self.close_element(&open_item)?;
        }

        // STEP 6: "Done: If the stack of open elements has a p element in button scope,
        //          then close a p element."
        self.close_p_element_if_in_button_scope()?;

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(tag)?;
        Ok(())
    }
}

// =============================================================================
// End tags
// =============================================================================

impl TreeConstructor {
    fn handle_in_body_end_tag(&mut self, name: &str, token: Option<Token>) -> Result<()> {
        match name {
            // "An end tag whose tag name is "body" - If the stack of open elements does not
            // have a body element in scope, this is a parse error; ignore the token.
            // Otherwise, if there is a node in the stack of open elements that is not
            // either a dd element, ... then this is a parse error. Switch the insertion
            // mode to "after body"."
            "body" => {
                if !self.has_element_in_scope("body") {
                    self.parse_error("Unexpected end tag (body). Ignored.");
                    return Ok(());
                }
                self.check_for_unclosed_elements("End tag (body) seen with elements still open.");
                self.mode = InsertionMode::AfterBody;
            }

            // "An end tag whose tag name is "html" - If the stack of open elements does not
            // have a body element in scope, this is a parse error; ignore the token.
            // Otherwise, ... Switch the insertion mode to "after body". Reprocess the
            // token."
            "html" => {
                if !self.has_element_in_scope("body") {
                    self.parse_error("Unexpected end tag (html). Ignored.");
                    return Ok(());
                }
                self.check_for_unclosed_elements("End tag (html) seen with elements still open.");
                self.reprocess_in(InsertionMode::AfterBody, token);
            }

            // "An end tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "button", "center", "details", "dialog", "dir", "div", "dl",
            // "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
            // "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul" - If
            // the stack of open elements does not have an element in scope that is an HTML
            // element with the same tag name as that of the token, then this is a parse
            // error; ignore the token. Otherwise: Generate implied end tags. If the
            // current node is not an HTML element with the same tag name as that of the
            // token, then this is a parse error. Pop elements from the stack of open
            // elements until an HTML element with the same tag name as the token has been
            // popped from the stack."
            _ if is_block_end(name) => {
                if !self.has_element_in_scope(name) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                    return Ok(());
                }
                self.generate_implied_end_tags()?;
                if !self.current_node_is(name) {
                    self.report_unclosed_elements(name);
                }
                self.pop_until_tag(name)?;
            }

            // "An end tag whose tag name is "form" - Let node be the element that the form
            // element pointer is set to, or null if it is not set to an element. Set the
            // form element pointer to null. If node is null or if the stack of open
            // elements does not have node in scope, then this is a parse error; return
            // and ignore the token. Otherwise: Generate implied end tags. If the current
            // node is not node, then this is a parse error. Remove node from the stack of
            // open elements."
            "form" => {
                let node = self.form_element.take();
                let Some(node) = node.filter(|&node| self.has_node_in_scope(node)) else {
                    if let Some(node) = node {
                        self.release_if_unreferenced(node);
                    }
                    self.parse_error("Unexpected end tag (form). Ignored.");
                    return Ok(());
                };
                self.generate_implied_end_tags()?;
                if self.current_node() != Some(node) {
                    self.report_unclosed_elements("form");
                }
                self.pop_until_element(node)?;
            }

            // "An end tag whose tag name is "p" - If the stack of open elements does not
            // have a p element in button scope, then this is a parse error; insert an HTML
            // element for a "p" start tag token with no attributes. Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("Unexpected end tag (p). Inserting an empty paragraph.");
                    let _ = self.insert_element("p", Vec::new());
                }
                self.close_p_element()?;
            }

            // "An end tag whose tag name is "li" - If the stack of open elements does not
            // have an li element in list item scope, then this is a parse error; ignore
            // the token. Otherwise: Generate implied end tags, except for li elements. If
            // the current node is not an li element, then this is a parse error. Pop
            // elements from the stack of open elements until an li element has been
            // popped from the stack."
            "li" => {
                if !self.has_element_in_list_item_scope("li") {
                    self.parse_error("Unexpected end tag (li). Ignored.");
                    return Ok(());
                }
                self.close_element("li")?;
            }

            // "An end tag whose tag name is one of: "dd", "dt" - If the stack of open
            // elements does not have an element in scope that is an HTML element with the
            // same tag name as that of the token, then this is a parse error; ignore the
            // token. Otherwise: ..."
            "dd" | "dt" => {
                if !self.has_element_in_scope(name) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                    return Ok(());
                }
                self.close_element(name)?;
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6" - If
            // the stack of open elements does not have an element in scope that is an HTML
            // element and whose tag name is one of "h1", "h2", "h3", "h4", "h5", or "h6",
            // then this is a parse error; ignore the token. Otherwise: Generate implied
            // end tags. If the current node is not an HTML element with the same tag name
            // as that of the token, then this is a parse error. Pop elements from the
            // stack of open elements until an HTML element whose tag name is one of "h1",
            // "h2", "h3", "h4", "h5", or "h6" has been popped from the stack."
            _ if is_heading_element(name) => {
                const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
                if !self.has_any_in_scope(HEADINGS, Scope::Default) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                    return Ok(());
                }
                self.generate_implied_end_tags()?;
                if !self.current_node_is(name) {
                    self.report_unclosed_elements(name);
                }
                self.pop_until_one_of(HEADINGS)?;
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code", "em", "font",
            // "i", "nobr", "s", "small", "strike", "strong", "tt", "u" - Run the adoption
            // agency algorithm for the token."
            _ if is_formatting_element(name) => self.run_adoption_agency(name)?,

            // "An end tag token whose tag name is one of: "applet", "marquee", "object" -
            // If the stack of open elements does not have an element in scope that is an
            // HTML element with the same tag name as that of the token, then this is a
            // parse error; ignore the token. Otherwise: Generate implied end tags. If the
            // current node is not an HTML element with the same tag name as that of the
            // token, then this is a parse error. Pop elements from the stack of open
            // elements until an HTML element with the same tag name as the token has been
            // popped from the stack. Clear the list of active formatting elements up to
            // the last marker."
            // A button end tag also clears to the marker its start tag pushed.
            "applet" | "button" | "marquee" | "object" => {
                if !self.has_element_in_scope(name) {
                    self.parse_error(format!("Unexpected end tag ({name}). Ignored."));
                    return Ok(());
                }
                self.generate_implied_end_tags()?;
                if !self.current_node_is(name) {
                    self.report_unclosed_elements(name);
                }
                self.pop_until_tag(name)?;
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br" - Parse error. Drop the attributes from
            // the token, and act as described in the next entry; i.e. act as if this was a
            // "br" start tag token with no attributes, rather than the end tag token that
            // it actually is."
            "br" => {
                self.parse_error("Unexpected end tag (br). Treated as br element.");
                self.pending.push(Token::start_tag("br"));
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name)?,
        }
        Ok(())
    }
}
