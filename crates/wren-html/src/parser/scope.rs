//! Scope tests and the stack-clearing algorithms built on them.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use super::arena::ElementId;
use super::core::{InsertionMode, TreeConstructor};
use crate::elements::{has_optional_end_tag, is_scoping_element};
use crate::error::Result;

/// Which elements end a scope test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// [§ 13.2.4.2 "has an element in scope"](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    Default,
    /// [§ 13.2.4.2 "has an element in list item scope"](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-list-item-scope)
    ListItem,
    /// [§ 13.2.4.2 "has an element in button scope"](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-button-scope)
    Button,
    /// [§ 13.2.4.2 "has an element in table scope"](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-table-scope)
    Table,
    /// [§ 13.2.4.2 "has an element in select scope"](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    Select,
}

impl Scope {
    /// True if `tag_name` ends a walk in this scope.
    #[must_use]
    pub fn is_boundary(self, tag_name: &str) -> bool {
        match self {
            Self::Default => is_scoping_element(tag_name),
            Self::ListItem => is_scoping_element(tag_name) || matches!(tag_name, "ol" | "ul"),
            Self::Button => is_scoping_element(tag_name) || tag_name == "button",
            Self::Table => matches!(tag_name, "html" | "table"),
            // "all element types except the following: optgroup in the HTML
            // namespace, option in the HTML namespace"
            Self::Select => !matches!(tag_name, "optgroup" | "option"),
        }
    }
}

// =============================================================================
// Scope tests
// =============================================================================

impl TreeConstructor {
    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the stack).
    ///  2. If node is the target node, terminate in a match state.
    ///  3. Otherwise, if node is one of the element types in list, terminate in a
    ///     failure state.
    ///  4. Otherwise, set node to the previous entry in the stack of open elements
    ///     and return to step 2."
    fn has_in_scope_where(
        &self,
        scope: Scope,
        is_target: impl Fn(ElementId, &str) -> bool,
    ) -> bool {
        for &id in self.open_elements.iter().rev() {
            let Some(name) = self.arena.name(id) else {
                continue;
            };
            if is_target(id, name) {
                return true;
            }
            if scope.is_boundary(name) {
                return false;
            }
        }
        false
    }

    pub(super) fn has_element_in_specific_scope(&self, tag_name: &str, scope: Scope) -> bool {
        self.has_in_scope_where(scope, |_, name| name == tag_name)
    }

    pub(super) fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, Scope::Default)
    }

    pub(super) fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, Scope::Button)
    }

    pub(super) fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, Scope::ListItem)
    }

    pub(super) fn has_element_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, Scope::Table)
    }

    pub(super) fn has_element_in_select_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, Scope::Select)
    }

    /// True if any of `tag_names` is in the given scope.
    pub(super) fn has_any_in_scope(&self, tag_names: &[&str], scope: Scope) -> bool {
        self.has_in_scope_where(scope, |_, name| tag_names.contains(&name))
    }

    /// True if this particular element is in the default scope.
    pub(super) fn has_node_in_scope(&self, target: ElementId) -> bool {
        self.has_in_scope_where(Scope::Default, |id, _| id == target)
    }
}

// =============================================================================
// Closing elements
// =============================================================================

impl TreeConstructor {
    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element, an
    /// optgroup element, an option element, a p element, an rp element, or an
    /// rt element, the UA must pop the current node off the stack of open
    /// elements."
    ///
    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the above
    /// steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_excluding(
        &mut self,
        exclude: Option<&str>,
    ) -> Result<()> {
        while let Some(current) = self.current_node_name() {
            if !has_optional_end_tag(current) || exclude == Some(current) {
                break;
            }
            let _ = self.pop_current()?;
        }
        Ok(())
    }

    pub(super) fn generate_implied_end_tags(&mut self) -> Result<()> {
        self.generate_implied_end_tags_excluding(None)
    }

    /// Generate implied end tags except for `tag_name`, report a parse error if
    /// the current node is not then a `tag_name` element, and pop up to and
    /// including it. The caller has checked that such an element is in scope.
    pub(super) fn close_element(&mut self, tag_name: &str) -> Result<()> {
        self.generate_implied_end_tags_excluding(Some(tag_name))?;
        if !self.current_node_is(tag_name) {
            self.report_unclosed_elements(tag_name);
        }
        self.pop_until_tag(tag_name)
    }

    /// [§ 13.2.6.4.7 Close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the stack."
    pub(super) fn close_p_element(&mut self) -> Result<()> {
        self.close_element("p")
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_if_in_button_scope(&mut self) -> Result<()> {
        if self.has_element_in_button_scope("p") {
            self.close_p_element()?;
        }
        Ok(())
    }

    /// Parse error for an end tag that closes elements which are still open
    /// inside it.
    pub(super) fn report_unclosed_elements(&mut self, tag_name: &str) {
        let current = self.current_node_name().unwrap_or("document").to_string();
        self.parse_error(format!(
            "End tag ({tag_name}) seen too early. Expected other end tag ({current})."
        ));
    }

    /// [§ 13.2.6.4.9 Clear the stack back to a table context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) -> Result<()> {
        self.clear_stack_back_to(&["table", "html"])
    }

    /// [§ 13.2.6.4.13 Clear the stack back to a table body context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "While the current node is not a tbody, tfoot, thead, template, or html
    /// element, pop elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) -> Result<()> {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "html"])
    }

    /// [§ 13.2.6.4.14 Clear the stack back to a table row context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "While the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) -> Result<()> {
        self.clear_stack_back_to(&["tr", "html"])
    }

    fn clear_stack_back_to(&mut self, tag_names: &[&str]) -> Result<()> {
        while let Some(current) = self.current_node_name() {
            if tag_names.contains(&current) {
                break;
            }
            let _ = self.pop_current()?;
        }
        Ok(())
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mut mode = InsertionMode::InBody;

        for (index, &id) in self.open_elements.iter().enumerate().rev() {
            // STEP 2: "Let last be false." / STEP 3.1: "If node is the first node in
            //          the stack of open elements, then set last to true."
            let last = index == 0;
            let Some(name) = self.arena.name(id) else {
                continue;
            };

            match name {
                // STEP 4: "If node is a select element, run these substeps: ... Loop:
                //          If ancestor is a table element, switch the insertion mode to
                //          "in select in table" and return."
                "select" => {
                    let in_table = self.open_elements[..index]
                        .iter()
                        .any(|&ancestor| self.arena.name(ancestor) == Some("table"));
                    mode = if in_table {
                        InsertionMode::InSelectInTable
                    } else {
                        InsertionMode::InSelect
                    };
                    break;
                }
                // STEP 5: "If node is a td or th element and last is false, then switch
                //          the insertion mode to "in cell" and return."
                "td" | "th" if !last => {
                    mode = InsertionMode::InCell;
                    break;
                }
                // STEP 6: "If node is a tr element, then switch the insertion mode to
                //          "in row" and return."
                "tr" => {
                    mode = InsertionMode::InRow;
                    break;
                }
                // STEP 7: "If node is a tbody, thead, or tfoot element, then switch the
                //          insertion mode to "in table body" and return."
                "tbody" | "thead" | "tfoot" => {
                    mode = InsertionMode::InTableBody;
                    break;
                }
                // STEP 8: "If node is a caption element, then switch the insertion mode
                //          to "in caption" and return."
                "caption" => {
                    mode = InsertionMode::InCaption;
                    break;
                }
                // STEP 9: "If node is a colgroup element, then switch the insertion mode
                //          to "in column group" and return."
                "colgroup" => {
                    mode = InsertionMode::InColumnGroup;
                    break;
                }
                // STEP 10: "If node is a table element, then switch the insertion mode
                //           to "in table" and return."
                "table" => {
                    mode = InsertionMode::InTable;
                    break;
                }
                // STEP 12: "If node is a head element and last is false, then switch the
                //           insertion mode to "in head" and return."
                "head" if !last => {
                    mode = InsertionMode::InHead;
                    break;
                }
                // STEP 13: "If node is a body element, then switch the insertion mode to
                //           "in body" and return."
                "body" => {
                    mode = InsertionMode::InBody;
                    break;
                }
                // STEP 14: "If node is a frameset element, then switch the insertion
                //           mode to "in frameset" and return."
                "frameset" => {
                    mode = InsertionMode::InFrameset;
                    break;
                }
                // STEP 15: "If node is an html element, run these substeps: If the head
                //           element pointer is null, switch the insertion mode to "before
                //           head" and return. Otherwise, the head element pointer is not
                //           null, switch the insertion mode to "after head" and return."
                "html" => {
                    mode = if self.head_element.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                    break;
                }
                // STEP 16: "If last is true, then switch the insertion mode to "in
                //           body" and return."
                _ if last => {
                    mode = InsertionMode::InBody;
                    break;
                }
                _ => {}
            }
        }

        self.mode = mode;
    }
}
