//! Formatting element recovery.
//!
//! [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
//! and [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm).

use wren_common::warning::warn_once;

use super::arena::ElementId;
use super::core::TreeConstructor;
use crate::elements::is_special_element;
use crate::error::Result;

impl TreeConstructor {
    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_active_formatting_element(&mut self, id: ElementId) {
        if let Some(dropped) = self.formatting.push(id, &self.arena) {
            self.release_if_unreferenced(dropped);
        }
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        for id in self.formatting.clear_to_last_marker() {
            self.release_if_unreferenced(id);
        }
    }

    /// Remove an element from the list of active formatting elements.
    pub(super) fn remove_active_formatting_element(&mut self, id: ElementId) {
        if self.formatting.remove(id) {
            self.release_if_unreferenced(id);
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// "When the steps below require the UA to reconstruct the active
    /// formatting elements, the UA must perform the following steps:"
    pub(super) fn reconstruct_active_formatting_elements(&mut self) -> Result<()> {
        let entries = self.formatting.after_last_marker().to_vec();

        // STEP 1: "If there are no entries in the list of active formatting elements,
        //          then there is nothing to reconstruct; stop this algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of active
        //          formatting elements is a marker, or if it is an element that is
        //          in the stack of open elements, then there is nothing to
        //          reconstruct; stop this algorithm."
        let Some(&last) = entries.last() else {
            return Ok(());
        };
        if self.open_elements.contains(&last) {
            return Ok(());
        }

        // STEP 4-6: Rewind
        // "If entry is neither a marker nor an element that is also in the stack
        //  of open elements, go to the step labeled rewind."
        let first_to_create = entries
            .iter()
            .rposition(|id| self.open_elements.contains(id))
            .map_or(0, |position| position + 1);

        // STEP 7-10: Advance and create
        for &entry in &entries[first_to_create..] {
            // STEP 8: "Create: Insert an HTML element for the token for which the
            //          element entry was created, to obtain new element."
            let clone = self
                .arena
                .clone_element(entry)
                .ok_or_else(|| Self::fault("active formatting element was released"))?;
            self.push_element(clone);

            // STEP 9: "Replace the entry for entry in the list with an entry for
            //          new element."
            self.formatting.replace(entry, clone);
            self.release_if_unreferenced(entry);
        }
        Ok(())
    }

    /// [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// "When the steps below require the UA to run the adoption agency algorithm
    /// for a token, the UA must perform the following steps:"
    ///
    /// The event stream cannot move nodes that were already emitted, so when a
    /// furthest block exists everything from the current node down to the
    /// formatting element is closed, and the displaced elements that are not
    /// formatting elements themselves are reopened as copies.
    pub(super) fn run_adoption_agency(&mut self, subject: &str) -> Result<()> {
        // STEP 2: "If the current node is an HTML element whose tag name is subject,
        //          and the current node is not in the list of active formatting
        //          elements, then pop the current node off the stack of open elements
        //          and return."
        if let Some(current) = self.current_node()
            && self.arena.name(current) == Some(subject)
            && !self.formatting.contains(current)
        {
            let _ = self.pop_current()?;
            return Ok(());
        }

        // STEP 7: "Let formatting element be the last element in the list of active
        //          formatting elements that: is between the end of the list and the
        //          last marker in the list, if any, or the start of the list
        //          otherwise; and has the tag name subject."
        // STEP 8: "If there is no such element, then return and instead act as
        //          described in the "any other end tag" entry above."
        let Some(formatting_element) = self.formatting.find_after_last_marker(subject, &self.arena)
        else {
            return self.any_other_end_tag(subject);
        };

        // STEP 9: "If formatting element is not in the stack of open elements, then
        //          this is a parse error; remove the element from the list, and
        //          return."
        let Some(stack_index) = self
            .open_elements
            .iter()
            .position(|&id| id == formatting_element)
        else {
            self.parse_error(format!(
                "End tag ({subject}) for an element that is no longer open."
            ));
            self.remove_active_formatting_element(formatting_element);
            return Ok(());
        };

        // STEP 10: "If formatting element is in the stack of open elements, but the
        //           element is not in scope, then this is a parse error; return."
        if !self.has_node_in_scope(formatting_element) {
            self.parse_error(format!("End tag ({subject}) is not in scope. Ignored."));
            return Ok(());
        }

        // STEP 11: "If formatting element is not the current node, this is a parse
        //           error. (But do not return.)"
        if self.current_node() != Some(formatting_element) {
            self.report_unclosed_elements(subject);
        }

        // STEP 12: "Let furthest block be the topmost node in the stack of open
        //           elements that is lower in the stack than formatting element, and
        //           is an element in the special category."
        let displaced = self.open_elements[stack_index + 1..].to_vec();
        let has_furthest_block = displaced
            .iter()
            .any(|&id| self.arena.name(id).is_some_and(is_special_element));

        if !has_furthest_block {
            // STEP 13: "If there is no furthest block, then the UA must first pop all
            //           the nodes from the bottom of the stack of open elements, from
            //           the current node up to and including formatting element, then
            //           remove formatting element from the list of active formatting
            //           elements, and finally return."
            self.pop_until_element(formatting_element)?;
            self.remove_active_formatting_element(formatting_element);
            return Ok(());
        }

        let _ = warn_once(
            "HTML Parser",
            "adoption agency with a furthest block is approximated by closing and reopening elements",
        );

        // Copies are made before popping, which may release the originals.
        let mut reopened = Vec::new();
        for &id in &displaced {
            if !self.formatting.contains(id) {
                let copy = self
                    .arena
                    .clone_element(id)
                    .ok_or_else(|| Self::fault("displaced element was released"))?;
                reopened.push((id, copy));
            }
        }

        self.pop_until_element(formatting_element)?;
        self.remove_active_formatting_element(formatting_element);

        for (original, copy) in reopened {
            self.push_element(copy);
            // The form element pointer follows the reopened form.
            if self.form_element == Some(original) {
                self.form_element = Some(copy);
                self.release_if_unreferenced(original);
            }
        }
        Ok(())
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the stack)."
    /// 2. "Loop: If node is an HTML element with the same tag name as the token, then:"
    ///    a. "Generate implied end tags, except for HTML elements with the same tag name
    ///    as the token."
    ///    b. "If node is not the current node, then this is a parse error."
    ///    c. "Pop all the nodes from the current node up to node, including node, then stop
    ///    these steps."
    /// 3. "Otherwise, if node is in the special category, then this is a parse error;
    ///    ignore the token, and return."
    /// 4. "Set node to the previous entry in the stack of open elements and return to
    ///    the step labeled loop."
    pub(super) fn any_other_end_tag(&mut self, tag_name: &str) -> Result<()> {
        let mut target = None;
        for &id in self.open_elements.iter().rev() {
            let Some(name) = self.arena.name(id) else {
                continue;
            };
            if name == tag_name {
                target = Some(id);
                break;
            }
            if is_special_element(name) {
                break;
            }
        }

        let Some(node) = target else {
            self.parse_error(format!("Unexpected end tag ({tag_name}). Ignored."));
            return Ok(());
        };

        self.generate_implied_end_tags_excluding(Some(tag_name))?;
        if self.current_node() != Some(node) {
            self.report_unclosed_elements(tag_name);
        }
        self.pop_until_element(node)
    }
}
