//! Inserting nodes and popping the stack of open elements.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! Every insertion is an emitted event. Elements are emitted when they are
//! pushed and their end is emitted when they are popped, so the stack of
//! open elements always mirrors the unbalanced part of the event stream.
//! The one exception is the head element: its end is held back until the
//! body or frameset starts, so elements re-routed into the head from the
//! "after head" mode still land inside it.

use super::arena::ElementId;
use super::core::TreeConstructor;
use crate::error::Result;
use crate::event::Event;
use crate::tokenizer::{Attribute, Token};

// =============================================================================
// Inserting nodes
// =============================================================================

impl TreeConstructor {
    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    pub(super) fn insert_html_element(&mut self, token: &Token) -> Result<ElementId> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => Ok(self.insert_element(name, attributes.clone())),
            other => Err(Self::fault(format!(
                "cannot insert an element for a non-start-tag token: {other}"
            ))),
        }
    }

    /// Create an element, emit its start and push it onto the stack of open
    /// elements.
    pub(super) fn insert_element(&mut self, name: &str, attributes: Vec<Attribute>) -> ElementId {
        let id = self.arena.allocate(name, attributes);
        self.push_element(id);
        id
    }

    /// Emit the start of an element that already lives in the arena and
    /// push it.
    pub(super) fn push_element(&mut self, id: ElementId) {
        if let Some(element) = self.arena.get(id) {
            self.events.push_back(Event::element(
                element.name.clone(),
                element.attributes.clone(),
                self.depth,
                false,
            ));
            self.depth += 1;
            self.open_elements.push(id);
        }
    }

    /// "Insert an HTML element for the token. Immediately pop the current
    /// node off the stack of open elements."
    ///
    /// Used for void elements, which are reported as empty elements.
    pub(super) fn insert_empty_element(&mut self, token: &Token) -> Result<()> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => {
                self.events.push_back(Event::element(
                    name.clone(),
                    attributes.clone(),
                    self.depth,
                    true,
                ));
                Ok(())
            }
            other => Err(Self::fault(format!(
                "cannot insert an empty element for a non-start-tag token: {other}"
            ))),
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, data: &str, whitespace_only: bool) {
        if data.is_empty() {
            return;
        }
        self.events
            .push_back(Event::character_data(data, whitespace_only, self.depth));
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        self.events.push_back(Event::comment(data, self.depth));
    }

    /// Add the attributes of a repeated `<html>` or `<body>` start tag to
    /// the element that is already open.
    ///
    /// "for each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If
    /// it is not, add the attribute and its corresponding value to that
    /// element."
    ///
    /// Since the element's start has already been emitted, the added
    /// attributes are reported as a synthetic empty element of the same name.
    pub(super) fn merge_attributes(&mut self, id: ElementId, attributes: &[Attribute]) {
        let Some(element) = self.arena.get_mut(id) else {
            return;
        };
        let added: Vec<Attribute> = attributes
            .iter()
            .filter(|attribute| {
                !element
                    .attributes
                    .iter()
                    .any(|existing| existing.name == attribute.name)
            })
            .cloned()
            .collect();
        if added.is_empty() {
            return;
        }
        element.attributes.extend(added.iter().cloned());
        let name = element.name.clone();
        self.events
            .push_back(Event::element(name, added, self.depth, true));
    }
}

// =============================================================================
// Stack of open elements
// =============================================================================

impl TreeConstructor {
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<ElementId> {
        self.open_elements.last().copied()
    }

    pub(super) fn current_node_name(&self) -> Option<&str> {
        self.current_node().and_then(|id| self.arena.name(id))
    }

    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node_name() == Some(name)
    }

    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node_name()
            .is_some_and(|current| names.contains(&current))
    }

    /// "Pop the current node off the stack of open elements", emitting its
    /// end.
    pub(super) fn pop_current(&mut self) -> Result<ElementId> {
        let id = self
            .open_elements
            .pop()
            .ok_or_else(|| Self::fault("popped an empty stack of open elements"))?;

        if Some(id) == self.head_element {
            self.head_end_pending = true;
            return Ok(id);
        }

        let name = self
            .arena
            .name(id)
            .map(str::to_string)
            .ok_or_else(|| Self::fault("open element was released from the arena"))?;
        self.depth = self.depth.saturating_sub(1);
        self.events.push_back(Event::end_element(name, self.depth));
        self.release_if_unreferenced(id);
        Ok(id)
    }

    /// Pop elements until one with the given tag name has been popped.
    pub(super) fn pop_until_tag(&mut self, tag_name: &str) -> Result<()> {
        self.pop_until_one_of(&[tag_name])
    }

    /// Pop elements until one whose tag name is in `tag_names` has been
    /// popped.
    pub(super) fn pop_until_one_of(&mut self, tag_names: &[&str]) -> Result<()> {
        while let Some(id) = self.current_node() {
            let matched = self
                .arena
                .name(id)
                .is_some_and(|name| tag_names.contains(&name));
            let _ = self.pop_current()?;
            if matched {
                break;
            }
        }
        Ok(())
    }

    /// Pop elements until `target` itself has been popped.
    pub(super) fn pop_until_element(&mut self, target: ElementId) -> Result<()> {
        while self.open_elements.contains(&target) {
            let _ = self.pop_current()?;
        }
        Ok(())
    }

    /// Remove an element from the stack without emitting anything. Only
    /// valid for the head element, whose end is emitted separately.
    pub(super) fn remove_head_from_stack(&mut self) {
        if let Some(head) = self.head_element {
            self.open_elements.retain(|&id| id != head);
            self.head_end_pending = true;
        }
    }

    /// Emit the head's end if it is still held back.
    pub(super) fn flush_pending_head_end(&mut self) {
        if !self.head_end_pending {
            return;
        }
        self.head_end_pending = false;
        self.depth = self.depth.saturating_sub(1);
        self.events.push_back(Event::end_element("head", self.depth));
    }

    /// Release an element's arena slot once nothing refers to it any more.
    pub(super) fn release_if_unreferenced(&mut self, id: ElementId) {
        let referenced = self.open_elements.contains(&id)
            || self.formatting.contains(id)
            || self.head_element == Some(id)
            || self.form_element == Some(id);
        if !referenced {
            self.arena.release(id);
        }
    }

    /// [§ 13.2.6.5 Stop parsing](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) -> Result<()> {
        while !self.open_elements.is_empty() {
            // A held back head end still belongs inside the root.
            if self.open_elements.len() == 1 {
                self.flush_pending_head_end();
            }
            let _ = self.pop_current()?;
        }
        self.flush_pending_head_end();
        self.head_element = None;
        self.form_element = None;
        self.finished = true;
        Ok(())
    }
}
