//! Events produced by the tree constructor.
//!
//! The event stream is a depth-first walk of the document the HTML parsing
//! algorithm would build. Every `Element` event that is not an empty element
//! is matched by exactly one `EndElement` event at the same depth.

use serde::Serialize;
use strum_macros::Display;

use crate::tokenizer::Attribute;

/// What an [`Event`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum NodeKind {
    /// A start tag. Void elements are reported with `is_empty_element` set
    /// and get no `EndElement`.
    Element,
    /// The end of a non-void element.
    EndElement,
    /// Character data containing at least one non-space character.
    Text,
    /// Character data made only of space characters.
    Whitespace,
    /// A comment.
    Comment,
    /// The DOCTYPE. Identifiers are exposed as the `PUBLIC` and `SYSTEM`
    /// attributes.
    DocumentType,
}

/// One node of the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// The kind of node.
    pub kind: NodeKind,
    /// Tag name for elements, DOCTYPE name for the document type, empty
    /// otherwise.
    pub name: String,
    /// Text of character data and comments, empty otherwise.
    pub value: String,
    /// Attributes of an element or document type, in source order.
    pub attributes: Vec<Attribute>,
    /// Number of elements open around this node.
    pub depth: usize,
    /// True for elements that have no contents and no `EndElement`.
    pub is_empty_element: bool,
}

impl Event {
    pub(crate) fn element(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        depth: usize,
        is_empty_element: bool,
    ) -> Self {
        Self {
            kind: NodeKind::Element,
            name: name.into(),
            value: String::new(),
            attributes,
            depth,
            is_empty_element,
        }
    }

    pub(crate) fn end_element(name: impl Into<String>, depth: usize) -> Self {
        Self {
            kind: NodeKind::EndElement,
            name: name.into(),
            value: String::new(),
            attributes: Vec::new(),
            depth,
            is_empty_element: false,
        }
    }

    pub(crate) fn character_data(
        data: impl Into<String>,
        whitespace_only: bool,
        depth: usize,
    ) -> Self {
        Self {
            kind: if whitespace_only {
                NodeKind::Whitespace
            } else {
                NodeKind::Text
            },
            name: String::new(),
            value: data.into(),
            attributes: Vec::new(),
            depth,
            is_empty_element: false,
        }
    }

    pub(crate) fn comment(data: impl Into<String>, depth: usize) -> Self {
        Self {
            kind: NodeKind::Comment,
            name: String::new(),
            value: data.into(),
            attributes: Vec::new(),
            depth,
            is_empty_element: false,
        }
    }

    pub(crate) fn document_type(
        name: Option<String>,
        public_identifier: Option<String>,
        system_identifier: Option<String>,
    ) -> Self {
        let mut attributes = Vec::new();
        if let Some(public) = public_identifier {
            attributes.push(Attribute::new("PUBLIC", public));
        }
        if let Some(system) = system_identifier {
            attributes.push(Attribute::new("SYSTEM", system));
        }
        Self {
            kind: NodeKind::DocumentType,
            name: name.unwrap_or_default(),
            value: String::new(),
            attributes,
            depth: 0,
            is_empty_element: true,
        }
    }

    /// The attribute at `index`.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// The value of the attribute called `name`. Names are compared
    /// case-sensitively.
    #[must_use]
    pub fn attribute_by_name(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// True for `Text` and `Whitespace` events.
    #[must_use]
    pub const fn is_character_data(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::Whitespace)
    }
}
