//! Storage for open and formatting elements.
//!
//! The stack of open elements and the list of active formatting elements
//! both refer to elements by [`ElementId`]. Two entries denote the same
//! element exactly when their ids are equal; a clone made while
//! reconstructing the active formatting elements gets a fresh id.

use crate::tokenizer::Attribute;

/// Index of an element in the [`ElementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    /// The raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An element the tree constructor is tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// True if the element has the same tag name and attributes as `other`,
    /// regardless of attribute order.
    ///
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    /// "two elements have the same attributes if all their parsed attributes
    /// can be paired such that the two attributes in each pair have identical
    /// names, namespaces, and values (the order of the attributes does not
    /// matter)."
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes.len() == other.attributes.len()
            && self.attributes.iter().all(|attribute| {
                other.attributes.iter().any(|candidate| {
                    candidate.name == attribute.name && candidate.value == attribute.value
                })
            })
    }
}

/// Slab of elements with slot reuse.
#[derive(Debug, Default)]
pub struct ElementArena {
    slots: Vec<Option<Element>>,
    free: Vec<usize>,
}

impl ElementArena {
    /// Store an element and return its id.
    pub fn allocate(&mut self, name: impl Into<String>, attributes: Vec<Attribute>) -> ElementId {
        let element = Element {
            name: name.into(),
            attributes,
        };
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(element);
            ElementId(index)
        } else {
            self.slots.push(Some(element));
            ElementId(self.slots.len() - 1)
        }
    }

    /// Store a copy of `id` under a new id. The copy has the same tag name
    /// and attributes but a different identity.
    pub fn clone_element(&mut self, id: ElementId) -> Option<ElementId> {
        let element = self.get(id)?.clone();
        Some(self.allocate(element.name, element.attributes))
    }

    /// The element stored under `id`, if the slot is still live.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to a live element.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Tag name of a live element.
    #[must_use]
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|element| element.name.as_str())
    }

    /// Drop the element stored under `id` and make its slot reusable.
    pub fn release(&mut self, id: ElementId) {
        if let Some(slot) = self.slots.get_mut(id.0)
            && slot.take().is_some()
        {
            self.free.push(id.0);
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
