//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! The list is kept as a stack of segments. Pushing a marker starts a new
//! segment and clearing up to the last marker drops the newest one, so "the
//! elements after the last marker" is always the last segment.

use super::arena::{ElementArena, ElementId};

/// The list of active formatting elements.
#[derive(Debug)]
pub struct ActiveFormattingList {
    segments: Vec<Vec<ElementId>>,
}

impl Default for ActiveFormattingList {
    fn default() -> Self {
        Self {
            segments: vec![Vec::new()],
        }
    }
}

impl ActiveFormattingList {
    /// "Insert a marker at the end of the list of active formatting elements."
    pub fn push_marker(&mut self) {
        self.segments.push(Vec::new());
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// Returns the elements that were removed.
    pub fn clear_to_last_marker(&mut self) -> Vec<ElementId> {
        if self.segments.len() > 1 {
            self.segments.pop().unwrap_or_default()
        } else {
            self.segments
                .last_mut()
                .map(std::mem::take)
                .unwrap_or_default()
        }
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// Includes the Noah's Ark clause: "If there are already three elements
    /// in the list of active formatting elements after the last marker, if
    /// any, or anywhere in the list if there are no markers, that have the
    /// same tag name, namespace, and attributes as element, then remove the
    /// earliest such element from the list of active formatting elements."
    ///
    /// Returns the element dropped by the Noah's Ark clause, if any.
    pub fn push(&mut self, id: ElementId, arena: &ElementArena) -> Option<ElementId> {
        let segment = self.last_segment_mut();
        let mut removed = None;

        if let Some(element) = arena.get(id) {
            let matching: Vec<usize> = segment
                .iter()
                .enumerate()
                .filter(|&(_, &entry)| {
                    arena
                        .get(entry)
                        .is_some_and(|other| other.matches(element))
                })
                .map(|(position, _)| position)
                .collect();
            if matching.len() >= 3 {
                removed = Some(segment.remove(matching[0]));
            }
        }

        segment.push(id);
        removed
    }

    /// The elements after the last marker, oldest first.
    #[must_use]
    pub fn after_last_marker(&self) -> &[ElementId] {
        self.segments.last().map_or(&[], Vec::as_slice)
    }

    /// True if the element is anywhere in the list.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.segments.iter().any(|segment| segment.contains(&id))
    }

    /// The last element after the last marker with the given tag name.
    #[must_use]
    pub fn find_after_last_marker(&self, name: &str, arena: &ElementArena) -> Option<ElementId> {
        self.after_last_marker()
            .iter()
            .rev()
            .copied()
            .find(|&id| arena.name(id) == Some(name))
    }

    /// Remove an element from the list. Returns true if it was present.
    pub fn remove(&mut self, id: ElementId) -> bool {
        for segment in &mut self.segments {
            if let Some(position) = segment.iter().position(|&entry| entry == id) {
                let _ = segment.remove(position);
                return true;
            }
        }
        false
    }

    /// Replace `old` with `new` in place.
    pub fn replace(&mut self, old: ElementId, new: ElementId) {
        for segment in &mut self.segments {
            if let Some(entry) = segment.iter_mut().find(|entry| **entry == old) {
                *entry = new;
                return;
            }
        }
    }

    /// True if the list holds no elements and no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty()
    }

    fn last_segment_mut(&mut self) -> &mut Vec<ElementId> {
        if self.segments.is_empty() {
            self.segments.push(Vec::new());
        }
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }
}
