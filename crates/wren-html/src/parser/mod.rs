//! Tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The [`TreeConstructor`] pulls tokens from the tokenizer and turns them
//! into [`Event`](crate::event::Event)s. Elements live in an
//! [`ElementArena`]; the stack of open elements and the list of active
//! formatting elements hold [`ElementId`]s into it.

/// Element storage shared by the stack and the formatting list.
pub mod arena;
/// Compatibility mode detection from the DOCTYPE.
pub mod compat;
/// Construction phases, insertion modes and token dispatch.
pub mod core;
/// The list of active formatting elements.
pub mod formatting;

mod adoption;
mod body;
mod frameset;
mod head;
mod insert;
mod pending;
mod scope;
mod select;
mod table;

pub use arena::{Element, ElementArena, ElementId};
pub use compat::{CompatibilityMode, compatibility_mode_for_doctype};
pub use self::core::{InsertionMode, Phase, TreeConstructor};
pub use formatting::ActiveFormattingList;
pub use scope::Scope;
