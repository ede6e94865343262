//! Parser warnings with colored terminal output.
//!
//! Warnings are not parse errors. They flag places where the streaming parser
//! had to approximate a tree-mutating algorithm, or met a feature it does not
//! support (script execution). Each unique message is printed once per process
//! until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about an approximated or unsupported feature (prints once per unique message).
///
/// Returns `true` if the warning was printed, `false` if it had already been
/// seen.
///
/// # Example
/// ```
/// use wren_common::warning::warn_once;
///
/// let _ = warn_once("HTML Parser", "<script> content is not executed");
/// assert!(!warn_once("HTML Parser", "<script> content is not executed"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        eprintln!("{}", format!("[Wren {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call when starting on a new document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
