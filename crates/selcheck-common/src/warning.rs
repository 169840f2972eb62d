//! Selector warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the grammar and the CLI to report unsupported selector features.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings reach stderr at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// A poisoned set only means another thread panicked mid-insert; the set itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about an unsupported feature (prints once per unique message)
///
/// Returns `true` the first time a message is seen, whether or not output
/// is currently enabled.
///
/// # Example
/// ```ignore
/// warn_once("Selectors", "combinator '>' is not supported");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = warned().get_or_insert_with(HashSet::new).insert(key);

    if first_time && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[selcheck {component}] ⚠ {message}").yellow());
    }
    first_time
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn emitted() -> usize {
    warned().as_ref().map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before checking a new batch of selectors)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

/// Turn warning output on or off. Disabled warnings are still deduplicated.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}
