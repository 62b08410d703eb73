//! Onboarding notice marker.
//!
//! Shares the key/value store with learned progress but is otherwise
//! independent of it.

use crate::error::FailOpen;
use crate::storage::KeyValueStore;

/// Storage key recording that the welcome notice was dismissed.
pub const WELCOME_SEEN_KEY: &str = "welcome_seen";

/// Whether the welcome notice has been dismissed.
///
/// Any stored value counts as dismissed. Unreadable storage counts as not
/// dismissed, so the notice shows again rather than never.
pub fn welcome_dismissed<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    store
        .contains(WELCOME_SEEN_KEY)
        .fail_open_with("reading welcome marker", false)
}

/// Record that the welcome notice was dismissed.
pub fn dismiss_welcome<S: KeyValueStore + ?Sized>(store: &S) {
    store
        .put(WELCOME_SEEN_KEY, "true")
        .fail_open_default("writing welcome marker")
}
