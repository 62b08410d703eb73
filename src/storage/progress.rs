//! Learned-progress persistence.
//!
//! The learned set lives under a single key as a JSON list of smell names.
//! It is loaded once at startup and written back whole on every mutation.
//! Storage failures never reach the caller: a missing or corrupt entry
//! loads as an empty set, and failed writes are logged and dropped.

use std::collections::BTreeSet;

use crate::error::{FailOpen, Result, SmellbookError};
use crate::storage::KeyValueStore;

/// Storage key for the learned set.
pub const LEARNED_SMELLS_KEY: &str = "learned_smells";

/// Read the learned set from storage, failing if the entry is unreadable.
pub fn try_load_learned<S: KeyValueStore + ?Sized>(store: &S) -> Result<BTreeSet<String>> {
    let Some(raw) = store.get(LEARNED_SMELLS_KEY)? else {
        return Ok(BTreeSet::new());
    };
    let names: Vec<String> = serde_json::from_str(&raw)
        .map_err(|e| SmellbookError::serde(format!("learned smells entry: {}", e)))?;
    Ok(names.into_iter().collect())
}

/// Read the learned set from storage.
///
/// Missing, unreadable or unparseable data yields the empty set.
pub fn load_learned<S: KeyValueStore + ?Sized>(store: &S) -> BTreeSet<String> {
    try_load_learned(store).fail_open_default("loading learned smells")
}

/// Write the whole learned set, failing if storage rejects it.
pub fn try_persist_learned<S: KeyValueStore + ?Sized>(
    store: &S,
    learned: &BTreeSet<String>,
) -> Result<()> {
    let json = serde_json::to_string(learned)?;
    store.put(LEARNED_SMELLS_KEY, &json)
}

/// Write the whole learned set; failures are logged and swallowed.
pub fn persist_learned<S: KeyValueStore + ?Sized>(store: &S, learned: &BTreeSet<String>) {
    try_persist_learned(store, learned).fail_open_default("persisting learned smells")
}

/// The learned set plus the store it is persisted to.
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    learned: BTreeSet<String>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Load progress from `store`.
    pub fn load(store: S) -> Self {
        let learned = load_learned(&store);
        tracing::debug!(count = learned.len(), "loaded learned smells");
        Self { store, learned }
    }

    pub fn is_learned(&self, name: &str) -> bool {
        self.learned.contains(name)
    }

    /// Mark `name` as learned or not, then persist.
    ///
    /// Setting the state it already has leaves the set unchanged but still
    /// writes it back.
    pub fn toggle_learned(&mut self, name: &str, learned: bool) {
        if learned {
            self.learned.insert(name.to_string());
        } else {
            self.learned.remove(name);
        }
        self.persist();
    }

    /// Write the current set to storage.
    pub fn persist(&self) {
        persist_learned(&self.store, &self.learned);
    }

    /// Size of the learned set, regardless of tab or filter.
    pub fn count(&self) -> usize {
        self.learned.len()
    }

    /// Learned names in sorted order.
    pub fn learned(&self) -> &BTreeSet<String> {
        &self.learned
    }

    /// Forget all progress and remove the storage entry.
    pub fn reset(&mut self) {
        self.learned.clear();
        self.store
            .delete(LEARNED_SMELLS_KEY)
            .fail_open_default("clearing learned smells");
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::UnavailableStore;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryKeyValueStore::new();
        assert!(load_learned(&store).is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let store = MemoryKeyValueStore::new();
        store.put(LEARNED_SMELLS_KEY, "not json").unwrap();
        assert!(load_learned(&store).is_empty());
        assert!(try_load_learned(&store).is_err());

        store.put(LEARNED_SMELLS_KEY, "{\"Dead Code\": true}").unwrap();
        assert!(load_learned(&store).is_empty());
    }

    #[test]
    fn test_load_unavailable_is_empty() {
        assert!(load_learned(&UnavailableStore).is_empty());
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryKeyValueStore::new();
        let learned = set(&["Long Method", "Dead Code"]);
        persist_learned(&store, &learned);
        assert_eq!(load_learned(&store), learned);
    }

    #[test]
    fn test_round_trip_across_restarts() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileKeyValueStore::with_dir(dir.path()).unwrap();
            let mut progress = ProgressStore::load(store);
            progress.toggle_learned("Long Method", true);
            progress.toggle_learned("Dead Code", true);
        }

        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();
        let progress = ProgressStore::load(store);
        assert_eq!(progress.learned(), &set(&["Long Method", "Dead Code"]));
    }

    #[test]
    fn test_accepts_duplicate_entries_in_storage() {
        let store = MemoryKeyValueStore::new();
        store
            .put(LEARNED_SMELLS_KEY, "[\"Dead Code\",\"Dead Code\"]")
            .unwrap();
        let progress = ProgressStore::load(store);
        assert_eq!(progress.count(), 1);
    }

    #[test]
    fn test_toggle_idempotent_but_persists() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut progress = ProgressStore::load(Arc::clone(&store));

        progress.toggle_learned("Long Method", true);
        assert_eq!(progress.learned(), &set(&["Long Method"]));
        progress.toggle_learned("Long Method", true);
        assert_eq!(progress.learned(), &set(&["Long Method"]));
        assert_eq!(store.write_count(), 2);

        progress.toggle_learned("Dead Code", false);
        assert_eq!(progress.learned(), &set(&["Long Method"]));
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn test_toggle_off() {
        let store = MemoryKeyValueStore::new();
        let mut progress = ProgressStore::load(store);
        progress.toggle_learned("Middle Man", true);
        assert!(progress.is_learned("Middle Man"));
        progress.toggle_learned("Middle Man", false);
        assert!(!progress.is_learned("Middle Man"));
        assert_eq!(progress.count(), 0);
        assert_eq!(load_learned(progress.store()), BTreeSet::new());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut progress = ProgressStore::load(UnavailableStore);
        progress.toggle_learned("Long Method", true);
        // The in-memory set still reflects the toggle
        assert!(progress.is_learned("Long Method"));
        assert_eq!(progress.count(), 1);
        progress.reset();
        assert_eq!(progress.count(), 0);
    }

    #[test]
    fn test_reset_removes_entry() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut progress = ProgressStore::load(Arc::clone(&store));
        progress.toggle_learned("Dead Code", true);
        assert!(store.contains(LEARNED_SMELLS_KEY).unwrap());

        progress.reset();

        assert_eq!(progress.count(), 0);
        assert!(!store.contains(LEARNED_SMELLS_KEY).unwrap());
    }

    #[test]
    fn test_persisted_format_is_string_list() {
        let store = MemoryKeyValueStore::new();
        persist_learned(&store, &set(&["Middle Man", "Dead Code"]));
        let raw = store.get(LEARNED_SMELLS_KEY).unwrap().unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec!["Dead Code", "Middle Man"]);
    }

    mod proptests {
        use super::*;
        use proptest::collection::btree_set;
        use proptest::prelude::*;

        proptest! {
            // Property: load after persist yields the same set
            #[test]
            fn prop_persist_load_round_trip(names in btree_set(".{0,24}", 0..12)) {
                let store = MemoryKeyValueStore::new();
                persist_learned(&store, &names);
                prop_assert_eq!(load_learned(&store), names);
            }

            // Property: toggling a name on twice equals toggling it on once
            #[test]
            fn prop_toggle_on_is_idempotent(name in "[A-Za-z ]{1,20}") {
                let mut progress = ProgressStore::load(MemoryKeyValueStore::new());
                progress.toggle_learned(&name, true);
                let once = progress.learned().clone();
                progress.toggle_learned(&name, true);
                prop_assert_eq!(progress.learned(), &once);
            }
        }
    }
}
