//! In-memory key/value storage for testing.
//!
//! This module provides a thread-safe in-memory implementation of the
//! KeyValueStore trait, used wherever a test needs progress storage
//! without touching the filesystem.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::storage::KeyValueStore;

/// In-memory key/value store.
///
/// Values are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    writes: RwLock<usize>,
}

impl MemoryKeyValueStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of keys in the store.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Number of `put` calls seen so far.
    pub fn write_count(&self) -> usize {
        *self.writes.read().unwrap()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        *self.writes.write().unwrap() += 1;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}
