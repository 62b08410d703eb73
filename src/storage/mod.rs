//! Durable key/value storage for smellbook.
//!
//! This module provides the storage trait, file-based and in-memory
//! backends, and the two entries kept in them: learned progress and the
//! onboarding marker.

pub mod file;
pub mod memory;
pub mod notice;
pub mod progress;
pub mod traits;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use notice::{dismiss_welcome, welcome_dismissed, WELCOME_SEEN_KEY};
pub use progress::{load_learned, persist_learned, ProgressStore, LEARNED_SMELLS_KEY};
pub use traits::KeyValueStore;
