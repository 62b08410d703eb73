//! File-based key/value storage for smellbook.
//!
//! Each key is stored in its own `<key>.json` file in `~/.smellbook/storage/`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::storage_dir;
use crate::error::{Result, SmellbookError};
use crate::storage::KeyValueStore;
use crate::util::read_to_string_limited;

/// File-based key/value storage.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store in the default directory.
    ///
    /// Uses `~/.smellbook/storage/` or `$SMELLBOOK_HOME/storage/`.
    pub fn new() -> Result<Self> {
        let dir = storage_dir().ok_or_else(|| {
            SmellbookError::config("Could not determine storage directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a store in a custom directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| SmellbookError::storage(&dir, e))?;
        }

        Ok(Self { dir })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Get the path for a key's file.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key))
    }

    /// Write a value atomically using temp file + rename.
    fn atomic_write(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.key_path(key)?;
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| SmellbookError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| SmellbookError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| SmellbookError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path)
            .map_err(|e| SmellbookError::storage(&final_path, e))?;

        Ok(())
    }
}

/// Keys become file names, so only a safe subset of characters is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SmellbookError::config(format!("invalid storage key '{}'", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        read_to_string_limited(&path).map(Some)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.atomic_write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if path.exists() {
            fs::remove_file(&path).map_err(|e| SmellbookError::storage(&path, e))?;
        }

        // Also clean up any temp file
        let temp_path = self.temp_path(key);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}
