//! Unified error types for smellbook with fail-open handling.
//!
//! Nothing in smellbook is fatal. Lookups that miss leave the selection as
//! it was, and storage problems degrade to empty progress. Errors that must
//! not reach the user are logged and replaced with a safe default through
//! [`FailOpen`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::Tab;

/// The main error type for smellbook operations.
#[derive(Error, Debug)]
pub enum SmellbookError {
    /// I/O errors from the key/value store or config files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// The catalog document is structurally invalid.
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// No smell with the given name exists in either catalog.
    #[error("smell not found: {name}")]
    SmellNotFound { name: String },

    /// A random pick was requested from a tab with no smells.
    #[error("nothing to pick: the {tab} tab is empty")]
    EmptyTab { tab: Tab },

    /// An operation needed a current smell but none has been picked yet.
    #[error("no smell is selected")]
    NothingSelected,

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// The interactive line editor failed.
    #[error("terminal error: {message}")]
    Terminal { message: String },
}

/// A specialized Result type for smellbook operations.
pub type Result<T> = std::result::Result<T, SmellbookError>;

impl SmellbookError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a smell not found error.
    pub fn smell_not_found(name: impl Into<String>) -> Self {
        Self::SmellNotFound { name: name.into() }
    }

    /// Create an empty tab error.
    pub fn empty_tab(tab: Tab) -> Self {
        Self::EmptyTab { tab }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a terminal error.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}

impl From<io::Error> for SmellbookError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SmellbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SmellbookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Progress tracking is a convenience: a broken store must never block
/// browsing. These helpers log a warning and return a fallback value.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the smellbook CLI.
pub mod exit_codes {
    /// The command did what was asked.
    pub const SUCCESS: i32 = 0;

    /// The command was understood but could not be completed
    /// (unknown smell, empty tab, nothing selected).
    pub const FAILURE: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
