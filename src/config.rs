//! Configuration loading for smellbook.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.smellbook/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::core::Tab;
use crate::error::{FailOpen, Result, SmellbookError};
use crate::util::read_to_string_limited;

/// Default share-link base used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://smellbook.dev/";

/// Main configuration struct for smellbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Durable storage configuration.
    pub storage: StorageConfig,
    /// Browsing defaults.
    pub browse: BrowseConfig,
    /// Share-link configuration.
    pub share: ShareConfig,
}

/// Durable storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the key/value store. Defaults to `<home>/storage`.
    pub dir: Option<PathBuf>,
}

/// Browsing defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowseConfig {
    /// Tab selected when a session starts.
    pub default_tab: Tab,
    /// Whether `browse` prints the onboarding notice until it is dismissed.
    pub show_welcome: bool,
    /// Whether `browse` prints a refactoring tip on start.
    pub show_tip: bool,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_tab: Tab::General,
            show_welcome: true,
            show_tip: true,
        }
    }
}

/// Share-link configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShareConfig {
    /// Base URL that deep-link fragments are appended to.
    pub base_url: String,
}

impl ShareConfig {
    /// Check if a base URL is usable.
    pub fn is_valid_base_url(value: &str) -> bool {
        let value = value.trim();
        !value.is_empty() && !value.chars().any(char::is_whitespace)
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. User config (`~/.smellbook/config.toml`)
    /// 3. Defaults
    pub fn load() -> Self {
        let mut config = config_path()
            .and_then(|path| {
                if !path.exists() {
                    return None;
                }
                Some(Self::load_from_file(&path).fail_open_default("loading user config"))
            })
            .unwrap_or_default();

        config.apply_env_overrides();
        config
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = read_to_string_limited(path)?;
        toml::from_str(&content).map_err(|e| SmellbookError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // SMELLBOOK_DEFAULT_TAB
        if let Ok(val) = env::var("SMELLBOOK_DEFAULT_TAB") {
            match val.parse::<Tab>() {
                Ok(tab) => self.browse.default_tab = tab,
                Err(_) => eprintln!(
                    "Warning: Invalid SMELLBOOK_DEFAULT_TAB value '{}'. \
                    Valid values: {:?}. Using default '{}'.",
                    val,
                    Tab::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
                    self.browse.default_tab
                ),
            }
        }

        // SMELLBOOK_SHOW_WELCOME
        if let Ok(val) = env::var("SMELLBOOK_SHOW_WELCOME") {
            match val.trim() {
                "true" | "1" => self.browse.show_welcome = true,
                "false" | "0" => self.browse.show_welcome = false,
                _ => eprintln!(
                    "Warning: Invalid SMELLBOOK_SHOW_WELCOME value '{}'. \
                    Valid values: true, false, 1, 0. Using default '{}'.",
                    val, self.browse.show_welcome
                ),
            }
        }

        // SMELLBOOK_BASE_URL
        if let Ok(val) = env::var("SMELLBOOK_BASE_URL") {
            if ShareConfig::is_valid_base_url(&val) {
                self.share.base_url = val.trim().to_string();
            } else {
                eprintln!(
                    "Warning: Invalid SMELLBOOK_BASE_URL value '{}'. \
                    Must be non-empty without whitespace. Using default '{}'.",
                    val, self.share.base_url
                );
            }
        }

        // SMELLBOOK_STORAGE_DIR
        if let Ok(val) = env::var("SMELLBOOK_STORAGE_DIR") {
            if val.trim().is_empty() {
                tracing::warn!("SMELLBOOK_STORAGE_DIR is empty, ignoring");
            } else {
                self.storage.dir = Some(PathBuf::from(val));
            }
        }
    }

    /// Directory for the key/value store, honoring `[storage] dir`.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage.dir.clone().or_else(storage_dir)
    }
}

/// Get the smellbook home directory.
///
/// Returns `$SMELLBOOK_HOME` if set, otherwise `~/.smellbook`.
/// Falls back to `/tmp/smellbook-<uid>` if HOME is unavailable.
///
/// # Validation
///
/// If `SMELLBOOK_HOME` is set, it must be non-empty. Relative paths are
/// canonicalized when they exist.
pub fn smellbook_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("SMELLBOOK_HOME") {
        if home.is_empty() {
            tracing::warn!("SMELLBOOK_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("SMELLBOOK_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".smellbook"));
    }

    // Containerized/minimal environments without HOME
    let fallback_path = fallback_smellbook_home();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get fallback home path when HOME is unavailable.
#[cfg(unix)]
fn fallback_smellbook_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/smellbook-{}", uid))
}

/// Get fallback home path when HOME is unavailable.
#[cfg(not(unix))]
fn fallback_smellbook_home() -> PathBuf {
    std::env::temp_dir().join("smellbook")
}

/// Get the user config path.
///
/// Returns `<home>/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    smellbook_home().map(|h| h.join("config.toml"))
}

/// Get the default key/value storage directory.
///
/// Returns `<home>/storage/`.
pub fn storage_dir() -> Option<PathBuf> {
    smellbook_home().map(|h| h.join("storage"))
}

/// Get the crash log path.
///
/// Returns `<home>/crash.log`.
pub fn crash_log_path() -> Option<PathBuf> {
    smellbook_home().map(|h| h.join("crash.log"))
}
