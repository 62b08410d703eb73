//! Reset command for smellbook.
//!
//! Clears all learned progress. Requires explicit confirmation.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, ProgressStore};

/// Options for the reset command.
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Confirm the reset.
    pub yes: bool,
}

/// Output format for the reset command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutput {
    /// Whether progress was cleared.
    pub success: bool,
    /// Number of learned smells that were forgotten.
    pub cleared: usize,
    /// Error message if the reset was refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The reset command implementation.
pub struct ResetCommand<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ResetCommand<S> {
    /// Create a new reset command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the reset command.
    pub fn run(&self, options: &ResetOptions) -> ResetOutput {
        let mut progress = ProgressStore::load(&self.store);
        let cleared = progress.count();

        if !options.yes {
            return ResetOutput {
                success: false,
                cleared: 0,
                error: Some(format!(
                    "refusing to forget {} learned smell(s) without --yes",
                    cleared
                )),
            };
        }

        progress.reset();
        tracing::debug!(cleared, "learned progress reset");

        ResetOutput {
            success: true,
            cleared,
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ResetOutput, options: &ResetOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Cleared {} learned smell(s).\n", output.cleared)
        } else {
            format!(
                "Reset failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
