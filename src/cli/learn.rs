//! Learn command for smellbook.
//!
//! Marks a smell as learned, or clears the mark (`unlearn`).

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cli::lookup;
use crate::core::{AppSession, Tab};
use crate::error::{Result, SmellbookError};
use crate::storage::KeyValueStore;

/// Options for the learn command.
#[derive(Debug, Clone, Default)]
pub struct LearnOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the learn command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnOutput {
    /// Whether the learned state was recorded.
    pub success: bool,
    /// Canonical name of the smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New learned state.
    pub learned: bool,
    /// Learned smells overall after the change.
    pub learned_count: usize,
    /// Error message if the smell was not found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The learn command implementation.
pub struct LearnCommand<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    store: S,
}

impl<'c, S: KeyValueStore> LearnCommand<'c, S> {
    /// Create a new learn command.
    pub fn new(catalog: &'c Catalog, store: S) -> Self {
        Self { catalog, store }
    }

    /// Set the learned state of `name`.
    pub fn run(&self, name: &str, learned: bool) -> LearnOutput {
        let mut session = AppSession::new(self.catalog, &self.store, Tab::default());

        let result: Result<String> = lookup(self.catalog, name)
            .ok_or_else(|| SmellbookError::smell_not_found(name))
            .and_then(|smell| session.pick(&smell.name))
            .and_then(|_| session.set_current_learned(learned))
            .map(|smell| smell.name.clone());

        match result {
            Ok(name) => LearnOutput {
                success: true,
                name: Some(name),
                learned,
                learned_count: session.progress().count(),
                error: None,
            },
            Err(e) => LearnOutput {
                success: false,
                name: None,
                learned: false,
                learned_count: session.progress().count(),
                error: Some(e.to_string()),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LearnOutput, options: &LearnOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.name {
            Some(name) if output.learned => format!(
                "Marked '{}' as learned ({} learned).\n",
                name, output.learned_count
            ),
            Some(name) => format!(
                "Marked '{}' as not learned ({} learned).\n",
                name, output.learned_count
            ),
            None => format!(
                "Learn failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
