//! Stats command for smellbook.
//!
//! Shows how much of a tab has been learned.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::{AppSession, Stats, Tab};
use crate::storage::KeyValueStore;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Tab to report on (defaults to the configured tab).
    pub tab: Option<Tab>,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Whether stats were computed.
    pub success: bool,
    /// The counters.
    pub stats: Stats,
    /// Share of the tab learned, as a whole percentage.
    pub percent_learned: u32,
    /// Error message if stats failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsOutput {
    /// Create a successful output.
    pub fn success(stats: Stats) -> Self {
        let percent_learned = if stats.total == 0 {
            0
        } else {
            (stats.learned_in_tab * 100 / stats.total) as u32
        };
        Self {
            success: true,
            stats,
            percent_learned,
            error: None,
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    store: S,
    default_tab: Tab,
}

impl<'c, S: KeyValueStore> StatsCommand<'c, S> {
    /// Create a new stats command.
    pub fn new(catalog: &'c Catalog, store: S, default_tab: Tab) -> Self {
        Self {
            catalog,
            store,
            default_tab,
        }
    }

    /// Run the stats command.
    pub fn run(&self, options: &StatsOptions) -> StatsOutput {
        let tab = options.tab.unwrap_or(self.default_tab);
        let session = AppSession::new(self.catalog, &self.store, tab);
        StatsOutput::success(session.stats())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            format_stats(output)
        }
    }
}

/// Render stats as text.
pub fn format_stats(output: &StatsOutput) -> String {
    let stats = &output.stats;
    format!(
        "{}: {} smells, {} learned ({}%)\nLearned overall: {}\n",
        stats.tab.heading(),
        stats.total,
        stats.learned_in_tab,
        output.percent_learned,
        stats.learned
    )
}
