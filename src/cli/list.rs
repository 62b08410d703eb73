//! List command for smellbook.
//!
//! Prints the listing for a tab, grouped the same way the browser shows it.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::{AppSession, SidebarGroup, SidebarView, Tab};
use crate::storage::KeyValueStore;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Tab to list (defaults to the configured tab).
    pub tab: Option<Tab>,
    /// Case-insensitive name filter.
    pub search: Option<String>,
}

/// Output format for the list command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    /// Whether the list was successful.
    pub success: bool,
    /// Tab that was listed.
    pub tab: Tab,
    /// Search term applied.
    pub search_term: String,
    /// Number of smells shown.
    pub count: usize,
    /// Smells, grouped.
    pub groups: Vec<SidebarGroup>,
    /// Error message if listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListOutput {
    /// Create a successful output.
    pub fn success(view: SidebarView) -> Self {
        Self {
            success: true,
            count: view.visible_count(),
            tab: view.tab,
            search_term: view.search_term,
            groups: view.groups,
            error: None,
        }
    }
}

/// The list command implementation.
pub struct ListCommand<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    store: S,
    default_tab: Tab,
}

impl<'c, S: KeyValueStore> ListCommand<'c, S> {
    /// Create a new list command.
    pub fn new(catalog: &'c Catalog, store: S, default_tab: Tab) -> Self {
        Self {
            catalog,
            store,
            default_tab,
        }
    }

    /// Run the list command.
    pub fn run(&self, options: &ListOptions) -> ListOutput {
        let tab = options.tab.unwrap_or(self.default_tab);
        let mut session = AppSession::new(self.catalog, &self.store, tab);
        if let Some(term) = &options.search {
            session.set_search_term(term.as_str());
        }
        ListOutput::success(session.sidebar())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ListOutput, options: &ListOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            format_groups(output.tab, &output.search_term, &output.groups)
        }
    }
}

/// Render grouped rows as text.
///
/// Learned smells are marked `[x]`, the smell in the detail view with `>`.
pub fn format_groups(tab: Tab, search_term: &str, groups: &[SidebarGroup]) -> String {
    let shown: usize = groups.iter().map(|g| g.entries.len()).sum();
    if shown == 0 {
        return if search_term.is_empty() {
            format!("No smells in the {} tab.\n", tab)
        } else {
            format!("No smells in the {} tab match '{}'.\n", tab, search_term)
        };
    }

    let mut lines = Vec::new();
    for group in groups {
        if group.entries.len() == group.total {
            lines.push(format!("{} ({})", group.title, group.total));
        } else {
            lines.push(format!(
                "{} ({} of {})",
                group.title,
                group.entries.len(),
                group.total
            ));
        }
        for entry in &group.entries {
            lines.push(format!(
                "{} [{}] {}",
                if entry.active { ">" } else { " " },
                if entry.learned { "x" } else { " " },
                entry.name
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
