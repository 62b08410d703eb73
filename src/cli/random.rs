//! Random command for smellbook.
//!
//! Picks a smell uniformly at random from a tab.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cli::show::format_detail;
use crate::core::{AppSession, SmellDetail, Tab};
use crate::storage::KeyValueStore;

/// Options for the random command.
#[derive(Debug, Clone, Default)]
pub struct RandomOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Tab to pick from (defaults to the configured tab).
    pub tab: Option<Tab>,
}

/// Output format for the random command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomOutput {
    /// Whether a smell was picked.
    pub success: bool,
    /// Tab the smell was picked from.
    pub tab: Tab,
    /// The picked smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smell: Option<SmellDetail>,
    /// Error message if the tab was empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The random command implementation.
pub struct RandomCommand<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    store: S,
    default_tab: Tab,
}

impl<'c, S: KeyValueStore> RandomCommand<'c, S> {
    /// Create a new random command.
    pub fn new(catalog: &'c Catalog, store: S, default_tab: Tab) -> Self {
        Self {
            catalog,
            store,
            default_tab,
        }
    }

    /// Run the random command.
    pub fn run<R: Rng>(&self, options: &RandomOptions, rng: &mut R) -> RandomOutput {
        let tab = options.tab.unwrap_or(self.default_tab);
        let mut session = AppSession::new(self.catalog, &self.store, tab);

        match session.pick_random(rng) {
            Ok(_) => RandomOutput {
                success: true,
                tab,
                smell: session.current_detail(),
                error: None,
            },
            Err(e) => RandomOutput {
                success: false,
                tab,
                smell: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RandomOutput, options: &RandomOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.smell {
            Some(detail) => format_detail(detail),
            None => format!(
                "Random pick failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::storage::MemoryKeyValueStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_from_requested_tab() {
        let catalog = sample_catalog();
        let cmd = RandomCommand::new(&catalog, MemoryKeyValueStore::new(), Tab::General);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let output = cmd.run(
                &RandomOptions {
                    tab: Some(Tab::Lambda),
                    ..Default::default()
                },
                &mut rng,
            );
            assert!(output.success);
            assert_eq!(output.tab, Tab::Lambda);
            assert!(output.smell.unwrap().why.is_some());
        }
    }

    #[test]
    fn test_random_defaults_to_configured_tab() {
        let catalog = sample_catalog();
        let cmd = RandomCommand::new(&catalog, MemoryKeyValueStore::new(), Tab::Workshop);
        let mut rng = StdRng::seed_from_u64(3);

        let output = cmd.run(&RandomOptions::default(), &mut rng);
        assert_eq!(output.tab, Tab::Workshop);
        assert_eq!(
            output.smell.unwrap().workshop_badge.as_deref(),
            Some("Session 1")
        );
    }

    #[test]
    fn test_random_empty_tab() {
        let catalog = Catalog::new(Vec::new(), Vec::new(), Vec::new());
        let cmd = RandomCommand::new(&catalog, MemoryKeyValueStore::new(), Tab::Lambda);
        let mut rng = StdRng::seed_from_u64(1);

        let output = cmd.run(&RandomOptions::default(), &mut rng);
        assert!(!output.success);
        assert!(output.smell.is_none());

        let text = cmd.format_output(&output, &RandomOptions::default());
        assert!(text.starts_with("Random pick failed:"));
    }
}
