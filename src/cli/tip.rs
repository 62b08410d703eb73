//! Tip command for smellbook.
//!
//! Prints one refactoring tip chosen at random.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Options for the tip command.
#[derive(Debug, Clone, Default)]
pub struct TipOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the tip command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipOutput {
    /// Whether a tip was chosen.
    pub success: bool,
    /// The tip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// Error message if there are no tips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Choose a tip uniformly at random.
pub fn random_tip<'a, R: Rng>(tips: &'a [String], rng: &mut R) -> Option<&'a str> {
    if tips.is_empty() {
        return None;
    }
    Some(tips[rng.random_range(0..tips.len())].as_str())
}

/// The tip command implementation.
pub struct TipCommand<'c> {
    catalog: &'c Catalog,
}

impl<'c> TipCommand<'c> {
    /// Create a new tip command.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Run the tip command.
    pub fn run<R: Rng>(&self, rng: &mut R) -> TipOutput {
        match random_tip(self.catalog.tips(), rng) {
            Some(tip) => TipOutput {
                success: true,
                tip: Some(tip.to_string()),
                error: None,
            },
            None => TipOutput {
                success: false,
                tip: None,
                error: Some("the catalog has no tips".to_string()),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &TipOutput, options: &TipOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.tip {
            Some(tip) => format!("Tip: {}\n", tip),
            None => format!(
                "Tip failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
