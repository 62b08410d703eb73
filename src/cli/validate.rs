//! Validate command for smellbook.
//!
//! Runs the structural checks over the built-in catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::{validate, Catalog, CatalogIssue, CatalogStore};
use crate::core::Tab;

/// Options for the validate command.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the validate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the catalog has no issues.
    pub success: bool,
    /// Number of general smells.
    pub general: usize,
    /// Number of Lambda smells.
    pub lambda: usize,
    /// Number of workshop smells.
    pub workshop: usize,
    /// Number of refactoring tips.
    pub tips: usize,
    /// Problems found.
    pub issues: Vec<CatalogIssue>,
    /// Error message if validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The validate command implementation.
pub struct ValidateCommand<'c> {
    catalog: &'c Catalog,
}

impl<'c> ValidateCommand<'c> {
    /// Create a new validate command.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Run the validate command.
    pub fn run(&self) -> ValidateOutput {
        let issues = validate(self.catalog);
        let error = if issues.is_empty() {
            None
        } else {
            Some(format!("{} issue(s) found", issues.len()))
        };

        ValidateOutput {
            success: issues.is_empty(),
            general: self.catalog.all_smells(Tab::General).len(),
            lambda: self.catalog.all_smells(Tab::Lambda).len(),
            workshop: self.catalog.all_smells(Tab::Workshop).len(),
            tips: self.catalog.tips().len(),
            issues,
            error,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ValidateOutput, options: &ValidateOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        let mut lines = vec![format!(
            "Catalog: {} general ({} workshop), {} Lambda, {} tips",
            output.general, output.workshop, output.lambda, output.tips
        )];

        if output.issues.is_empty() {
            lines.push("No issues found.".to_string());
        } else {
            lines.push(format!("{} issue(s):", output.issues.len()));
            for issue in &output.issues {
                lines.push(format!("  - {}: {}", issue.smell, issue.problem));
            }
        }
        lines.push(String::new());

        lines.join("\n")
    }
}
