//! Link command for smellbook.
//!
//! Prints the share link for a smell.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cli::lookup;
use crate::core::deep_link::{share_link, slug};

/// Options for the link command.
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the link command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOutput {
    /// Whether the smell was found.
    pub success: bool,
    /// Canonical name of the smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fragment identifying the smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Full share link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Error message if the smell was not found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The link command implementation.
pub struct LinkCommand<'c> {
    catalog: &'c Catalog,
    base_url: String,
}

impl<'c> LinkCommand<'c> {
    /// Create a new link command.
    pub fn new(catalog: &'c Catalog, base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            base_url: base_url.into(),
        }
    }

    /// Run the link command.
    pub fn run(&self, name: &str) -> LinkOutput {
        match lookup(self.catalog, name) {
            Some(smell) => LinkOutput {
                success: true,
                name: Some(smell.name.clone()),
                fragment: Some(slug(&smell.name)),
                link: Some(share_link(&self.base_url, &smell.name)),
                error: None,
            },
            None => LinkOutput {
                success: false,
                name: None,
                fragment: None,
                link: None,
                error: Some(format!("smell not found: {}", name)),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LinkOutput, options: &LinkOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.link {
            Some(link) => format!("{}\n", link),
            None => format!(
                "Link failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
