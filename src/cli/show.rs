//! Show command for smellbook.
//!
//! Prints the full detail view of one smell, addressed by name or by a
//! share-link fragment.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cli::lookup;
use crate::core::deep_link::share_link;
use crate::core::{AppSession, SmellDetail, Tab};
use crate::error::SmellbookError;
use crate::storage::KeyValueStore;
use crate::util::indent;

/// How the smell to show is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    /// A smell name, matched exactly and then ignoring case.
    Name(String),
    /// A deep-link fragment or full share link.
    Link(String),
}

/// Options for the show command.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the show command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowOutput {
    /// Whether a smell was found.
    pub success: bool,
    /// The smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smell: Option<SmellDetail>,
    /// Share link for the smell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Error message if the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ShowOutput {
    /// Create a successful output.
    pub fn success(smell: SmellDetail, link: String) -> Self {
        Self {
            success: true,
            smell: Some(smell),
            link: Some(link),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            smell: None,
            link: None,
            error: Some(error.into()),
        }
    }
}

/// The show command implementation.
pub struct ShowCommand<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    store: S,
    base_url: String,
}

impl<'c, S: KeyValueStore> ShowCommand<'c, S> {
    /// Create a new show command.
    pub fn new(catalog: &'c Catalog, store: S, base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            store,
            base_url: base_url.into(),
        }
    }

    /// Run the show command.
    pub fn run(&self, target: &ShowTarget) -> ShowOutput {
        let mut session = AppSession::new(self.catalog, &self.store, Tab::default());

        let picked = match target {
            ShowTarget::Name(name) => match lookup(self.catalog, name) {
                Some(smell) => session.pick(&smell.name),
                None => Err(SmellbookError::smell_not_found(name.as_str())),
            },
            ShowTarget::Link(fragment) => session.open_deep_link(fragment),
        };

        match picked.ok().and_then(|_| session.current_detail()) {
            Some(detail) => {
                let link = share_link(&self.base_url, &detail.name);
                ShowOutput::success(detail, link)
            }
            None => ShowOutput::failure(match target {
                ShowTarget::Name(name) => format!("smell not found: {}", name),
                ShowTarget::Link(fragment) => format!("no smell matches link '{}'", fragment),
            }),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ShowOutput, options: &ShowOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match (&output.smell, &output.error) {
            (Some(detail), _) => {
                let mut text = format_detail(detail);
                if let Some(link) = &output.link {
                    text.push_str(&format!("\nLink: {}\n", link));
                }
                text
            }
            (None, error) => format!(
                "Show failed: {}\n",
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Render the detail view as text.
///
/// Sections without content for this kind of smell are left out.
pub fn format_detail(detail: &SmellDetail) -> String {
    let mut lines = Vec::new();

    let mut title = format!("{}  [{}]", detail.name, detail.category);
    if let Some(badge) = &detail.workshop_badge {
        title.push_str(&format!(" [{}]", badge));
    }
    if detail.learned {
        title.push_str(" (learned)");
    }
    lines.push(title);
    lines.push(String::new());
    lines.push(detail.brief.clone());
    lines.push(String::new());

    if let Some(why) = &detail.why {
        lines.push("Why it matters:".to_string());
        lines.push(indent(why, 2));
        lines.push(String::new());
    }

    lines.push("How to spot it:".to_string());
    for indicator in &detail.indicators {
        lines.push(format!("  - {}", indicator));
    }
    lines.push(String::new());

    lines.push("Before:".to_string());
    lines.push(indent(&detail.bad_example, 4));
    lines.push(String::new());
    lines.push("After:".to_string());
    lines.push(indent(&detail.good_example, 4));
    lines.push(String::new());

    lines.push("How to fix it:".to_string());
    for (i, step) in detail.fix_steps.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, step));
    }

    if let Some(techniques) = &detail.techniques {
        if !techniques.is_empty() {
            lines.push(String::new());
            lines.push(format!("Refactoring techniques: {}", techniques.join(", ")));
        }
    }
    lines.push(String::new());

    lines.join("\n")
}
