//! Top-level view selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which slice of the catalog is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// All general smells, grouped by category.
    #[default]
    General,
    /// AWS Lambda anti-patterns.
    Lambda,
    /// The curated workshop subset of general smells.
    Workshop,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::General, Tab::Lambda, Tab::Workshop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::General => "general",
            Tab::Lambda => "lambda",
            Tab::Workshop => "workshop",
        }
    }

    /// Heading used when the tab is listed as a single group.
    pub fn heading(&self) -> &'static str {
        match self {
            Tab::General => "Code Smells",
            Tab::Lambda => "AWS Lambda Smells",
            Tab::Workshop => "Session 1 Code Smells",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Tab::General),
            "lambda" => Ok(Tab::Lambda),
            "workshop" => Ok(Tab::Workshop),
            other => Err(format!(
                "unknown tab '{}' (expected general, lambda or workshop)",
                other
            )),
        }
    }
}
