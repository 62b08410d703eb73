//! Smell entity types.
//!
//! A smell is either a general object-oriented smell, filed under one of
//! five fixed categories, or an AWS Lambda anti-pattern with a free-form
//! category label. The two shapes carry different optional sections
//! (refactoring techniques vs. a cost rationale), so they are modelled as a
//! tagged variant rather than one struct with presence-tested fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::deep_link;

/// Badge shown for Lambda smells that carry no category label.
pub const LAMBDA_BADGE: &str = "AWS Lambda";

/// The five general smell categories, in their fixed display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GeneralCategory {
    Bloaters,
    OoAbusers,
    ChangePreventers,
    Dispensables,
    Couplers,
}

impl GeneralCategory {
    /// All categories in declared order.
    pub const ALL: [GeneralCategory; 5] = [
        GeneralCategory::Bloaters,
        GeneralCategory::OoAbusers,
        GeneralCategory::ChangePreventers,
        GeneralCategory::Dispensables,
        GeneralCategory::Couplers,
    ];

    /// Human-readable category name.
    pub fn label(&self) -> &'static str {
        match self {
            GeneralCategory::Bloaters => "Bloaters",
            GeneralCategory::OoAbusers => "OO Abusers",
            GeneralCategory::ChangePreventers => "Change Preventers",
            GeneralCategory::Dispensables => "Dispensables",
            GeneralCategory::Couplers => "Couplers",
        }
    }

    /// Key used in the catalog document.
    pub fn key(&self) -> &'static str {
        match self {
            GeneralCategory::Bloaters => "bloaters",
            GeneralCategory::OoAbusers => "oo_abusers",
            GeneralCategory::ChangePreventers => "change_preventers",
            GeneralCategory::Dispensables => "dispensables",
            GeneralCategory::Couplers => "couplers",
        }
    }
}

impl fmt::Display for GeneralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GeneralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneralCategory::ALL
            .into_iter()
            .find(|c| c.key() == s || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Membership in the curated workshop subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    /// Session that covers the smell; orders the workshop listing.
    pub session: Option<u32>,
}

impl Workshop {
    /// Sort key within the workshop listing. Unscheduled smells go last.
    pub fn sort_key(&self) -> u32 {
        self.session.unwrap_or(u32::MAX)
    }
}

/// Variant-specific smell data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmellKind {
    /// General object-oriented smell.
    General {
        category: GeneralCategory,
        techniques: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workshop: Option<Workshop>,
    },
    /// AWS Lambda anti-pattern.
    Lambda {
        category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        why: Option<String>,
    },
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Smell {
    /// Globally unique display name; doubles as the identifier.
    pub name: String,
    /// One-line description.
    pub brief: String,
    /// Signs that the smell is present.
    pub indicators: Vec<String>,
    /// Example code exhibiting the smell.
    pub bad_example: String,
    /// The same example after remediation.
    pub good_example: String,
    /// Ordered remediation steps.
    pub fix_steps: Vec<String>,
    /// General or Lambda specifics.
    #[serde(flatten)]
    pub kind: SmellKind,
}

impl Smell {
    /// Label for the category badge.
    pub fn category_label(&self) -> &str {
        match &self.kind {
            SmellKind::General { category, .. } => category.label(),
            SmellKind::Lambda { category, .. } if category.is_empty() => LAMBDA_BADGE,
            SmellKind::Lambda { category, .. } => category,
        }
    }

    /// General category, if this is a general smell.
    pub fn general_category(&self) -> Option<GeneralCategory> {
        match &self.kind {
            SmellKind::General { category, .. } => Some(*category),
            SmellKind::Lambda { .. } => None,
        }
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.kind, SmellKind::Lambda { .. })
    }

    /// Workshop membership, if any.
    pub fn workshop(&self) -> Option<Workshop> {
        match &self.kind {
            SmellKind::General { workshop, .. } => *workshop,
            SmellKind::Lambda { .. } => None,
        }
    }

    pub fn is_workshop(&self) -> bool {
        self.workshop().is_some()
    }

    /// Refactoring techniques; `None` means the section is not shown.
    pub fn techniques(&self) -> Option<&[String]> {
        match &self.kind {
            SmellKind::General { techniques, .. } => Some(techniques),
            SmellKind::Lambda { .. } => None,
        }
    }

    /// Cost/operational rationale; `None` means the section is not shown.
    pub fn why(&self) -> Option<&str> {
        match &self.kind {
            SmellKind::General { .. } => None,
            SmellKind::Lambda { why, .. } => why.as_deref(),
        }
    }

    /// Fragment identifier used in share links.
    pub fn slug(&self) -> String {
        deep_link::slug(&self.name)
    }
}
