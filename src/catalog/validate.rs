//! Structural checks for catalog content.
//!
//! Catalog content is compiled in, so these checks run in tests and from
//! the `validate` command rather than on every lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::store::CatalogStore;
use crate::catalog::smell::Smell;

/// One structural problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIssue {
    /// Name of the offending smell.
    pub smell: String,
    /// What is wrong with it.
    pub problem: String,
}

impl CatalogIssue {
    fn new(smell: &str, problem: impl Into<String>) -> Self {
        Self {
            smell: smell.to_string(),
            problem: problem.into(),
        }
    }
}

/// Check a catalog for structural problems.
///
/// Names must be unique, and must stay unique when compared
/// case-insensitively or as share-link slugs, since deep links resolve that
/// way. Required text fields must be non-empty.
pub fn validate<C: CatalogStore + ?Sized>(catalog: &C) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let all = catalog.combined();

    let mut seen_names: HashMap<&str, usize> = HashMap::new();
    let mut seen_folded: HashMap<String, &str> = HashMap::new();
    let mut seen_slugs: HashMap<String, &str> = HashMap::new();

    for smell in &all {
        let count = seen_names.entry(smell.name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            issues.push(CatalogIssue::new(&smell.name, "duplicate name"));
        }
        if *count > 1 {
            continue;
        }

        let folded = smell.name.to_lowercase();
        if let Some(other) = seen_folded.insert(folded, smell.name.as_str()) {
            issues.push(CatalogIssue::new(
                &smell.name,
                format!("name differs from '{}' only by case", other),
            ));
        }

        if let Some(other) = seen_slugs.insert(smell.slug(), smell.name.as_str()) {
            if other.to_lowercase() != smell.name.to_lowercase() {
                issues.push(CatalogIssue::new(
                    &smell.name,
                    format!("share link collides with '{}'", other),
                ));
            }
        }

        check_fields(smell, &mut issues);
    }

    issues
}

fn check_fields(smell: &Smell, issues: &mut Vec<CatalogIssue>) {
    if smell.name.trim().is_empty() {
        issues.push(CatalogIssue::new(&smell.name, "empty name"));
    }
    if smell.name.contains('-') {
        issues.push(CatalogIssue::new(
            &smell.name,
            "name contains '-', which deep links cannot round-trip",
        ));
    }
    if smell.brief.trim().is_empty() {
        issues.push(CatalogIssue::new(&smell.name, "empty brief"));
    }
    if smell.indicators.is_empty() {
        issues.push(CatalogIssue::new(&smell.name, "no indicators"));
    }
    if smell.fix_steps.is_empty() {
        issues.push(CatalogIssue::new(&smell.name, "no fix steps"));
    }
    if smell.bad_example.trim().is_empty() || smell.good_example.trim().is_empty() {
        issues.push(CatalogIssue::new(&smell.name, "missing example code"));
    }
    if let Some(workshop) = smell.workshop() {
        if workshop.session.is_none() {
            issues.push(CatalogIssue::new(
                &smell.name,
                "workshop smell has no session",
            ));
        }
    }
}
