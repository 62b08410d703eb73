//! Render-facing views of the session.
//!
//! Renderers never reach into the catalog or progress store directly; they
//! receive these snapshots and draw them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, Smell, SmellKind};
use crate::core::filter::{filter, matches_term};
use crate::core::{Selection, Tab};

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarEntry {
    pub name: String,
    /// Whether the smell is in the learned set.
    pub learned: bool,
    /// Whether the smell is in the detail view.
    pub active: bool,
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub title: String,
    /// Size of the group before the search term is applied.
    pub total: usize,
    pub entries: Vec<SidebarEntry>,
}

/// The listing for the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarView {
    pub tab: Tab,
    pub search_term: String,
    pub groups: Vec<SidebarGroup>,
}

impl SidebarView {
    /// Number of rows across all groups.
    pub fn visible_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Build the listing for the selection's tab and search term.
///
/// The general tab is grouped by category (every category is listed, even
/// when the search hides all of its smells); the other tabs form a single
/// group.
pub fn sidebar<C: CatalogStore + ?Sized>(
    catalog: &C,
    selection: &Selection,
    learned: &BTreeSet<String>,
) -> SidebarView {
    let entry = |smell: &Smell| SidebarEntry {
        name: smell.name.clone(),
        learned: learned.contains(&smell.name),
        active: selection.current.as_deref() == Some(smell.name.as_str()),
    };
    let term = selection.search_term.as_str();

    let groups = match selection.active_tab {
        Tab::General => catalog
            .general_sections()
            .iter()
            .map(|section| SidebarGroup {
                title: section.category.label().to_string(),
                total: section.smells.len(),
                entries: section
                    .smells
                    .iter()
                    .filter(|smell| matches_term(&smell.name, term))
                    .map(entry)
                    .collect(),
            })
            .collect(),
        tab => vec![SidebarGroup {
            title: tab.heading().to_string(),
            total: catalog.all_smells(tab).len(),
            entries: filter(catalog, tab, term).into_iter().map(entry).collect(),
        }],
    };

    SidebarView {
        tab: selection.active_tab,
        search_term: selection.search_term.clone(),
        groups,
    }
}

/// Every field of a smell, ready to draw.
///
/// `techniques` and `why` are `None` when the section should be hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmellDetail {
    pub name: String,
    pub category: String,
    /// Workshop session badge, when the smell is in the workshop subset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_badge: Option<String>,
    pub brief: String,
    pub indicators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub bad_example: String,
    pub good_example: String,
    pub fix_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub techniques: Option<Vec<String>>,
    pub learned: bool,
    /// Share-link fragment.
    pub link: String,
}

impl SmellDetail {
    pub fn new(smell: &Smell, learned: bool) -> Self {
        let (workshop_badge, techniques, why) = match &smell.kind {
            SmellKind::General {
                techniques,
                workshop,
                ..
            } => (
                workshop.map(|w| match w.session {
                    Some(session) => format!("Session {}", session),
                    None => "Workshop".to_string(),
                }),
                Some(techniques.clone()),
                None,
            ),
            SmellKind::Lambda { why, .. } => (None, None, why.clone()),
        };

        Self {
            name: smell.name.clone(),
            category: smell.category_label().to_string(),
            workshop_badge,
            brief: smell.brief.clone(),
            indicators: smell.indicators.clone(),
            why,
            bad_example: smell.bad_example.clone(),
            good_example: smell.good_example.clone(),
            fix_steps: smell.fix_steps.clone(),
            techniques,
            learned,
            link: smell.slug(),
        }
    }
}

/// Progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub tab: Tab,
    /// Smells listed under the tab, ignoring the search term.
    pub total: usize,
    /// Learned smells overall, independent of tab.
    pub learned: usize,
    /// Learned smells that belong to the tab.
    pub learned_in_tab: usize,
}

impl Stats {
    pub fn compute<C: CatalogStore + ?Sized>(
        catalog: &C,
        tab: Tab,
        learned: &BTreeSet<String>,
    ) -> Self {
        let all = catalog.all_smells(tab);
        let learned_in_tab = all.iter().filter(|s| learned.contains(&s.name)).count();
        Self {
            tab,
            total: all.len(),
            learned: learned.len(),
            learned_in_tab,
        }
    }
}
