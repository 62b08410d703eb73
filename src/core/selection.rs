//! Selection state machine.
//!
//! Tracks the active tab, the search term and the smell shown in the detail
//! view. The detail view starts empty and, once a smell has been picked,
//! always shows some smell: there is no transition back to `Unselected`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, Smell};
use crate::core::{deep_link, filter, Tab};
use crate::error::{Result, SmellbookError};

/// Per-session selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Tab whose listing is shown.
    pub active_tab: Tab,
    /// Search term scoped to the active tab.
    pub search_term: String,
    /// Name of the smell in the detail view.
    pub current: Option<String>,
}

impl Selection {
    /// Fresh selection on the given tab.
    pub fn new(active_tab: Tab) -> Self {
        Self {
            active_tab,
            ..Default::default()
        }
    }

    pub fn status(&self) -> SelectionStatus {
        if self.current.is_some() {
            SelectionStatus::Selected
        } else {
            SelectionStatus::Unselected
        }
    }
}

/// Coarse selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Nothing has been shown yet.
    Unselected,
    /// A smell is in the detail view.
    Selected,
}

/// Selection controller.
///
/// All selection mutations go through this struct. Failed transitions leave
/// the state exactly as it was.
#[derive(Debug)]
pub struct Selector<'s, 'c, C: CatalogStore + ?Sized> {
    state: &'s mut Selection,
    catalog: &'c C,
}

impl<'s, 'c, C: CatalogStore + ?Sized> Selector<'s, 'c, C> {
    pub fn new(state: &'s mut Selection, catalog: &'c C) -> Self {
        Self { state, catalog }
    }

    pub fn status(&self) -> SelectionStatus {
        self.state.status()
    }

    /// The smell in the detail view, if any.
    pub fn current(&self) -> Option<&'c Smell> {
        let catalog: &'c C = self.catalog;
        self.state
            .current
            .as_deref()
            .and_then(|name| catalog.find_by_name(name))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Show the smell with this exact name.
    ///
    /// General smells are searched before Lambda smells.
    pub fn pick(&mut self, name: &str) -> Result<&'c Smell> {
        let catalog: &'c C = self.catalog;
        let smell = catalog
            .find_by_name(name)
            .ok_or_else(|| SmellbookError::smell_not_found(name))?;
        self.select(smell);
        Ok(smell)
    }

    /// Show a uniformly random smell from the unfiltered `tab` listing.
    ///
    /// The search term is ignored, and the active tab is left unchanged.
    pub fn pick_random<R: Rng>(&mut self, tab: Tab, rng: &mut R) -> Result<&'c Smell> {
        let catalog: &'c C = self.catalog;
        let candidates = filter::filter(catalog, tab, "");
        if candidates.is_empty() {
            return Err(SmellbookError::empty_tab(tab));
        }
        let smell = candidates[rng.random_range(0..candidates.len())];
        self.select(smell);
        Ok(smell)
    }

    /// Show the smell addressed by a share-link fragment.
    pub fn open_deep_link(&mut self, fragment: &str) -> Result<&'c Smell> {
        let catalog: &'c C = self.catalog;
        let smell = deep_link::resolve(catalog, fragment)
            .ok_or_else(|| SmellbookError::smell_not_found(fragment))?;
        self.select(smell);
        Ok(smell)
    }

    /// Switch tabs. Clears the search term; the detail view is kept.
    pub fn set_tab(&mut self, tab: Tab) {
        tracing::debug!(from = %self.state.active_tab, to = %tab, "switching tab");
        self.state.active_tab = tab;
        self.state.search_term.clear();
    }

    /// Store a new search term for the active tab.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    fn select(&mut self, smell: &Smell) {
        tracing::debug!(name = %smell.name, "selecting smell");
        self.state.current = Some(smell.name.clone());
    }
}
