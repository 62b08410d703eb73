//! Application session.
//!
//! `AppSession` owns everything that changes while browsing: learned
//! progress and the selection. It is built once at startup from durable
//! storage plus defaults, mutated only through the methods here, and handed
//! to renderers by reference.

use rand::Rng;

use crate::catalog::{CatalogStore, Smell};
use crate::core::filter::filter;
use crate::core::selection::{Selection, Selector};
use crate::core::view::{sidebar, SidebarView, SmellDetail, Stats};
use crate::core::Tab;
use crate::error::{Result, SmellbookError};
use crate::storage::{KeyValueStore, ProgressStore};

/// Browsing session state.
#[derive(Debug)]
pub struct AppSession<'c, C: CatalogStore + ?Sized, S: KeyValueStore> {
    catalog: &'c C,
    progress: ProgressStore<S>,
    selection: Selection,
}

impl<'c, C: CatalogStore + ?Sized, S: KeyValueStore> AppSession<'c, C, S> {
    /// Start a session on `tab`, loading progress from `store`.
    pub fn new(catalog: &'c C, store: S, tab: Tab) -> Self {
        Self {
            catalog,
            progress: ProgressStore::load(store),
            selection: Selection::new(tab),
        }
    }

    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    fn selector(&mut self) -> Selector<'_, 'c, C> {
        Selector::new(&mut self.selection, self.catalog)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Smells shown for the active tab and search term.
    pub fn visible(&self) -> Vec<&'c Smell> {
        filter(
            self.catalog,
            self.selection.active_tab,
            &self.selection.search_term,
        )
    }

    /// The grouped listing for the active tab.
    pub fn sidebar(&self) -> SidebarView {
        sidebar(self.catalog, &self.selection, self.progress.learned())
    }

    /// The smell in the detail view.
    pub fn current(&self) -> Option<&'c Smell> {
        let catalog: &'c C = self.catalog;
        self.selection
            .current
            .as_deref()
            .and_then(|name| catalog.find_by_name(name))
    }

    /// Full detail of the current smell.
    pub fn current_detail(&self) -> Option<SmellDetail> {
        self.current()
            .map(|smell| SmellDetail::new(smell, self.progress.is_learned(&smell.name)))
    }

    pub fn is_learned(&self, name: &str) -> bool {
        self.progress.is_learned(name)
    }

    /// Counters for the active tab.
    pub fn stats(&self) -> Stats {
        Stats::compute(
            self.catalog,
            self.selection.active_tab,
            self.progress.learned(),
        )
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn set_tab(&mut self, tab: Tab) {
        self.selector().set_tab(tab);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.selector().set_search_term(term);
    }

    pub fn pick(&mut self, name: &str) -> Result<&'c Smell> {
        self.selector().pick(name)
    }

    /// Pick at random from the active tab.
    pub fn pick_random<R: Rng>(&mut self, rng: &mut R) -> Result<&'c Smell> {
        let tab = self.selection.active_tab;
        self.selector().pick_random(tab, rng)
    }

    /// Pick at random from a specific tab.
    pub fn pick_random_from<R: Rng>(&mut self, tab: Tab, rng: &mut R) -> Result<&'c Smell> {
        self.selector().pick_random(tab, rng)
    }

    pub fn open_deep_link(&mut self, fragment: &str) -> Result<&'c Smell> {
        self.selector().open_deep_link(fragment)
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Mark the current smell as learned or not.
    pub fn set_current_learned(&mut self, learned: bool) -> Result<&'c Smell> {
        let smell = self.current().ok_or(SmellbookError::NothingSelected)?;
        self.progress.toggle_learned(&smell.name, learned);
        tracing::debug!(name = %smell.name, learned, "learned state updated");
        Ok(smell)
    }

    /// Flip the learned state of the current smell; returns the new state.
    pub fn toggle_current_learned(&mut self) -> Result<bool> {
        let smell = self.current().ok_or(SmellbookError::NothingSelected)?;
        let learned = !self.progress.is_learned(&smell.name);
        self.set_current_learned(learned)?;
        Ok(learned)
    }

    /// Forget all learned progress.
    pub fn reset_progress(&mut self) {
        self.progress.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::catalog::Catalog;
    use crate::storage::{load_learned, MemoryKeyValueStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn names(smells: &[&Smell]) -> Vec<String> {
        smells.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_new_session_defaults() {
        let catalog = sample_catalog();
        let session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);
        assert!(session.current().is_none());
        assert!(session.current_detail().is_none());
        assert_eq!(session.visible().len(), 6);
        assert_eq!(session.progress().count(), 0);
    }

    #[test]
    fn test_new_session_loads_progress() {
        let catalog = sample_catalog();
        let store = MemoryKeyValueStore::new();
        store
            .put(crate::storage::LEARNED_SMELLS_KEY, "[\"Dead Code\"]")
            .unwrap();
        let session = AppSession::new(&catalog, store, Tab::Workshop);
        assert!(session.is_learned("Dead Code"));
        assert_eq!(session.stats().learned_in_tab, 1);
    }

    #[test]
    fn test_search_then_tab_switch() {
        let catalog = sample_catalog();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);

        session.set_search_term("code");
        assert_eq!(names(&session.visible()), vec!["Duplicate Code", "Dead Code"]);

        session.set_tab(Tab::Lambda);
        assert_eq!(session.selection().search_term, "");
        assert_eq!(session.visible().len(), 3);
    }

    #[test]
    fn test_tab_switch_preserves_detail_pane() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);

        session.pick("Duplicate Code").unwrap();
        session.set_tab(Tab::Lambda);

        assert_eq!(session.current().unwrap().name, "Duplicate Code");
        assert_eq!(session.selection().search_term, "");
        assert_eq!(session.selection().active_tab, Tab::Lambda);
    }

    #[test]
    fn test_learned_toggle_on_current() {
        let catalog = sample_catalog();
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut session = AppSession::new(&catalog, Arc::clone(&store), Tab::General);

        session.pick("Long Method").unwrap();
        session.set_current_learned(true).unwrap();
        assert!(session.current_detail().unwrap().learned);
        assert_eq!(load_learned(&store).len(), 1);

        assert!(!session.toggle_current_learned().unwrap());
        assert!(load_learned(&store).is_empty());
        assert!(session.toggle_current_learned().unwrap());
        assert!(session.is_learned("Long Method"));
    }

    #[test]
    fn test_learned_without_selection() {
        let catalog = sample_catalog();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);
        let err = session.set_current_learned(true).unwrap_err();
        assert!(matches!(err, SmellbookError::NothingSelected));
        assert!(session.toggle_current_learned().is_err());
    }

    #[test]
    fn test_sidebar_reflects_progress() {
        let catalog = sample_catalog();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::Lambda);
        session.pick("Recursive Invocation").unwrap();
        session.set_current_learned(true).unwrap();

        let view = session.sidebar();
        let row = view.groups[0]
            .entries
            .iter()
            .find(|e| e.name == "Recursive Invocation")
            .unwrap();
        assert!(row.learned);
        assert!(row.active);
    }

    #[test]
    fn test_stats_count_is_global() {
        let catalog = sample_catalog();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);
        session.pick("Lambda Monolith").unwrap();
        session.set_current_learned(true).unwrap();

        let stats = session.stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.learned, 1);
        assert_eq!(stats.learned_in_tab, 0);
    }

    #[test]
    fn test_pick_random_uses_active_tab() {
        let catalog = sample_catalog();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::Lambda);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(session.pick_random(&mut rng).unwrap().is_lambda());
        }
        let smell = session.pick_random_from(Tab::Workshop, &mut rng).unwrap();
        assert!(smell.is_workshop());
    }

    #[test]
    fn test_deep_link_on_load() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);

        assert!(session.open_deep_link("no-such-smell").is_err());
        assert!(session.current().is_none());

        session.open_deep_link("long-method").unwrap();
        assert_eq!(session.current().unwrap().name, "Long Method");
    }

    #[test]
    fn test_sidebar_entries_match_visible() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = AppSession::new(&catalog, MemoryKeyValueStore::new(), Tab::General);

        for tab in Tab::ALL {
            session.set_tab(tab);
            for term in ["", "co", "LONG", "zzz"] {
                session.set_search_term(term);
                let listed: Vec<String> = session
                    .sidebar()
                    .groups
                    .iter()
                    .flat_map(|group| group.entries.iter().map(|e| e.name.clone()))
                    .collect();
                assert_eq!(listed, names(&session.visible()), "{} / {:?}", tab, term);
            }
        }
    }

    #[test]
    fn test_reset_progress() {
        let catalog = sample_catalog();
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut session = AppSession::new(&catalog, Arc::clone(&store), Tab::General);
        session.pick("Dead Code").unwrap();
        session.set_current_learned(true).unwrap();

        session.reset_progress();

        assert_eq!(session.stats().learned, 0);
        assert!(load_learned(&store).is_empty());
        assert_eq!(session.current().unwrap().name, "Dead Code");
    }
}
