//! Tab filtering and name search.

use crate::catalog::{CatalogStore, Smell};
use crate::core::Tab;

/// Whether `name` contains `term` as a case-insensitive substring.
///
/// An empty term matches everything.
pub fn matches_term(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// The smells listed under `tab` whose names match `term`.
///
/// Order is that of [`CatalogStore::all_smells`]; matching entries are never
/// re-sorted.
pub fn filter<'a, C: CatalogStore + ?Sized>(catalog: &'a C, tab: Tab, term: &str) -> Vec<&'a Smell> {
    let mut smells = catalog.all_smells(tab);
    smells.retain(|smell| matches_term(&smell.name, term));
    smells
}
