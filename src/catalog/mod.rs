//! The built-in smell catalog.
//!
//! General smells are organized by category, Lambda smells form a single
//! list, and the workshop subset is derived from flagged general smells.

pub mod smell;
pub mod store;
pub mod validate;

#[cfg(test)]
pub mod fixtures;

pub use smell::{GeneralCategory, Smell, SmellKind, Workshop, LAMBDA_BADGE};
pub use store::{Catalog, CatalogStore, CategorySection, BUILTIN_CATALOG};
pub use validate::{validate, CatalogIssue};
