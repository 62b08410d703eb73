//! CLI commands for smellbook.
//!
//! This module provides CLI commands for smellbook, organized into:
//! - **Browsing commands**: list, show, random, link, tip
//! - **Progress commands**: learn/unlearn, stats, reset
//! - **Utility commands**: welcome, validate
//! - **Interactive**: browse

// Browsing commands
pub mod link;
pub mod list;
pub mod random;
pub mod show;
pub mod tip;

// Progress commands
pub mod learn;
pub mod reset;
pub mod stats;

// Utility commands
pub mod validate;
pub mod welcome;

// Interactive
pub mod browse;

pub use browse::Browser;
pub use learn::LearnCommand;
pub use link::LinkCommand;
pub use list::ListCommand;
pub use random::RandomCommand;
pub use reset::ResetCommand;
pub use show::ShowCommand;
pub use stats::StatsCommand;
pub use tip::TipCommand;
pub use validate::ValidateCommand;
pub use welcome::WelcomeCommand;

use crate::catalog::{CatalogStore, Smell};

/// Look up a smell typed by a user: exact name first, then ignoring case.
pub fn lookup<'c, C: CatalogStore + ?Sized>(catalog: &'c C, name: &str) -> Option<&'c Smell> {
    let name = name.trim();
    catalog
        .find_by_name(name)
        .or_else(|| catalog.find_ignore_case(name))
}
