//! smellbook - a field guide to code smells
//!
//! smellbook browses a built-in catalog of general code smells and AWS
//! Lambda anti-patterns, filters it by name, opens smells from share links
//! and tracks which smells have been learned.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod util;

pub use catalog::{
    validate, Catalog, CatalogIssue, CatalogStore, CategorySection, GeneralCategory, Smell,
    SmellKind, Workshop,
};
pub use config::Config;
pub use core::{
    AppSession, Selection, SelectionStatus, Selector, SidebarEntry, SidebarGroup, SidebarView,
    SmellDetail, Stats, Tab,
};
pub use error::{Result, SmellbookError};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, ProgressStore};

// CLI commands
pub use cli::{
    Browser, LearnCommand, LinkCommand, ListCommand, RandomCommand, ResetCommand, ShowCommand,
    StatsCommand, TipCommand, ValidateCommand, WelcomeCommand,
};
