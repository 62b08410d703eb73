//! Core browsing logic for smellbook.
//!
//! Tabs, the filter/search engine, the selection state machine, deep links
//! and the session object that ties them to learned progress.

pub mod deep_link;
pub mod filter;
pub mod selection;
pub mod session;
pub mod tab;
pub mod view;

pub use filter::{filter, matches_term};
pub use selection::{Selection, SelectionStatus, Selector};
pub use session::AppSession;
pub use tab::Tab;
pub use view::{SidebarEntry, SidebarGroup, SidebarView, SmellDetail, Stats};
