//! Sovereign Tab Model
//!
//! A tab is one independent browsing session: its resolved address, its
//! display address and its own history stack. Tabs are mutated only through
//! [`NavigationController`], which re-applies the routing policy on every
//! move instead of replaying cached targets.

mod collection;
mod error;
mod navigation;
mod tab;

pub use collection::TabCollection;
pub use error::TabError;
pub use navigation::NavigationController;
pub use tab::{Tab, NEW_TAB_LABEL};

pub type Result<T> = std::result::Result<T, TabError>;
