//! Display formatting for terminal output
//!
//! Turns overview and split results into plain-text tables.

pub mod balance;
pub mod split;

pub use balance::{format_overspent, format_overview, format_status};
pub use split::{format_persisted_splits, format_split_rows};
