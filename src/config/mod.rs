//! Configuration module for envelope-reconcile
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::EnvelopePaths;
pub use settings::Settings;
