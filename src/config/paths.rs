//! Path management for envelope-reconcile
//!
//! ## Path Resolution Order
//!
//! 1. `ENVELOPE_RECONCILE_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/envelope-reconcile` on
//!    Linux, `%APPDATA%\envelope-reconcile` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::EnvelopeError;

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "ENVELOPE_RECONCILE_DIR";

const APP_DIR_NAME: &str = "envelope-reconcile";

/// Manages all paths used by envelope-reconcile
#[derive(Debug, Clone)]
pub struct EnvelopePaths {
    base_dir: PathBuf,
}

impl EnvelopePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, EnvelopeError> {
        let base_dir = match std::env::var_os(DIR_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join(APP_DIR_NAME))
                .ok_or_else(|| {
                    EnvelopeError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create EnvelopePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), EnvelopeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvelopeError::Io(format!("Failed to create base directory: {}", e)))
    }
}
