//! User settings for envelope-reconcile
//!
//! Display preferences and the income figure budgets are measured against.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::EnvelopePaths;
use crate::error::EnvelopeError;
use crate::services::overview::IncomeBasis;

/// User settings for envelope-reconcile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Which income the unassigned amount is measured against
    #[serde(default)]
    pub income_basis: IncomeBasis,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            income_basis: IncomeBasis::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnvelopePaths) -> Result<Self, EnvelopeError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| EnvelopeError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| EnvelopeError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reject settings that would fail at display time
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(EnvelopeError::Config(format!(
                "Invalid date format: {}",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvelopePaths) -> Result<(), EnvelopeError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EnvelopeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EnvelopeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
