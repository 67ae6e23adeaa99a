//! User settings for Kakebo
//!
//! Display preferences, the survival threshold, the savings provenance
//! marker and the collaborator backend.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::KakeboPaths;
use crate::error::KakeboError;
use crate::gateway::FallbackTexts;
use crate::models::DEFAULT_SAVINGS_PREFIX;
use crate::reports::PromptStyle;
use crate::services::monitor::DEFAULT_SURVIVAL_THRESHOLD;

/// Which collaborator implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorBackend {
    /// Keyword classification and template texts, no external calls
    #[default]
    Offline,
    /// An external program receiving prompts on stdin
    Command,
}

/// Collaborator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorSettings {
    #[serde(default)]
    pub backend: CollaboratorBackend,

    /// Program and arguments for the `command` backend
    #[serde(default)]
    pub command: Vec<String>,

    /// Per-call timeout enforced by the `command` backend
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            backend: CollaboratorBackend::default(),
            command: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings for Kakebo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display and prompts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Survival spending, as a percentage of revenue, that triggers guidance
    #[serde(default = "default_threshold")]
    pub survival_threshold_percent: u32,

    /// Marker prepended to savings descriptions
    #[serde(default = "default_savings_prefix")]
    pub savings_prefix: String,

    #[serde(default)]
    pub collaborator: CollaboratorSettings,

    #[serde(default)]
    pub fallbacks: FallbackTexts,
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

fn default_threshold() -> u32 {
    DEFAULT_SURVIVAL_THRESHOLD
}

fn default_savings_prefix() -> String {
    DEFAULT_SAVINGS_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            survival_threshold_percent: default_threshold(),
            savings_prefix: default_savings_prefix(),
            collaborator: CollaboratorSettings::default(),
            fallbacks: FallbackTexts::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &KakeboPaths) -> Result<Self, KakeboError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| KakeboError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| KakeboError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KakeboPaths) -> Result<(), KakeboError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KakeboError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| KakeboError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check values serde cannot constrain
    pub fn validate(&self) -> Result<(), KakeboError> {
        if !(1..=100).contains(&self.survival_threshold_percent) {
            return Err(KakeboError::Config(format!(
                "survival_threshold_percent must be between 1 and 100, got {}",
                self.survival_threshold_percent
            )));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(KakeboError::Config(format!(
                "date_format is not a valid strftime pattern: {:?}",
                self.date_format
            )));
        }

        if self.collaborator.backend == CollaboratorBackend::Command
            && self.collaborator.command.is_empty()
        {
            return Err(KakeboError::Config(
                "collaborator.command must name a program when backend is \"command\"".into(),
            ));
        }

        if self.collaborator.timeout_secs == 0 {
            return Err(KakeboError::Config("collaborator.timeout_secs must be positive".into()));
        }

        Ok(())
    }

    /// Formatting preferences for prompts and templates
    pub fn prompt_style(&self) -> PromptStyle {
        PromptStyle {
            currency_symbol: self.currency_symbol.clone(),
            date_format: self.date_format.clone(),
        }
    }
}
