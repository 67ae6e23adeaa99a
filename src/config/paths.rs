//! Path management for Kakebo
//!
//! ## Path Resolution Order
//!
//! 1. `KAKEBO_CLI_DIR` environment variable (if set)
//! 2. The platform configuration directory for `kakebo-cli`
//!    (`~/.config/kakebo-cli` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::KakeboError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "KAKEBO_CLI_DIR";

/// Manages all paths used by Kakebo
#[derive(Debug, Clone)]
pub struct KakeboPaths {
    base_dir: PathBuf,
}

impl KakeboPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, KakeboError> {
        let base_dir = match std::env::var_os(DIR_ENV_VAR) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "kakebo-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    KakeboError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
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

    /// Default directory for exported reports
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), KakeboError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KakeboError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| KakeboError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }
}
