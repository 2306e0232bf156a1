//! Configuration for schemaform tools.
//!
//! The configuration lives in a `Schemaform.json` file at the project root
//! and is found by searching upward from the working directory. Every key is
//! optional; missing keys fall back to the engine defaults.
//!
//! ```json
//! {
//!   "validation": {
//!     "emailPattern": "^[^@]+@example\\.org$",
//!     "phoneDigits": 10,
//!     "phoneKeywords": ["phone", "mobile"],
//!     "dateFormats": ["%Y-%m-%d"]
//!   },
//!   "cli": { "color": false }
//! }
//! ```

use std::path::{Path, PathBuf};

use schemaform::ValidationOptions;
use serde::Deserialize;

/// The standard configuration filename.
pub const CONFIG_FILENAME: &str = "Schemaform.json";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Invalid email pattern: {0}")]
    EmailPattern(#[from] regex::Error),
}

/// Overrides for the heuristic validation checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub email_pattern: Option<String>,
    pub phone_digits: Option<usize>,
    pub phone_keywords: Option<Vec<String>>,
    pub date_formats: Option<Vec<String>>,
}

/// CLI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Colorize terminal output.
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// The main schemaform configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub validation: ValidationConfig,
    pub cli: CliConfig,
}

impl FormConfig {
    /// Find the configuration file by searching upward from the given directory.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(source)?;
        // Surface a bad pattern at load time rather than on first validation.
        config.validation_options()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Load the nearest configuration above `start_dir`, or the defaults when
    /// there is none.
    pub fn discover(start_dir: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match Self::find_config_file(start_dir) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Engine options with this configuration's overrides applied.
    pub fn validation_options(&self) -> Result<ValidationOptions, ConfigError> {
        let mut options = ValidationOptions::default();
        let validation = &self.validation;
        if let Some(pattern) = &validation.email_pattern {
            options = options.with_email_pattern(pattern)?;
        }
        if let Some(digits) = validation.phone_digits {
            options.phone_digits = digits;
        }
        if let Some(keywords) = &validation.phone_keywords {
            options.phone_keywords = keywords.clone();
        }
        if let Some(formats) = &validation.date_formats {
            options.date_formats = formats.clone();
        }
        Ok(options)
    }
}
