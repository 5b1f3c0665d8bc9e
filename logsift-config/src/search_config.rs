//! `SearchConfig`: search settings.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use logsift_search::MatchOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings controlling row search, the status message and highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Ignore case differences when matching rows
    #[serde(default = "crate::defaults::bool_true")]
    pub ignore_case: bool,

    /// Require a pattern to match a whole field instead of a substring
    #[serde(default = "crate::defaults::bool_false")]
    pub match_whole_value: bool,

    /// How long the "not found" message stays visible, in milliseconds
    #[serde(default = "crate::defaults::not_found_message_timeout_ms")]
    pub not_found_message_timeout_ms: u64,

    /// Characters per tooltip line before a hard line break
    #[serde(default = "crate::defaults::tooltip_max_width")]
    pub tooltip_max_width: usize,

    /// CSS color of highlighted text in tooltips
    #[serde(default = "crate::defaults::highlight_foreground")]
    pub highlight_foreground: String,

    /// CSS background color of highlighted text in tooltips
    #[serde(default = "crate::defaults::highlight_background")]
    pub highlight_background: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_case: crate::defaults::bool_true(),
            match_whole_value: crate::defaults::bool_false(),
            not_found_message_timeout_ms: crate::defaults::not_found_message_timeout_ms(),
            tooltip_max_width: crate::defaults::tooltip_max_width(),
            highlight_foreground: crate::defaults::highlight_foreground(),
            highlight_background: crate::defaults::highlight_background(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate settings from YAML. Blank input yields the defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SearchConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading search config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_yaml_str(&contents).inspect_err(|e| {
            log::error!("Failed to load search config {:?}: {}", path, e);
        })?;
        Ok(config)
    }

    /// Check field values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tooltip_max_width == 0 {
            return Err(ConfigError::Validation(
                "tooltip_max_width must be greater than zero".to_string(),
            ));
        }
        if self.highlight_foreground.trim().is_empty() || self.highlight_background.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "highlight colors must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Match options for row queries.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            ignore_case: self.ignore_case,
            match_whole_value: self.match_whole_value,
        }
    }

    pub fn not_found_timeout(&self) -> Duration {
        Duration::from_millis(self.not_found_message_timeout_ms)
    }
}
