//! Typed error variants for the logsift-config crate.
//!
//! Loading entry points return `anyhow::Result`; callers that need to tell
//! failure modes apart can `downcast_ref::<ConfigError>()`.

use thiserror::Error;

/// Errors that can occur when loading search settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid YAML for [`crate::SearchConfig`].
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the problem.
    #[error("Config validation error: {0}")]
    Validation(String),
}
