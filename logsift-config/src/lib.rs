//! Configuration for logsift search.
//!
//! Settings are read from YAML. Every field is optional and falls back to the
//! value in [`defaults`].

pub mod defaults;
mod error;
mod search_config;

pub use error::ConfigError;
pub use search_config::SearchConfig;
