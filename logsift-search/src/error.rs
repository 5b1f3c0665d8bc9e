//! Typed error types for logsift-search.
//!
//! Both variants are recoverable: they describe a query the user can fix and
//! are meant to be rendered next to the search prompt.

use thiserror::Error;

/// Error produced while compiling a search query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The text that has to carry a pattern is empty or blank.
    #[error("Pattern is empty")]
    EmptyPattern,

    /// A regular expression body failed to compile.
    #[error("Invalid regular expression: {message}")]
    InvalidRegex {
        /// Engine-provided description of the problem.
        message: String,
        /// Character offset of the problem, if the engine reported one.
        offset: Option<usize>,
    },
}

impl SearchError {
    /// Character offset of the error, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SearchError::EmptyPattern => None,
            SearchError::InvalidRegex { offset, .. } => *offset,
        }
    }

    /// Moves the reported offset `by` characters to the right.
    ///
    /// Used when the regex body is embedded in a larger query string
    /// (delimiters, column prefix, leading whitespace).
    pub fn shifted(self, by: usize) -> Self {
        match self {
            SearchError::InvalidRegex { message, offset } => SearchError::InvalidRegex {
                message,
                offset: offset.map(|o| o + by),
            },
            other => other,
        }
    }
}
