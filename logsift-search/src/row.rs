//! Row-level search over log records.
//!
//! Query grammar:
//!
//! ```text
//! query     := qualifier? pattern
//! qualifier := "app:" | "tag:" | "msg:"
//! pattern   := literal | "/" regex "/"
//! ```
//!
//! Surrounding whitespace is ignored, as is whitespace between the qualifier
//! and the pattern. An unqualified query matches if any of the default
//! fields matches.

use std::borrow::Borrow;
use std::sync::Arc;

use crate::cursor::ItemPredicate;
use crate::error::SearchError;
use crate::record::{Field, LogRecord};
use crate::text::{MatchOptions, SearchStrategy, TextHighlighter};

/// Options used by [`compile_row`]: case-insensitive substring search.
pub const ROW_MATCH_OPTIONS: MatchOptions = MatchOptions {
    ignore_case: true,
    match_whole_value: false,
};

/// Which fields a row query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnQualifier {
    /// No prefix: every default field is searched.
    AllColumns,
    AppName,
    Tag,
    Message,
}

const QUALIFIER_PREFIXES: [(&str, ColumnQualifier); 3] = [
    ("app:", ColumnQualifier::AppName),
    ("tag:", ColumnQualifier::Tag),
    ("msg:", ColumnQualifier::Message),
];

impl ColumnQualifier {
    /// Fields covered by this qualifier.
    pub fn fields(self) -> &'static [Field] {
        match self {
            ColumnQualifier::AllColumns => &[Field::AppName, Field::Message, Field::Tag],
            ColumnQualifier::AppName => &[Field::AppName],
            ColumnQualifier::Tag => &[Field::Tag],
            ColumnQualifier::Message => &[Field::Message],
        }
    }

    /// Query prefix selecting this qualifier, if any.
    pub fn prefix(self) -> Option<&'static str> {
        QUALIFIER_PREFIXES
            .iter()
            .find(|(_, qualifier)| *qualifier == self)
            .map(|(prefix, _)| *prefix)
    }
}

/// A compiled row query.
///
/// Holds one [`SearchStrategy`] shared by every field it covers. Immutable;
/// a changed query always produces a new instance.
#[derive(Debug, Clone)]
pub struct RowSearchStrategy {
    strategy: Arc<SearchStrategy>,
    qualifier: ColumnQualifier,
}

impl RowSearchStrategy {
    pub fn new(strategy: Arc<SearchStrategy>, qualifier: ColumnQualifier) -> Self {
        Self {
            strategy,
            qualifier,
        }
    }

    pub fn qualifier(&self) -> ColumnQualifier {
        self.qualifier
    }

    pub fn fields(&self) -> &'static [Field] {
        self.qualifier.fields()
    }

    /// The value-level strategy shared by all covered fields.
    pub fn strategy(&self) -> &Arc<SearchStrategy> {
        &self.strategy
    }

    /// Whether any covered field of `record` matches.
    pub fn is_row_matched(&self, record: &LogRecord) -> bool {
        self.fields()
            .iter()
            .any(|field| self.strategy.matches(field.value_of(record)))
    }

    /// Highlight the occurrences in one field of `record`. Does nothing if
    /// the field is not covered by this strategy.
    pub fn highlight_column(
        &self,
        record: &LogRecord,
        field: Field,
        highlighter: &mut dyn TextHighlighter,
    ) {
        if self.fields().contains(&field) {
            self.strategy.highlight(field.value_of(record), highlighter);
        }
    }
}

impl<R: Borrow<LogRecord>> ItemPredicate<R> for RowSearchStrategy {
    fn test(&self, item: &R) -> bool {
        self.is_row_matched(item.borrow())
    }
}

/// Compile a row query with [`ROW_MATCH_OPTIONS`].
///
/// Returns `Ok(None)` for a missing or blank query: there is nothing to
/// search for, which is not an error.
pub fn compile_row(query: Option<&str>) -> Result<Option<RowSearchStrategy>, SearchError> {
    compile_row_with(query, ROW_MATCH_OPTIONS)
}

/// Compile a row query with explicit match options.
///
/// Error offsets are character offsets into `query` itself.
pub fn compile_row_with(
    query: Option<&str>,
    options: MatchOptions,
) -> Result<Option<RowSearchStrategy>, SearchError> {
    let Some(query) = query else {
        return Ok(None);
    };
    let trimmed = query.trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }
    let mut consumed = char_len(query) - char_len(trimmed);
    let trimmed = trimmed.trim_end();

    let (qualifier, text) = match QUALIFIER_PREFIXES
        .iter()
        .find(|(prefix, _)| trimmed.starts_with(prefix))
    {
        Some((prefix, qualifier)) => {
            let rest = &trimmed[prefix.len()..];
            let text = rest.trim_start();
            consumed += char_len(prefix) + char_len(rest) - char_len(text);
            (*qualifier, text)
        }
        None => (ColumnQualifier::AllColumns, trimmed),
    };

    // Pattern offsets are relative to the regex body, one past the opening slash.
    let strategy =
        SearchStrategy::compile(text, options).map_err(|e| e.shifted(consumed + 1))?;
    log::debug!("Compiled row query '{}' for {:?}", text, qualifier);

    Ok(Some(RowSearchStrategy::new(Arc::new(strategy), qualifier)))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
