//! Incremental text search for logsift.
//!
//! This crate holds everything below the UI:
//!
//! - The query grammar and value matchers ([`text`])
//! - The log record model the row search runs over ([`record`])
//! - Row queries with column qualifiers ([`row`])
//! - A stateless, non-wrapping cursor over live views ([`cursor`])
//! - The search model owning the single active search ([`model`])

pub mod cursor;
mod error;
pub mod model;
pub mod record;
pub mod row;
pub mod text;

pub use cursor::{
    Direction, ItemPredicate, ListDataModel, SearchDataModel, SearchDirection, scan,
};
pub use error::SearchError;
pub use model::{PendingSearch, Search, SearchModel, SessionId, StrategyObserver};
pub use record::{Field, LogRecord, Priority};
pub use row::{ColumnQualifier, ROW_MATCH_OPTIONS, RowSearchStrategy, compile_row, compile_row_with};
pub use text::{MatchOptions, Pattern, SearchStrategy, SearcherBuilder, TextHighlighter};
