//! Text-level search: the query grammar and the matchers built from it.

pub mod pattern;
pub mod searcher;

pub use pattern::Pattern;
pub use searcher::{MatchOptions, SearchStrategy, SearcherBuilder, TextHighlighter};
