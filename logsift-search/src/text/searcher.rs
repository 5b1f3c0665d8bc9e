//! Search strategies: compiled matchers for a single text value.
//!
//! Literal patterns go through the regex engine as well (escaped), so both
//! kinds share anchoring, case folding and occurrence reporting.

use std::ops::Range;

use regex::Regex;
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Hir, Look};

use super::pattern::{Pattern, syntax_error, validate_regex};
use crate::error::SearchError;

/// Receives highlighted ranges of a text value.
///
/// Offsets are byte offsets into the value that was searched.
pub trait TextHighlighter {
    /// Mark `from..to` as highlighted.
    fn highlight_text(&mut self, from: usize, to: usize);
}

impl TextHighlighter for Vec<Range<usize>> {
    fn highlight_text(&mut self, from: usize, to: usize) {
        self.push(from..to);
    }
}

/// Matching options for a search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    /// Ignore case differences (Unicode-aware).
    pub ignore_case: bool,
    /// Require the pattern to match the entire value instead of a substring.
    pub match_whole_value: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            ignore_case: false,
            match_whole_value: true,
        }
    }
}

/// Builds [`SearchStrategy`] instances.
///
/// By default the strategies are case-sensitive and must match the whole
/// value.
#[derive(Debug, Clone, Default)]
pub struct SearcherBuilder {
    options: MatchOptions,
}

impl SearcherBuilder {
    /// Builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that starts from the given options.
    pub fn with_options(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Whether the built strategies ignore case differences.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.options.ignore_case = ignore_case;
        self
    }

    /// Whether the built strategies must match the whole value. With `false`
    /// any matching substring is enough.
    pub fn match_whole_value(mut self, match_whole_value: bool) -> Self {
        self.options.match_whole_value = match_whole_value;
        self
    }

    /// Current options.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Build a strategy for a compiled pattern.
    pub fn build(&self, pattern: &Pattern) -> Result<SearchStrategy, SearchError> {
        match pattern {
            Pattern::Literal(text) => self.build_plain(text),
            Pattern::Regex(body) => self.build_regex(body),
        }
    }

    /// Build a strategy that compares `text` verbatim.
    pub fn build_plain(&self, text: &str) -> Result<SearchStrategy, SearchError> {
        if text.trim().is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        self.compile(&regex::escape(text))
    }

    /// Build a strategy that treats `body` as a regular expression.
    pub fn build_regex(&self, body: &str) -> Result<SearchStrategy, SearchError> {
        if body.trim().is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        validate_regex(body)?;
        self.compile(body)
    }

    /// Compiles `body` with the case and anchoring options applied to the
    /// parsed expression, so inline flags and `(?x)` comments in `body` never
    /// reach the anchors.
    fn compile(&self, body: &str) -> Result<SearchStrategy, SearchError> {
        let hir = ParserBuilder::new()
            .case_insensitive(self.options.ignore_case)
            .build()
            .parse(body)
            .map_err(|e| syntax_error(body, &e))?;
        let hir = if self.options.match_whole_value {
            Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)])
        } else {
            hir
        };

        let regex = Regex::new(&hir.to_string()).map_err(|e| SearchError::InvalidRegex {
            message: e.to_string(),
            offset: None,
        })?;

        Ok(SearchStrategy {
            regex,
            options: self.options,
        })
    }
}

/// A compiled matcher for one text value.
///
/// Immutable and cheap to share; a row strategy reuses one instance for every
/// column it searches.
#[derive(Debug, Clone)]
pub struct SearchStrategy {
    regex: Regex,
    options: MatchOptions,
}

impl SearchStrategy {
    /// Parse `text` with the query grammar and build a strategy for it.
    pub fn compile(text: &str, options: MatchOptions) -> Result<Self, SearchError> {
        let pattern = Pattern::compile(text)?;
        SearcherBuilder::with_options(options).build(&pattern)
    }

    /// Options the strategy was built with.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Whether `value` matches.
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// All non-overlapping matches in `value`, left to right, as byte ranges.
    pub fn locate_occurrences(&self, value: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(value).map(|m| m.range()).collect()
    }

    /// Feed every occurrence in `value` to `highlighter`.
    pub fn highlight(&self, value: &str, highlighter: &mut dyn TextHighlighter) {
        for m in self.regex.find_iter(value) {
            highlighter.highlight_text(m.start(), m.end());
        }
    }
}
