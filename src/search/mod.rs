//! Interactive search for log tables.
//!
//! This module ties the search engine from `logsift-search` to the UI:
//! the session presenter, the transient status message, and highlighting of
//! hits in table cells and tooltips.

pub mod highlight;
pub mod presenter;
pub mod status;
pub mod tooltip;

pub use highlight::SearchResultsHighlighter;
pub use presenter::{
    RowPatternCompiler, SearchPatternCompiler, SearchPresenter, SearchPromptView, SearchableView,
    SessionState, pattern_error_message,
};
pub use status::{NOT_FOUND_MESSAGE, SearchStatusPresenter, SearchStatusView, StatusMessageView};
pub use tooltip::TooltipGenerator;
