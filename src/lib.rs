//! logsift: incremental search over live, re-sortable log tables.
//!
//! The engine (query grammar, matchers, cursor, search model) lives in the
//! `logsift-search` crate and settings in `logsift-config`. This crate adds
//! the interactive layer:
//!
//! - [`search::SearchPresenter`]: the prompt / find-next / find-previous
//!   session state machine
//! - [`search::SearchStatusPresenter`]: the transient "not found" message
//! - [`search::SearchResultsHighlighter`] and [`search::TooltipGenerator`]:
//!   hit highlighting in cells and tooltips
//! - [`logtable::LogTable`]: a filterable, sortable table with row ids that
//!   survive re-sorting
//! - [`executor`]: interaction-thread tasks and the uncaught-panic handler
//!
//! Everything in the interactive layer is single-threaded and must run
//! inside a `tokio::task::LocalSet`.

use std::rc::Rc;

pub mod executor;
pub mod logtable;
pub mod search;

pub use logsift_config::{ConfigError, SearchConfig};
pub use logsift_search as engine;

use logsift_search::{RowSearchStrategy, SearchModel};
use logtable::{LogTable, RowId};
use search::{
    RowPatternCompiler, SearchPresenter, SearchPromptView, SearchResultsHighlighter,
    SearchStatusView, SearchableView,
};

/// Search model over a shared log table.
pub type LogSearchModel = SearchModel<Rc<LogTable>, RowSearchStrategy>;

/// Search presenter over a shared log table.
pub type LogSearchPresenter = SearchPresenter<Rc<LogTable>, RowSearchStrategy>;

/// Views the log search talks to.
pub struct LogSearchViews {
    pub table_view: Rc<dyn SearchableView<RowId>>,
    pub status: Rc<dyn SearchStatusView>,
    pub prompt: Rc<dyn SearchPromptView>,
}

/// Wire up search for `table`: the model, a highlighter following the active
/// strategy, and the presenter driving `views`.
pub fn log_search(
    table: Rc<LogTable>,
    config: &SearchConfig,
    views: LogSearchViews,
) -> (LogSearchPresenter, Rc<SearchResultsHighlighter>) {
    let highlighter = Rc::new(SearchResultsHighlighter::new(config.clone()));

    let model = Rc::new(LogSearchModel::new(table));
    model.add_observer(highlighter.clone());

    let presenter = SearchPresenter::new(
        model,
        RowPatternCompiler::from_config(config),
        views.table_view,
        views.status,
        views.prompt,
    );
    (presenter, highlighter)
}
