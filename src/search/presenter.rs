//! The search presenter: drives the prompt, the searchable view and the
//! status view from user commands.
//!
//! Session states:
//!
//! ```text
//! Idle ──show_search_prompt──▶ Prompting ──commit(valid)──▶ Searching
//!   ▲                             │  ▲                         │
//!   └──────discard / stop─────────┘  └───show_search_prompt────┘
//! ```
//!
//! `find_next`/`find_prev` without an active search open the prompt instead.
//! Search results arrive through interaction tasks; a result whose session
//! has been replaced or finished in the meantime is dropped.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use logsift_config::SearchConfig;
use logsift_search::{
    Direction, ItemPredicate, MatchOptions, PendingSearch, RowSearchStrategy, SearchDataModel,
    SearchDirection, SearchError, SearchModel, SessionId, compile_row_with,
};

use super::status::SearchStatusView;
use crate::executor::spawn_interaction;

/// The view being searched. It shows hits and tells where to start.
pub trait SearchableView<P> {
    /// Reveal and select the row at `position`.
    fn show_search_result(&self, position: P);

    /// Where the next search should start, typically the selected row.
    fn search_start_position(&self) -> Option<P>;
}

/// The view where the user types a query.
///
/// The view does not hide itself; the presenter drives visibility. It reports
/// the user's decision through [`SearchPresenter::commit`] and
/// [`SearchPresenter::discard`].
pub trait SearchPromptView {
    /// Show the prompt. Not called while it is already showing.
    fn show(&self);

    /// Focus the prompt. Only called while it is showing.
    fn focus(&self);

    /// Hide the prompt. No-op if it is hidden.
    fn hide(&self);

    fn is_showing(&self) -> bool;

    /// Clear the entered query.
    fn clear_search_pattern(&self);

    /// Show a problem with the entered query.
    fn show_pattern_error(&self, message: &str);
}

/// Turns query text into a search strategy.
///
/// `Ok(None)` means there is nothing to search for (a blank query).
pub trait SearchPatternCompiler<S> {
    fn compile(&self, text: &str) -> Result<Option<S>, SearchError>;
}

impl<S, F> SearchPatternCompiler<S> for F
where
    F: Fn(&str) -> Result<Option<S>, SearchError>,
{
    fn compile(&self, text: &str) -> Result<Option<S>, SearchError> {
        self(text)
    }
}

/// Compiles row queries (`app:`, `tag:`, `msg:`, `/regex/`) for log tables.
#[derive(Debug, Clone, Copy)]
pub struct RowPatternCompiler {
    options: MatchOptions,
}

impl RowPatternCompiler {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.match_options())
    }
}

impl Default for RowPatternCompiler {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SearchPatternCompiler<RowSearchStrategy> for RowPatternCompiler {
    fn compile(&self, text: &str) -> Result<Option<RowSearchStrategy>, SearchError> {
        compile_row_with(Some(text), self.options)
    }
}

/// Where the presenter is in a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No prompt, no search.
    #[default]
    Idle,
    /// The prompt is open and waiting for a query.
    Prompting,
    /// A search is active and the prompt is closed.
    Searching,
}

/// Error text shown in the prompt for a query that does not compile.
pub fn pattern_error_message(text: &str, error: &SearchError) -> String {
    match error.offset() {
        Some(offset) => format!(
            "'{text}' isn't a valid search expression. {error} at position {offset}"
        ),
        None => format!("'{text}' isn't a valid search expression. {error}"),
    }
}

struct Inner<D: SearchDataModel, S> {
    model: Rc<SearchModel<D, S>>,
    compiler: Box<dyn SearchPatternCompiler<S>>,
    searchable_view: Rc<dyn SearchableView<D::Position>>,
    status: Rc<dyn SearchStatusView>,
    prompt: Rc<dyn SearchPromptView>,
    state: Cell<SessionState>,
}

/// Full-text search presenter.
///
/// Cheap to clone; clones share the same session. Must be used on the
/// interaction thread inside a `LocalSet`.
pub struct SearchPresenter<D: SearchDataModel, S> {
    inner: Rc<Inner<D, S>>,
}

impl<D: SearchDataModel, S> Clone for SearchPresenter<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D, S> SearchPresenter<D, S>
where
    D: SearchDataModel + 'static,
    S: ItemPredicate<D::Item> + 'static,
{
    pub fn new(
        model: Rc<SearchModel<D, S>>,
        compiler: impl SearchPatternCompiler<S> + 'static,
        searchable_view: Rc<dyn SearchableView<D::Position>>,
        status: Rc<dyn SearchStatusView>,
        prompt: Rc<dyn SearchPromptView>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                model,
                compiler: Box::new(compiler),
                searchable_view,
                status,
                prompt,
                state: Cell::new(SessionState::Idle),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.get()
    }

    pub fn model(&self) -> &Rc<SearchModel<D, S>> {
        &self.inner.model
    }

    /// Open the prompt, or focus it if it is already open.
    pub fn show_search_prompt(&self) {
        let inner = &self.inner;
        if inner.prompt.is_showing() {
            inner.prompt.focus();
            return;
        }
        inner.status.reset();
        inner.prompt.show();
        inner.state.set(SessionState::Prompting);
    }

    /// The user committed `text` in the prompt.
    ///
    /// A query that fails to compile keeps the prompt open with an error and
    /// leaves any active search alone. A blank query clears the search.
    pub fn commit(&self, text: &str) {
        let inner = &self.inner;
        if inner.state.get() != SessionState::Prompting {
            log::debug!("Ignoring commit of '{}' outside of the prompt", text);
            return;
        }

        match inner.compiler.compile(text) {
            Err(e) => {
                log::debug!("Rejected search query '{}': {}", text, e);
                inner.prompt.show_pattern_error(&pattern_error_message(text, &e));
            }
            Ok(None) => self.close_session(),
            Ok(Some(strategy)) => {
                inner.prompt.hide();
                let start = inner.searchable_view.search_start_position();
                inner.model.start_search(strategy, start);
                inner.state.set(SessionState::Searching);
                self.find(Direction::Forward.also_search_current());
            }
        }
    }

    /// The user dismissed the prompt.
    pub fn discard(&self) {
        if self.inner.state.get() != SessionState::Prompting {
            log::debug!("Ignoring discard outside of the prompt");
            return;
        }
        self.close_session();
    }

    /// Abandon the current search, whatever the state.
    pub fn stop_search(&self) {
        self.close_session();
    }

    /// Show the next hit, or open the prompt if there is no search.
    pub fn find_next(&self) {
        self.find(Direction::Forward.into());
    }

    /// Show the previous hit, or open the prompt if there is no search.
    pub fn find_prev(&self) {
        self.find(Direction::Backward.into());
    }

    fn find(&self, direction: SearchDirection) {
        let inner = &self.inner;
        inner.status.reset();

        let start = inner.searchable_view.search_start_position();
        let pending = inner.model.current_search().map(|search| {
            if let Some(position) = start {
                search.set_position(position);
            }
            (search.session(), search.search(direction))
        });

        match pending {
            Some((session, pending)) => self.deliver(session, pending),
            None => self.show_search_prompt(),
        }
    }

    fn deliver(&self, session: SessionId, pending: PendingSearch<D::Position>) {
        let weak: Weak<Inner<D, S>> = Rc::downgrade(&self.inner);
        spawn_interaction(async move {
            let result = pending.await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.model.is_current(session) {
                log::debug!("Dropping result of stale search session {}", session);
                return;
            }
            match result {
                Some(position) => inner.searchable_view.show_search_result(position),
                None => inner.status.show_not_found(),
            }
        });
    }

    fn close_session(&self) {
        let inner = &self.inner;
        inner.status.reset();
        inner.prompt.hide();
        inner.prompt.clear_search_pattern();
        inner.model.finish_search();
        inner.state.set(SessionState::Idle);
    }
}
