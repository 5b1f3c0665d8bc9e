//! Shared integration test helpers for logsift.
//!
//! Fake views that record what the presenter asks of them, plus helpers to
//! run interaction tasks.
//!
//! ```ignore
//! mod common;
//! use common::{FakePromptView, FakeSearchableView, FakeStatus, Journal, run_local, settle};
//! ```

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use logsift::search::{SearchPromptView, SearchStatusView, SearchableView};
use tokio::task::LocalSet;

/// Run `future` inside a fresh `LocalSet`, as the UI thread would.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

/// Give pending interaction tasks the chance to run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Search outcomes in the order the views saw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<P> {
    Found(P),
    NotFound,
}

#[derive(Debug)]
pub struct Journal<P> {
    events: RefCell<Vec<Event<P>>>,
}

impl<P> Default for Journal<P> {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }
}

impl<P: Clone> Journal<P> {
    pub fn push(&self, event: Event<P>) {
        self.events.borrow_mut().push(event);
    }

    /// Returns and forgets the recorded events.
    pub fn take(&self) -> Vec<Event<P>> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// Searchable view that selects every shown result, like a table would.
pub struct FakeSearchableView<P> {
    selected: RefCell<Option<P>>,
    journal: Rc<Journal<P>>,
}

impl<P: Clone> FakeSearchableView<P> {
    pub fn new(journal: Rc<Journal<P>>) -> Self {
        Self {
            selected: RefCell::new(None),
            journal,
        }
    }

    pub fn select(&self, position: P) {
        *self.selected.borrow_mut() = Some(position);
    }

    pub fn selected(&self) -> Option<P> {
        self.selected.borrow().clone()
    }
}

impl<P: Clone> SearchableView<P> for FakeSearchableView<P> {
    fn show_search_result(&self, position: P) {
        self.select(position.clone());
        self.journal.push(Event::Found(position));
    }

    fn search_start_position(&self) -> Option<P> {
        self.selected()
    }
}

/// Status view that records "not found" reports.
pub struct FakeStatus<P> {
    journal: Rc<Journal<P>>,
    resets: Cell<usize>,
}

impl<P: Clone> FakeStatus<P> {
    pub fn new(journal: Rc<Journal<P>>) -> Self {
        Self {
            journal,
            resets: Cell::new(0),
        }
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }
}

impl<P: Clone> SearchStatusView for FakeStatus<P> {
    fn show_not_found(&self) {
        self.journal.push(Event::NotFound);
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Show,
    Focus,
    Hide,
    Clear,
    Error(String),
}

/// Prompt view that tracks visibility and records every call.
#[derive(Default)]
pub struct FakePromptView {
    showing: Cell<bool>,
    calls: RefCell<Vec<PromptCall>>,
}

impl FakePromptView {
    /// Returns and forgets the recorded calls.
    pub fn take_calls(&self) -> Vec<PromptCall> {
        self.calls.borrow_mut().drain(..).collect()
    }

    fn record(&self, call: PromptCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SearchPromptView for FakePromptView {
    fn show(&self) {
        self.showing.set(true);
        self.record(PromptCall::Show);
    }

    fn focus(&self) {
        self.record(PromptCall::Focus);
    }

    fn hide(&self) {
        self.showing.set(false);
        self.record(PromptCall::Hide);
    }

    fn is_showing(&self) -> bool {
        self.showing.get()
    }

    fn clear_search_pattern(&self) {
        self.record(PromptCall::Clear);
    }

    fn show_pattern_error(&self, message: &str) {
        self.record(PromptCall::Error(message.to_string()));
    }
}
