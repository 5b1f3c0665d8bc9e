//! Search status: the transient "not found" message.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::executor::spawn_interaction;

/// Message shown when a search runs out of hits.
pub const NOT_FOUND_MESSAGE: &str = "Text not found";

/// What the search presenter reports about the search outcome.
pub trait SearchStatusView {
    /// Tell the user that nothing (more) was found.
    fn show_not_found(&self);

    /// Clear whatever status is showing.
    fn reset(&self);
}

/// The widget that actually displays status messages.
pub trait StatusMessageView {
    fn show_message(&self, message: &str);
    fn hide_message(&self);
}

/// Shows the "not found" message and hides it again after a timeout.
///
/// Timers run as interaction tasks, so this must be used inside a `LocalSet`.
pub struct SearchStatusPresenter {
    view: Rc<dyn StatusMessageView>,
    timeout: Duration,
    // Bumped on every show/reset; a timer only hides the message it was
    // started for.
    generation: Rc<Cell<u64>>,
}

impl SearchStatusPresenter {
    pub fn new(view: Rc<dyn StatusMessageView>, timeout: Duration) -> Self {
        Self {
            view,
            timeout,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn from_config(view: Rc<dyn StatusMessageView>, config: &logsift_config::SearchConfig) -> Self {
        Self::new(view, config.not_found_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }
}

impl SearchStatusView for SearchStatusPresenter {
    fn show_not_found(&self) {
        let shown = self.next_generation();
        self.view.show_message(NOT_FOUND_MESSAGE);

        let view = Rc::clone(&self.view);
        let generation = Rc::clone(&self.generation);
        let timeout = self.timeout;
        spawn_interaction(async move {
            tokio::time::sleep(timeout).await;
            if generation.get() == shown {
                view.hide_message();
            }
        });
    }

    fn reset(&self) {
        self.next_generation();
        self.view.hide_message();
    }
}
