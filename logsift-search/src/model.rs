//! The search model: owns at most one active search at a time.
//!
//! A search binds a strategy to the data model together with a remembered
//! position. Starting a new search replaces the old one outright; observers
//! are told about every new strategy and about the search being finished.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::cursor::{ItemPredicate, SearchDataModel, SearchDirection, scan};

/// Identity of one search session. Later sessions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observer of the active search strategy.
///
/// Notifications are sent after the model has updated its state, so an
/// observer may read the model (or start and finish searches) from within.
pub trait StrategyObserver<S> {
    /// A new search started with `strategy`.
    fn on_new_search_strategy(&self, strategy: Rc<S>);

    /// The search finished. Not called when a new search replaces the
    /// current one.
    fn on_search_strategy_cleared(&self);
}

struct ActiveSearch<S, P> {
    strategy: Rc<S>,
    position: Option<P>,
    session: SessionId,
}

/// Full-text search state over a data model `D` using strategies `S`.
///
/// Uses interior mutability so the presenter and the observers can share one
/// instance through an `Rc`. No borrow is held while observers run or while
/// a scan calls into the data model.
pub struct SearchModel<D: SearchDataModel, S> {
    data: D,
    current: RefCell<Option<ActiveSearch<S, D::Position>>>,
    next_session: Cell<u64>,
    observers: RefCell<Vec<Rc<dyn StrategyObserver<S>>>>,
}

impl<D, S> SearchModel<D, S>
where
    D: SearchDataModel,
    S: ItemPredicate<D::Item>,
{
    pub fn new(data: D) -> Self {
        Self {
            data,
            current: RefCell::new(None),
            next_session: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// The data model being searched.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Start a new search, replacing the current one if any.
    ///
    /// With a `start_position` the first search that includes the current row
    /// may return that row; without one the whole view is scanned.
    pub fn start_search(&self, strategy: S, start_position: Option<D::Position>) -> SessionId {
        let session = SessionId(self.next_session.get() + 1);
        self.next_session.set(session.0);
        let strategy = Rc::new(strategy);

        log::debug!("Starting search session {} at {:?}", session, start_position);
        *self.current.borrow_mut() = Some(ActiveSearch {
            strategy: Rc::clone(&strategy),
            position: start_position,
            session,
        });

        for observer in self.observer_snapshot() {
            observer.on_new_search_strategy(Rc::clone(&strategy));
        }
        session
    }

    /// Finish the current search, if any.
    pub fn finish_search(&self) {
        let finished = self.current.borrow_mut().take();
        if let Some(search) = finished {
            log::debug!("Finished search session {}", search.session);
            for observer in self.observer_snapshot() {
                observer.on_search_strategy_cleared();
            }
        }
    }

    /// Strategy of the current search.
    pub fn search_strategy(&self) -> Option<Rc<S>> {
        self.current.borrow().as_ref().map(|s| Rc::clone(&s.strategy))
    }

    /// Handle to the current search.
    pub fn current_search(&self) -> Option<Search<'_, D, S>> {
        let current = self.current.borrow();
        current.as_ref().map(|active| Search {
            model: self,
            session: active.session,
            strategy: Rc::clone(&active.strategy),
        })
    }

    /// Session of the current search.
    pub fn current_session(&self) -> Option<SessionId> {
        self.current.borrow().as_ref().map(|s| s.session)
    }

    /// Whether `session` is still the current search.
    pub fn is_current(&self, session: SessionId) -> bool {
        self.current_session() == Some(session)
    }

    pub fn add_observer(&self, observer: Rc<dyn StrategyObserver<S>>) {
        self.observers.borrow_mut().push(observer);
    }

    fn observer_snapshot(&self) -> Vec<Rc<dyn StrategyObserver<S>>> {
        self.observers.borrow().clone()
    }

    /// Runs `f` on the active search if it still belongs to `session`.
    fn with_active<R>(
        &self,
        session: SessionId,
        f: impl FnOnce(&mut ActiveSearch<S, D::Position>) -> R,
    ) -> Option<R> {
        let mut current = self.current.borrow_mut();
        current.as_mut().filter(|a| a.session == session).map(f)
    }
}

/// Handle to one search session.
///
/// Once the session is replaced or finished the handle goes inert: position
/// updates are ignored and searches find nothing.
pub struct Search<'a, D: SearchDataModel, S> {
    model: &'a SearchModel<D, S>,
    session: SessionId,
    strategy: Rc<S>,
}

impl<D, S> Search<'_, D, S>
where
    D: SearchDataModel,
    S: ItemPredicate<D::Item>,
{
    /// Move the remembered position; the next search starts there.
    pub fn set_position(&self, position: D::Position) {
        self.model
            .with_active(self.session, |active| active.position = Some(position));
    }

    pub fn position(&self) -> Option<D::Position> {
        self.model
            .with_active(self.session, |active| active.position.clone())
            .flatten()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn strategy(&self) -> &Rc<S> {
        &self.strategy
    }

    /// Look for the next hit in `direction`.
    ///
    /// A hit becomes the remembered position; a miss leaves it untouched.
    /// The scan itself runs now, the result is delivered through the
    /// returned future.
    pub fn search(&self, direction: impl Into<SearchDirection>) -> PendingSearch<D::Position> {
        let direction = direction.into();
        let hit = if self.model.is_current(self.session) {
            let from = self.position();
            scan(&self.model.data, &*self.strategy, from.as_ref(), direction)
                .map(|(_, position)| position)
        } else {
            log::debug!("Search {} is no longer active", self.session);
            None
        };

        if let Some(position) = &hit {
            self.set_position(position.clone());
        }
        log::trace!("Search {} {:?}: {:?}", self.session, direction, hit);

        let (tx, rx) = oneshot::channel();
        // The receiver is still alive, so this cannot fail.
        let _ = tx.send(hit);
        PendingSearch { rx }
    }
}

/// Result of [`Search::search`]: resolves to the hit position, or `None`
/// when nothing was found.
#[must_use = "the search result is only available through the future"]
pub struct PendingSearch<P> {
    rx: oneshot::Receiver<Option<P>>,
}

impl<P> Future for PendingSearch<P> {
    type Output = Option<P>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.ok().flatten())
    }
}
