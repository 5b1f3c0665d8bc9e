//! Interaction-thread executor.
//!
//! Search continuations and status timers run as local tasks on the thread
//! that drives the UI (inside a [`tokio::task::LocalSet`]). A panic in such a
//! task does not bring the thread down; it is reported to the process-wide
//! uncaught handler instead.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

type UncaughtHandler = Arc<dyn Fn(&str) + Send + Sync>;

static UNCAUGHT_HANDLER: Mutex<Option<UncaughtHandler>> = parking_lot::const_mutex(None);

/// Install the handler that receives panics from interaction tasks.
///
/// Replaces any previously installed handler. The handler itself may install
/// a new one.
pub fn set_uncaught_handler(handler: impl Fn(&str) + Send + Sync + 'static) {
    *UNCAUGHT_HANDLER.lock() = Some(Arc::new(handler));
}

/// Remove the installed handler; panics are logged again.
pub fn clear_uncaught_handler() {
    *UNCAUGHT_HANDLER.lock() = None;
}

/// Report an uncaught failure to the installed handler, or log it.
pub fn report_uncaught(message: &str) {
    // Clone out so the handler runs without the lock held.
    let handler = UNCAUGHT_HANDLER.lock().clone();
    match handler {
        Some(handler) => handler(message),
        None => log::error!("Uncaught error in interaction task: {}", message),
    }
}

/// Spawn `future` on the current `LocalSet`.
///
/// Must be called from within a `LocalSet` context. The returned handle
/// completes once the task has finished and any panic has been reported.
pub fn spawn_interaction<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + 'static,
{
    let task = tokio::task::spawn_local(future);
    tokio::task::spawn_local(async move {
        match task.await {
            Ok(()) => {}
            Err(e) if e.is_panic() => report_uncaught(&panic_message(e.into_panic())),
            Err(_) => log::debug!("Interaction task cancelled"),
        }
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
