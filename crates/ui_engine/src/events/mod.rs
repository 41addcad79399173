//! Interaction handler plumbing
//!
//! Key principles:
//! - Observer lists are invoked in subscription order
//! - Every handler runs isolated: an error or a panic is logged with the
//!   owner's identity and the remaining handlers still run
//! - Handlers never unwind into the frame loop

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Error type returned by interaction handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an interaction handler
pub type HandlerResult = Result<(), HandlerError>;

/// A handler panicked instead of returning an error
#[derive(Debug, thiserror::Error)]
#[error("handler panicked: {0}")]
pub struct HandlerPanic(pub String);

/// Run `f`, converting a panic into a [`HandlerPanic`] error
pub fn isolate<R>(f: impl FnOnce() -> Result<R, HandlerError>) -> Result<R, HandlerError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Box::new(HandlerPanic(panic_message(payload.as_ref())))),
    }
}

/// Run `f` isolated and log a failure against `owner`.
///
/// Returns `true` when the handler succeeded.
pub fn run_logged(owner: &str, phase: &str, f: impl FnOnce() -> HandlerResult) -> bool {
    match isolate(f) {
        Ok(()) => true,
        Err(err) => {
            log::error!("[{owner}] {phase} failed: {err}");
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

type Observer<E, Cx> = Box<dyn FnMut(&E, &mut Cx) -> HandlerResult>;

/// Ordered list of subscribers for one kind of event
pub struct Observers<E, Cx> {
    handlers: Vec<Observer<E, Cx>>,
}

impl<E, Cx> Observers<E, Cx> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a subscriber
    pub fn subscribe(&mut self, handler: impl FnMut(&E, &mut Cx) -> HandlerResult + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of subscribers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Invoke every subscriber in order.
    ///
    /// Failures are logged against `owner`; returns how many subscribers failed.
    pub fn notify(&mut self, owner: &str, event: &E, cx: &mut Cx) -> usize {
        let mut failures = 0;
        for (index, handler) in self.handlers.iter_mut().enumerate() {
            if let Err(err) = isolate(|| handler(event, cx)) {
                log::error!("[{owner}] observer #{index} failed: {err}");
                failures += 1;
            }
        }
        failures
    }
}

impl<E, Cx> Default for Observers<E, Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Cx> std::fmt::Debug for Observers<E, Cx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observers_run_in_order() {
        let mut observers: Observers<u32, Vec<u32>> = Observers::new();
        observers.subscribe(|e, log| {
            log.push(*e);
            Ok(())
        });
        observers.subscribe(|e, log| {
            log.push(e * 10);
            Ok(())
        });

        let mut log = Vec::new();
        let failures = observers.notify("test", &3, &mut log);

        assert_eq!(failures, 0);
        assert_eq!(log, vec![3, 30]);
    }

    #[test]
    fn test_failing_observer_does_not_stop_others() {
        let mut observers: Observers<(), Vec<&'static str>> = Observers::new();
        observers.subscribe(|_, log| {
            log.push("first");
            Err("boom".into())
        });
        observers.subscribe(|_, _| panic!("panicking observer"));
        observers.subscribe(|_, log| {
            log.push("third");
            Ok(())
        });

        let mut log = Vec::new();
        let failures = observers.notify("test", &(), &mut log);

        assert_eq!(failures, 2);
        assert_eq!(log, vec!["first", "third"]);
    }

    #[test]
    fn test_isolate_reports_panic_message() {
        let result: Result<(), HandlerError> = isolate(|| panic!("bad handler"));
        let err = result.expect_err("panic should become an error");
        assert!(err.to_string().contains("bad handler"));
    }
}
