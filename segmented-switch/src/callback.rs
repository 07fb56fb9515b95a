//! Event handlers for move and change notifications.
//!
//! ## Usage
//!
//! Any `Fn` closure that is `Send + Sync` converts into a handler, so
//! [`SegmentedSwitch::on_will_move`](crate::SegmentedSwitch::on_will_move),
//! `on_did_move` and `on_value_changed` accept closures directly. Handlers are
//! shared behind an `Arc`: cloning one is cheap, and two handlers are equal
//! only when they are clones of the same registration.

use std::{fmt, sync::Arc};

/// Handler for a notification without a payload, such as a value change.
#[derive(Clone)]
pub struct Callback {
    handler: Arc<dyn Fn() + Send + Sync>,
}

impl Callback {
    /// Wraps `handler`.
    pub fn new(handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the handler.
    pub fn call(&self) {
        (self.handler)()
    }
}

impl<F> From<F> for Callback
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

/// A handler that ignores the notification.
impl Default for Callback {
    fn default() -> Self {
        Self::new(|| ())
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.handler))
    }
}

/// Handler for a notification carrying a segment index.
pub struct CallbackWith<T> {
    handler: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> CallbackWith<T> {
    /// Wraps `handler`.
    pub fn new(handler: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the handler with `value`.
    pub fn call(&self, value: T) {
        (self.handler)(value)
    }
}

impl<T, F> From<F> for CallbackWith<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

// Derived `Clone` would demand `T: Clone`.
impl<T> Clone for CallbackWith<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::new(|_| ())
    }
}

impl<T> PartialEq for CallbackWith<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T> Eq for CallbackWith<T> {}

impl<T> fmt::Debug for CallbackWith<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackWith({:p})", Arc::as_ptr(&self.handler))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_handlers_compare_by_registration() {
        let a = Callback::new(|| ());
        let b = a.clone();
        let c = Callback::new(|| ());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_changed_handler_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&hits);
        let callback = Callback::from(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        callback.call();
        callback.clone().call();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_move_handler_receives_index() {
        let seen = Arc::new(AtomicIsize::new(0));
        let sink = Arc::clone(&seen);
        let callback = CallbackWith::from(move |index: isize| {
            sink.store(index, Ordering::SeqCst);
        });
        callback.call(-2);
        assert_eq!(seen.load(Ordering::SeqCst), -2);
    }
}
