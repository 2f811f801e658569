//! Infallible lazy cells.

use core::fmt;

use parking_lot::Mutex;

use crate::cache::Slot;

struct Inner<T, F> {
    slot: Slot<T>,
    init: F,
}

/// A value computed on first access and cached thereafter.
///
/// Infallible companion to [`LazyCache`](crate::LazyCache) for
/// initializers that cannot fail: same guard discipline (the lock is held
/// for the full duration of the initializer, so exactly one racing thread
/// runs it), no error channel. Usable in statics thanks to the const
/// constructor.
///
/// ```
/// use memocell::Lazy;
///
/// static ANSWER: Lazy<u64> = Lazy::new(|| 6 * 7);
///
/// assert_eq!(ANSWER.force(), 42);
/// assert_eq!(ANSWER.force(), 42); // cached
/// ```
pub struct Lazy<T, F = fn() -> T> {
    inner: Mutex<Inner<T, F>>,
}

impl<T, F> Lazy<T, F> {
    /// Creates an uninitialized cell around the given initializer.
    pub const fn new(init: F) -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                init,
            }),
        }
    }
}

impl<T: Clone, F> Lazy<T, F> {
    /// Returns the value, running the initializer on first access.
    ///
    /// Callers racing on an uninitialized cell serialize behind the guard
    /// and all observe the single initialized value.
    pub fn force(&self) -> T
    where
        F: FnMut() -> T,
    {
        let mut inner = self.inner.lock();
        if let Slot::Ready(value) = &inner.slot {
            return value.clone();
        }
        let value = (inner.init)();
        inner.slot = Slot::Ready(value.clone());
        value
    }

    /// Returns the value if it has been initialized, never initializing.
    pub fn peek(&self) -> Option<T> {
        match &self.inner.lock().slot {
            Slot::Ready(value) => Some(value.clone()),
            Slot::Empty => None,
        }
    }
}

impl<T, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .inner
            .try_lock()
            .map_or("locked", |inner| match inner.slot {
                Slot::Empty => "empty",
                Slot::Ready(_) => "ready",
            });
        f.debug_struct("Lazy")
            .field("state", &state)
            .finish_non_exhaustive()
    }
}
