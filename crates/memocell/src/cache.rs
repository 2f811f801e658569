//! Guarded single-flight memoization.
//!
//! This module provides [`LazyCache`], a cell that computes an expensive
//! fallible value on first access, caches it, and serves every later access
//! from the cache while remaining safe to share across threads.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::TryGetError;

/// Storage slot for a cached value.
///
/// `Ready` carries the value itself, so the validity flag and the result
/// slot are a single field and cannot disagree.
pub(crate) enum Slot<T> {
    Empty,
    Ready(T),
}

/// Observable state of a [`LazyCache`].
///
/// A failed computation is never stored: the cell is back to
/// [`Empty`](Self::Empty) by the time the guard is released, so failure is
/// only ever visible as the error returned to the caller that triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum CacheState {
    /// No value has been computed yet; the next access will compute.
    Empty,
    /// A value is cached; reads are served without recomputation.
    Ready,
}

struct Inner<T, F> {
    slot: Slot<T>,
    compute: F,
}

/// A thread-safe, single-flight memoizing cell.
///
/// The cell owns a computation function fixed at construction. The first
/// call to [`get`](Self::get) runs it and caches the result; every later
/// call returns the cached value without recomputation. All access to the
/// slot happens under a mutex, and the mutex is held for the *full*
/// duration of the computation. That serializes concurrent callers behind
/// an in-flight computation, but it is what makes the cell single-flight:
/// at most one thread ever executes the computation to completion, and no
/// thread can observe a partially written value. Narrowing the lock to the
/// readiness check alone would reintroduce the duplicate-computation race.
///
/// Errors from the computation are propagated to the triggering caller and
/// are not cached; the cell stays empty and any later caller retries.
///
/// `LazyCache<T, F>` is `Sync` when `T: Send` and `F: Send`; share it
/// across threads behind an `Arc` or embed it in an owning object.
///
/// # Example
///
/// ```
/// use memocell::LazyCache;
///
/// let cache = LazyCache::new(|| -> Result<u64, String> {
///     // stand-in for an expensive derivation
///     Ok(6 * 7)
/// });
///
/// assert_eq!(cache.get(), Ok(42));
/// assert_eq!(cache.get(), Ok(42)); // served from the cache
/// assert_eq!(cache.computations(), 1);
/// ```
pub struct LazyCache<T, F> {
    inner: Mutex<Inner<T, F>>,
    /// Times the computation has been invoked, failed attempts included.
    computations: AtomicU64,
    /// Accesses served from the cache.
    hits: AtomicU64,
}

impl<T, F> LazyCache<T, F> {
    /// Creates an empty cell around the given computation function.
    pub const fn new(compute: F) -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                compute,
            }),
            computations: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Reports the current state of the cell without computing.
    pub fn state(&self) -> CacheState {
        match self.inner.lock().slot {
            Slot::Empty => CacheState::Empty,
            Slot::Ready(_) => CacheState::Ready,
        }
    }

    /// Returns `true` once a value has been cached.
    pub fn is_ready(&self) -> bool {
        self.state() == CacheState::Ready
    }

    /// Stores a value directly if the cell is still empty.
    ///
    /// Returns the rejected value if a value is already cached. A stored
    /// value counts as a cache hit for later reads, and the computation
    /// function will never run.
    pub fn try_set(&self, value: T) -> Result<(), T> {
        let mut inner = self.inner.lock();
        match inner.slot {
            Slot::Ready(_) => Err(value),
            Slot::Empty => {
                inner.slot = Slot::Ready(value);
                Ok(())
            }
        }
    }

    /// Consumes the cell, returning the cached value if one was stored.
    pub fn into_inner(self) -> Option<T> {
        match self.inner.into_inner().slot {
            Slot::Ready(value) => Some(value),
            Slot::Empty => None,
        }
    }

    /// Number of times the computation function has been invoked, failed
    /// attempts included.
    ///
    /// Monitoring data with relaxed ordering; do not use it for
    /// synchronization.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of accesses that were served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }
}

impl<T: Clone, F> LazyCache<T, F> {
    /// Returns the value, computing and caching it on first use.
    ///
    /// Blocks while another caller holds the guard, possibly for the whole
    /// duration of that caller's computation. On success the value becomes
    /// permanent: the cell never transitions back to empty.
    ///
    /// A computation that calls `get` on its own cell deadlocks; the guard
    /// is not re-entrant.
    ///
    /// # Errors
    ///
    /// Surfaces the computation's error verbatim. The failure is reported
    /// to this caller only and is not cached: the next caller to acquire
    /// the guard finds the cell empty and retries.
    pub fn get<E>(&self) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut inner = self.inner.lock();
        if let Slot::Ready(value) = &inner.slot {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }
        self.computations.fetch_add(1, Ordering::Relaxed);
        let value = (inner.compute)()?;
        inner.slot = Slot::Ready(value.clone());
        Ok(value)
    }

    /// Non-blocking variant of [`get`](Self::get).
    ///
    /// If another caller currently holds the guard this returns
    /// [`TryGetError::WouldBlock`] immediately instead of waiting.
    /// Otherwise it behaves exactly like `get`, with a computation failure
    /// wrapped in [`TryGetError::Compute`]. The computation still runs only
    /// under the fully held guard, so single-flight is preserved.
    pub fn try_get<E>(&self) -> Result<T, TryGetError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        let Some(mut inner) = self.inner.try_lock() else {
            return Err(TryGetError::WouldBlock);
        };
        if let Slot::Ready(value) = &inner.slot {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }
        self.computations.fetch_add(1, Ordering::Relaxed);
        let value = (inner.compute)().map_err(TryGetError::Compute)?;
        inner.slot = Slot::Ready(value.clone());
        Ok(value)
    }

    /// Returns the cached value if one is present, never computing.
    pub fn peek(&self) -> Option<T> {
        match &self.inner.lock().slot {
            Slot::Ready(value) => Some(value.clone()),
            Slot::Empty => None,
        }
    }
}

impl<T, F> fmt::Debug for LazyCache<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_lock so that Debug never blocks behind an in-flight computation
        let state = self
            .inner
            .try_lock()
            .map_or("locked", |inner| match inner.slot {
                Slot::Empty => CacheState::Empty.into(),
                Slot::Ready(_) => CacheState::Ready.into(),
            });
        f.debug_struct("LazyCache")
            .field("state", &state)
            .field("computations", &self.computations())
            .field("hits", &self.hits())
            .finish_non_exhaustive()
    }
}
