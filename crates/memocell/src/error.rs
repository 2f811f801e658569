//! Error types for non-blocking cache access.

use thiserror::Error;

/// Errors that can occur on the non-blocking access path.
///
/// Returned by [`LazyCache::try_get`](crate::LazyCache::try_get). The
/// blocking [`get`](crate::LazyCache::get) needs no error type of its own:
/// it surfaces the computation's error directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryGetError<E> {
    /// Another caller currently holds the guard, either reading the slot
    /// or running the computation.
    #[error("cache busy: another caller holds the guard")]
    WouldBlock,

    /// The computation ran and failed; the cell is still empty and the
    /// next caller retries.
    #[error("computation failed: {0}")]
    Compute(E),
}

impl<E> TryGetError<E> {
    /// Returns the computation's own error, if that is what this is.
    pub fn into_compute(self) -> Option<E> {
        match self {
            Self::Compute(err) => Some(err),
            Self::WouldBlock => None,
        }
    }

    /// Returns `true` if the access failed only because the guard was
    /// contended.
    pub const fn is_would_block(&self) -> bool {
        matches!(self, Self::WouldBlock)
    }
}
