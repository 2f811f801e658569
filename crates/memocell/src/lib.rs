//! Thread-safe single-flight lazy memoization primitives.
//!
//! This crate provides cells that compute an expensive derived value on
//! first access, cache it, and stay correct when hit concurrently from
//! many threads. The slot is guarded by a mutex held for the full duration
//! of the computation: at most one thread ever runs the computation, every
//! caller observes either the freshly computed value or the cached one,
//! and a partially written value is never visible.
//!
//! ## Key Components
//!
//! - [`LazyCache`]: fallible single-flight cell — errors surface to the
//!   triggering caller, are never cached, and leave the cell retriable
//! - [`Lazy`]: infallible companion for initializers that cannot fail
//! - [`CacheState`]: observable cell state for inspection and logging
//! - [`TryGetError`]: error type for the non-blocking access path
//!
//! ## Usage
//!
//! ```
//! use memocell::{CacheState, LazyCache};
//!
//! let cache = LazyCache::new(|| -> Result<u64, String> {
//!     // stand-in for an expensive derivation
//!     Ok(6 * 7)
//! });
//!
//! assert_eq!(cache.state(), CacheState::Empty);
//! assert_eq!(cache.get(), Ok(42));       // computes
//! assert_eq!(cache.get(), Ok(42));       // cached
//! assert_eq!(cache.computations(), 1);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod cache;
mod error;
mod lazy;

pub use cache::{CacheState, LazyCache};
pub use error::TryGetError;
pub use lazy::Lazy;
