//! Lockcoll - Lock Guarded Collections
//!
//! Plain `Mutex<HashMap<_, _>>` style sharing has two classic failure modes:
//! iteration that holds the lock while user code runs (deadlock the moment
//! that code touches the container again), and positional access that panics
//! or corrupts on a stale index. This library packages a map and a vec that
//! close both holes.
//!
//! Every operation acquires the internal [RwLock](parking_lot::RwLock) for
//! the shortest possible span: readers share, writers exclude, and the lock
//! is *always* released before any value, iterator or stream is handed back
//! to you. Iteration works on point in time snapshots, so you can walk the
//! contents while other threads keep mutating, and you can call back into the
//! same container from inside the loop.
//!
//! [`LockMap`] additionally remembers insertion order, which gives `first`
//! and value ordered `sort` an observable meaning that a bare hashmap can not
//! provide.
//!
//! Positional access on [`LockVec`] never panics. Out of range indexes come
//! back as a typed [`OutOfBounds`] error carrying the index and the length
//! that rejected it.
//!
//! # Features
//!
//! * `asynch` - `tokio` flavoured variants of both containers, with channel
//!   backed [`SnapshotStream`] iteration driven by a detached producer task
//! * `foldhash` - use the foldhash crate for keyed hashing
//! * `ahash` - use the cpu accelerated ahash crate instead
//!
//! By default `asynch` and `foldhash` are enabled. With both hasher features
//! disabled the map falls back to the std hasher.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]

use thiserror::Error;

pub mod lockmap;
pub use lockmap::LockMap;

pub mod lockvec;
pub use lockvec::LockVec;

#[cfg(feature = "asynch")]
pub mod stream;
#[cfg(feature = "asynch")]
pub use stream::SnapshotStream;

mod internals;

/// Ordering predicate for [`LockMap::sort`]. `less(a, b, reverse)` returns
/// true when `a` must sort before `b` under the requested direction - the
/// predicate sees `reverse` and is responsible for honouring it.
pub type SortFn<V> = dyn Fn(&V, &V, bool) -> bool + Send + Sync;

/// A positional operation named an index the collection does not have.
///
/// This is the only error type in the crate. It is returned, never panicked,
/// so a caller racing against concurrent removals can treat a stale index as
/// a normal outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} out of range for length {len}")]
pub struct OutOfBounds {
    /// The index that was asked for.
    pub index: usize,
    /// The length of the collection at the time of the call.
    pub len: usize,
}
