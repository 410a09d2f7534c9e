//! LockMap - A lock guarded, insertion ordered, concurrently usable map - async!
//!
//! The same structure as [`LockMap`](super::LockMap), guarded by a
//! [tokio RwLock](tokio::sync::RwLock) so lock waits suspend the task
//! instead of the thread. Iteration returns a [`SnapshotStream`]: the
//! snapshot is captured and the lock released before the stream exists, then
//! a detached task feeds the items through a bounded channel at the pace the
//! consumer pulls them.

use std::borrow::Borrow;
use std::hash::Hash;

use tokio::sync::RwLock;

use crate::internals::lockmap::MapInner;
use crate::stream::SnapshotStream;
use crate::SortFn;

/// A lock guarded, insertion ordered map for async code.
///
/// All operations take `&self`. Share it between tasks in an
/// [`Arc`](std::sync::Arc).
pub struct LockMap<K, V> {
    inner: RwLock<MapInner<K, V>>,
    cmp: Option<Box<SortFn<V>>>,
}

impl<K, V> LockMap<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new empty map with no ordering predicate.
    pub fn new() -> Self {
        LockMap {
            inner: RwLock::new(MapInner::new()),
            cmp: None,
        }
    }

    /// Create a new empty map that sorts with `cmp`. See
    /// [`LockMap::with_ordering`](super::LockMap::with_ordering) for the
    /// predicate contract.
    pub fn with_ordering<F>(cmp: F) -> Self
    where
        F: Fn(&V, &V, bool) -> bool + Send + Sync + 'static,
    {
        LockMap {
            inner: RwLock::new(MapInner::new()),
            cmp: Some(Box::new(cmp)),
        }
    }

    // == RO methods

    /// Retrieve a clone of the value at `k`, or `None` if the key is absent.
    pub async fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().await.get(k).cloned()
    }

    /// True if `k` is present.
    pub async fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().await.contains_key(k)
    }

    /// The number of entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True if there are no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// A clone of the entry at the head of the iteration order, or `None` on
    /// an empty map.
    pub async fn first(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .await
            .first()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Stream a snapshot of the entries in map order.
    ///
    /// The read lock is held only while the snapshot is captured, never by
    /// the returned stream. The channel holds a single item, so the producer
    /// stays one step ahead of the consumer and an abandoned stream buffers
    /// almost nothing before its producer is aborted.
    pub async fn iter(&self) -> SnapshotStream<(K, V)> {
        let snapshot = self.inner.read().await.snapshot();
        SnapshotStream::spawn(snapshot, 1)
    }

    /// Owned copies of the keys in map order.
    pub async fn keys(&self) -> Vec<K> {
        self.inner.read().await.snapshot_keys()
    }

    /// Owned copies of the values in map order.
    pub async fn values(&self) -> Vec<V> {
        self.inner.read().await.snapshot_values()
    }

    // == RW methods

    /// Insert or update `k` to `v`, returning the value it replaced. An
    /// update keeps the key's position in the iteration order.
    pub async fn insert(&self, k: K, v: V) -> Option<V> {
        self.inner.write().await.insert(k, v)
    }

    /// Remove `k`, returning its value if it was present.
    pub async fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().await.remove(k)
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        self.inner.write().await.clear()
    }

    /// Insert every pair the iterator yields, in order, under one lock
    /// acquisition.
    pub async fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.write().await.extend(iter)
    }

    /// Stable sort of the iteration order by value. Without an ordering
    /// predicate this does nothing. See [`LockMap::sort`](super::LockMap::sort)
    /// for the predicate contract.
    pub async fn sort(&self, reverse: bool) {
        match self.cmp.as_deref() {
            Some(cmp) => self.inner.write().await.sort_by(reverse, cmp),
            None => tracing::trace!("sort on a map without an ordering predicate, ignored"),
        }
    }

    #[cfg(test)]
    pub(crate) async fn verify(&self) -> bool {
        self.inner.read().await.verify()
    }
}

impl<K, V> Default for LockMap<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for LockMap<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut inner = MapInner::with_capacity(lower);
        inner.extend(iter);
        LockMap {
            inner: RwLock::new(inner),
            cmp: None,
        }
    }
}
