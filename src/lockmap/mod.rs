//! LockMap - A lock guarded, insertion ordered, concurrently usable map
//!
//! This is a map for straightforward sharing between threads. A
//! [RwLock](parking_lot::RwLock) guards the content, point reads share the
//! lock, mutations take it exclusively, and *no* operation holds the lock
//! beyond its own return. Iteration hands you an owned snapshot, so a slow
//! consumer never stalls writers and a consumer that calls back into the map
//! never deadlocks on its own lock.
//!
//! Unlike a bare hashmap, entries remember their insertion order. `first`
//! returns the oldest surviving entry, and when the map was built with an
//! ordering predicate, [`sort`](LockMap::sort) rearranges the iteration
//! order by value.
//!
//! If you need to iterate without blocking an async executor, see the
//! [asynch] variant.

#[cfg(feature = "asynch")]
pub mod asynch;

mod iter;
pub use self::iter::{Iter, KeyIter, ValueIter};

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;
use tracing::trace;

use crate::internals::lockmap::MapInner;
use crate::SortFn;

/// A lock guarded, insertion ordered map.
///
/// All operations take `&self`. Share it between threads in an
/// [`Arc`](std::sync::Arc), or with scoped threads share the reference
/// directly.
///
/// ```
/// use lockcoll::LockMap;
///
/// let map: LockMap<String, usize> = LockMap::new();
/// map.insert("a".to_string(), 1);
/// assert_eq!(map.get("a"), Some(1));
/// assert_eq!(map.first(), Some(("a".to_string(), 1)));
/// ```
pub struct LockMap<K, V> {
    inner: RwLock<MapInner<K, V>>,
    // Lives outside the lock. It is only ever read while the write guard is
    // held in sort, and never mutated after construction.
    cmp: Option<Box<SortFn<V>>>,
}

impl<K, V> LockMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new empty map with no ordering predicate. [`sort`](Self::sort)
    /// on such a map is a no-op.
    pub fn new() -> Self {
        LockMap {
            inner: RwLock::new(MapInner::new()),
            cmp: None,
        }
    }

    /// Create a new empty map that sorts with `cmp`.
    ///
    /// `cmp(a, b, reverse)` must return true when `a` sorts before `b` under
    /// the requested direction.
    ///
    /// ```
    /// use lockcoll::LockMap;
    ///
    /// let map = LockMap::with_ordering(|a: &i32, b: &i32, reverse| {
    ///     if reverse { a > b } else { a < b }
    /// });
    /// map.insert("x", 30);
    /// map.insert("y", 10);
    /// map.insert("z", 20);
    ///
    /// map.sort(false);
    /// assert_eq!(map.values().collect::<Vec<i32>>(), vec![10, 20, 30]);
    /// map.sort(true);
    /// assert_eq!(map.values().collect::<Vec<i32>>(), vec![30, 20, 10]);
    /// ```
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
    pub fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().get(k).cloned()
    }

    /// True if `k` is present.
    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains_key(k)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A clone of the entry at the head of the iteration order, or `None` on
    /// an empty map. Until a sort rearranges the order this is the oldest
    /// surviving insertion, not a minimum by any ordering.
    pub fn first(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .first()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Iterate a snapshot of the entries in map order. The lock is released
    /// before this returns, mutations made after the call are not visible to
    /// the iterator.
    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(self.inner.read().snapshot())
    }

    /// Iterate a snapshot of the keys in map order.
    pub fn keys(&self) -> KeyIter<K> {
        KeyIter::new(self.inner.read().snapshot_keys())
    }

    /// Iterate a snapshot of the values in map order.
    pub fn values(&self) -> ValueIter<V> {
        ValueIter::new(self.inner.read().snapshot_values())
    }

    // == RW methods

    /// Insert or update `k` to `v`, returning the value it replaced. An
    /// update keeps the key's position in the iteration order.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.inner.write().insert(k, v)
    }

    /// Remove `k`, returning its value if it was present.
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(k)
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Insert every pair the iterator yields, in order, under one lock
    /// acquisition.
    pub fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.write().extend(iter)
    }

    /// Stable sort of the iteration order by value, using the predicate the
    /// map was constructed with. `reverse` is forwarded to the predicate.
    /// Without a predicate this does nothing.
    ///
    /// The predicate runs with the write lock held. It must not touch this
    /// map, and it should not block.
    ///
    /// If the predicate panics the map stays valid and keeps every entry,
    /// though the iteration order it is left in is unspecified.
    pub fn sort(&self, reverse: bool) {
        match self.cmp.as_deref() {
            Some(cmp) => self.inner.write().sort_by(reverse, cmp),
            None => trace!("sort on a map without an ordering predicate, ignored"),
        }
    }

    #[cfg(test)]
    pub(crate) fn verify(&self) -> bool {
        self.inner.read().verify()
    }
}

impl<K, V> Default for LockMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for LockMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Collect pairs into a new map with no ordering predicate. To build a
    /// sortable map, start from [`LockMap::with_ordering`] and `extend` it.
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

impl<K, V> fmt::Debug for LockMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("LockMap");
        match self.inner.try_read() {
            Some(inner) => ds.field("inner", &&*inner),
            None => {
                struct LockedPlaceholder;
                impl fmt::Debug for LockedPlaceholder {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("<locked>")
                    }
                }
                ds.field("inner", &LockedPlaceholder)
            }
        };
        ds.field("ordered", &self.cmp.is_some());
        ds.finish()
    }
}
