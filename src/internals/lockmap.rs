//! The unguarded state behind [`LockMap`](crate::lockmap::LockMap).
//!
//! A hashmap alone cannot give `sort` or `first` any observable meaning, so
//! the state is a pair: the hashmap that answers point queries, and an ordered
//! key list that defines iteration order. Keys enter the list on first insert
//! and leave it on remove, so iteration follows insertion order until a sort
//! rearranges it.
//!
//! Invariant: the key list holds every key of the map exactly once.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "foldhash")]
use foldhash::fast::RandomState;

#[cfg(all(feature = "ahash", not(feature = "foldhash")))]
use ahash::RandomState;

#[cfg(all(not(feature = "ahash"), not(feature = "foldhash")))]
use std::collections::hash_map::RandomState;

use crate::SortFn;

#[derive(Debug)]
pub(crate) struct MapInner<K, V> {
    map: HashMap<K, V, RandomState>,
    order: Vec<K>,
}

impl<K, V> MapInner<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub(crate) fn new() -> Self {
        MapInner {
            map: HashMap::default(),
            order: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        MapInner {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
            order: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        debug_assert_eq!(self.map.len(), self.order.len());
        self.map.len()
    }

    pub(crate) fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(k)
    }

    pub(crate) fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(k)
    }

    /// Insert or update `k`. A key not currently present joins the tail of
    /// the order list, updating a live key never moves it.
    pub(crate) fn insert(&mut self, k: K, v: V) -> Option<V> {
        match self.map.entry(k) {
            Entry::Occupied(mut e) => Some(e.insert(v)),
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(v);
                None
            }
        }
    }

    pub(crate) fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let prev = self.map.remove(k)?;
        if let Some(idx) = self.order.iter().position(|ok| ok.borrow() == k) {
            self.order.remove(idx);
        }
        debug_assert_eq!(self.map.len(), self.order.len());
        Some(prev)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    /// The entry at the head of the order list. With no sort applied this is
    /// the oldest surviving insertion.
    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        let k = self.order.first()?;
        let v = self.map.get(k)?;
        Some((k, v))
    }

    /// Owned copies of all entries, in order. This is the single point every
    /// iterator and stream snapshots from.
    pub(crate) fn snapshot(&self) -> Vec<(K, V)> {
        self.order
            .iter()
            .filter_map(|k| self.map.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    pub(crate) fn snapshot_keys(&self) -> Vec<K> {
        self.order.clone()
    }

    pub(crate) fn snapshot_values(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|k| self.map.get(k).cloned())
            .collect()
    }

    /// Stable sort of the iteration order by value. The hashmap itself is
    /// untouched, only the order list is rebuilt, so a panicking comparator
    /// can not lose entries.
    ///
    /// `less(a, b, reverse)` returning true means `a` sorts before `b`. The
    /// comparator is consulted both ways to recover a full `Ordering`, ties
    /// keep their current relative positions.
    pub(crate) fn sort_by(&mut self, reverse: bool, less: &SortFn<V>) {
        let mut entries = self.snapshot();
        entries.sort_by(|(_, a), (_, b)| {
            if less(a, b, reverse) {
                Ordering::Less
            } else if less(b, a, reverse) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        self.order.clear();
        self.order.extend(entries.into_iter().map(|(k, _)| k));
        debug_assert_eq!(self.map.len(), self.order.len());
    }

    pub(crate) fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }

    #[cfg(test)]
    pub(crate) fn verify(&self) -> bool {
        if self.map.len() != self.order.len() {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(self.order.len());
        self.order
            .iter()
            .all(|k| self.map.contains_key(k) && seen.insert(k))
    }
}
