//! Iterators over point in time snapshots of a [`LockMap`](super::LockMap).
//!
//! Each iterator owns the data it yields. The lock that produced the
//! snapshot was released before the iterator was returned, so holding one
//! of these across arbitrary work, or calling back into the source map from
//! inside the loop, is fine.

use std::iter::FusedIterator;

/// Owning iterator over a snapshot of the entries, in map order.
pub struct Iter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iter<K, V> {
    pub(crate) fn new(snapshot: Vec<(K, V)>) -> Self {
        Iter {
            inner: snapshot.into_iter(),
        }
    }
}

impl<K, V> Iterator for Iter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<K, V> {}

impl<K, V> FusedIterator for Iter<K, V> {}

/// Owning iterator over a snapshot of the keys, in map order.
pub struct KeyIter<K> {
    inner: std::vec::IntoIter<K>,
}

impl<K> KeyIter<K> {
    pub(crate) fn new(snapshot: Vec<K>) -> Self {
        KeyIter {
            inner: snapshot.into_iter(),
        }
    }
}

impl<K> Iterator for KeyIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for KeyIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for KeyIter<K> {}

impl<K> FusedIterator for KeyIter<K> {}

/// Owning iterator over a snapshot of the values, in map order.
pub struct ValueIter<V> {
    inner: std::vec::IntoIter<V>,
}

impl<V> ValueIter<V> {
    pub(crate) fn new(snapshot: Vec<V>) -> Self {
        ValueIter {
            inner: snapshot.into_iter(),
        }
    }
}

impl<V> Iterator for ValueIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for ValueIter<V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for ValueIter<V> {}

impl<V> FusedIterator for ValueIter<V> {}
