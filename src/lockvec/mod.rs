//! LockVec - A lock guarded, concurrently usable vec
//!
//! A growable sequence for straightforward sharing between threads, guarded
//! by a [RwLock](parking_lot::RwLock) the same way as
//! [`LockMap`](crate::LockMap). Reads share the lock, mutations exclude, and
//! the lock is always released before anything is handed back, so iterating
//! and mutating from the same thread can not deadlock.
//!
//! Positional access is fallible by construction. There is no way to ask
//! this type to panic on a bad index: you get an [`OutOfBounds`] value
//! carrying the index and the length that rejected it, which makes racing
//! against concurrent removals an ordinary, recoverable situation. Removal
//! by value resolves "not present" as `None` before any index arithmetic
//! happens.
//!
//! If you are on an async executor, see the [asynch] variant.

#[cfg(feature = "asynch")]
pub mod asynch;

use std::fmt;
use std::iter::FusedIterator;

use parking_lot::RwLock;

use crate::internals::lockvec::VecInner;
use crate::OutOfBounds;

/// A lock guarded, growable sequence.
///
/// All operations take `&self`. Share it between threads in an
/// [`Arc`](std::sync::Arc), or with scoped threads share the reference
/// directly.
///
/// ```
/// use lockcoll::LockVec;
///
/// let v: LockVec<usize> = LockVec::new();
/// v.push(10);
/// v.push(20);
/// assert_eq!(v.get(1), Ok(20));
/// assert!(v.get(2).is_err());
/// assert_eq!(v.remove_item(&10), Some(10));
/// ```
pub struct LockVec<T> {
    inner: RwLock<VecInner<T>>,
}

impl<T> LockVec<T>
where
    T: Clone,
{
    /// Create a new empty sequence.
    pub fn new() -> Self {
        LockVec {
            inner: RwLock::new(VecInner::new()),
        }
    }

    /// Create a new empty sequence with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        LockVec {
            inner: RwLock::new(VecInner::with_capacity(capacity)),
        }
    }

    /// Create a sequence of `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        LockVec {
            inner: RwLock::new(VecInner::with_len(len)),
        }
    }

    // == RO methods

    /// Retrieve a clone of the element at `index`. An out of range index is
    /// an `Err`, never a panic, so a stale index from a racing reader is a
    /// recoverable condition.
    pub fn get(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.read().get(index).cloned()
    }

    /// True if some element equals `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.inner.read().contains(item)
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate a snapshot of the elements with their positions. The lock is
    /// released before this returns, mutations made after the call are not
    /// visible to the iterator.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.inner.read().snapshot())
    }

    /// An owned copy of the whole sequence. The copy is yours alone, later
    /// mutations of the shared sequence do not show through it.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }

    // == RW methods

    /// Append an element.
    pub fn push(&self, item: T) {
        self.inner.write().push(item)
    }

    /// Remove and return the first element equal to `item`, or `None` if no
    /// element matches. The search and the removal happen in one critical
    /// section, so a match can not be removed out from under this call.
    pub fn remove_item(&self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.inner.write().remove_item(item)
    }

    /// Remove and return the element at `index`, shifting everything after
    /// it left. An out of range index is an `Err`, never a panic.
    pub fn remove(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.write().remove(index)
    }

    /// Remove and return the element at `index`, moving the last element
    /// into its place. Faster than [`remove`](Self::remove) when order does
    /// not matter.
    pub fn swap_remove(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.write().swap_remove(index)
    }

    /// Remove all elements.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Append every element the iterator yields, in order, under one lock
    /// acquisition.
    pub fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().extend(iter)
    }
}

impl<T> Default for LockVec<T>
where
    T: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LockVec<T>
where
    T: Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut inner = VecInner::with_capacity(lower);
        inner.extend(iter);
        LockVec {
            inner: RwLock::new(inner),
        }
    }
}

impl<T> fmt::Debug for LockVec<T>
where
    T: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("LockVec");
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
        ds.finish()
    }
}

/// Owning iterator over a snapshot of the elements, yielding each with the
/// position it held when the snapshot was taken.
pub struct Iter<T> {
    inner: std::vec::IntoIter<(usize, T)>,
}

impl<T> Iter<T> {
    pub(crate) fn new(snapshot: Vec<(usize, T)>) -> Self {
        Iter {
            inner: snapshot.into_iter(),
        }
    }
}

impl<T> Iterator for Iter<T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<(usize, T)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<T> {
    fn next_back(&mut self) -> Option<(usize, T)> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<T> {}

impl<T> FusedIterator for Iter<T> {}
