//! The unguarded state behind [`LockVec`](crate::lockvec::LockVec).
//!
//! Index arithmetic happens here and nowhere else. Every positional operation
//! checks the bound first and reports [`OutOfBounds`] instead of panicking,
//! and the value search resolves "not present" as `None` before any index is
//! formed, so no sentinel position ever reaches the backing vec.

use crate::OutOfBounds;

#[derive(Debug)]
pub(crate) struct VecInner<T> {
    items: Vec<T>,
}

impl<T> VecInner<T> {
    pub(crate) fn new() -> Self {
        VecInner { items: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        VecInner {
            items: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        VecInner {
            items: std::iter::repeat_with(T::default).take(len).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub(crate) fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        self.items.get(index).ok_or(OutOfBounds {
            index,
            len: self.items.len(),
        })
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        if index < self.items.len() {
            Ok(self.items.remove(index))
        } else {
            Err(OutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    pub(crate) fn swap_remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        if index < self.items.len() {
            Ok(self.items.swap_remove(index))
        } else {
            Err(OutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Remove the first element equal to `item`. The search and the shift
    /// happen under the one borrow, there is no separate lookup step for a
    /// caller to get wrong.
    pub(crate) fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.items.iter().position(|x| x == item)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub(crate) fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(iter);
    }

    /// Owned, enumerated copies of the elements. Iterator and stream
    /// snapshots both come from here.
    pub(crate) fn snapshot(&self) -> Vec<(usize, T)>
    where
        T: Clone,
    {
        self.items.iter().cloned().enumerate().collect()
    }

    pub(crate) fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}
