//! LockVec - A lock guarded, concurrently usable vec - async!
//!
//! The same structure as [`LockVec`](super::LockVec), guarded by a
//! [tokio RwLock](tokio::sync::RwLock). Iteration returns a
//! [`SnapshotStream`] whose channel is sized to the whole snapshot: the
//! producer unloads everything without ever parking, so the stream is fully
//! buffered almost immediately and consuming it never waits on the producer.

use tokio::sync::RwLock;

use crate::internals::lockvec::VecInner;
use crate::stream::SnapshotStream;
use crate::OutOfBounds;

/// A lock guarded, growable sequence for async code.
///
/// All operations take `&self`. Share it between tasks in an
/// [`Arc`](std::sync::Arc).
pub struct LockVec<T> {
    inner: RwLock<VecInner<T>>,
}

impl<T> LockVec<T>
where
    T: Clone + Send + Sync + 'static,
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
    /// an `Err`, never a panic.
    pub async fn get(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.read().await.get(index).cloned()
    }

    /// True if some element equals `item`.
    pub async fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.inner.read().await.contains(item)
    }

    /// The number of elements.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True if there are no elements.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stream a snapshot of the elements with their positions.
    ///
    /// The read lock is held only while the snapshot is captured, never by
    /// the returned stream. The channel is sized to the snapshot, so the
    /// producer finishes on its own even if the stream is never polled.
    pub async fn iter(&self) -> SnapshotStream<(usize, T)> {
        let snapshot = self.inner.read().await.snapshot();
        let capacity = snapshot.len();
        SnapshotStream::spawn(snapshot, capacity)
    }

    /// An owned copy of the whole sequence.
    pub async fn to_vec(&self) -> Vec<T> {
        self.inner.read().await.to_vec()
    }

    // == RW methods

    /// Append an element.
    pub async fn push(&self, item: T) {
        self.inner.write().await.push(item)
    }

    /// Remove and return the first element equal to `item`, or `None` if no
    /// element matches. One critical section covers the search and the
    /// removal.
    pub async fn remove_item(&self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.inner.write().await.remove_item(item)
    }

    /// Remove and return the element at `index`, shifting everything after
    /// it left. An out of range index is an `Err`, never a panic.
    pub async fn remove(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.write().await.remove(index)
    }

    /// Remove and return the element at `index`, moving the last element
    /// into its place.
    pub async fn swap_remove(&self, index: usize) -> Result<T, OutOfBounds> {
        self.inner.write().await.swap_remove(index)
    }

    /// Remove all elements.
    pub async fn clear(&self) {
        self.inner.write().await.clear()
    }

    /// Append every element the iterator yields, in order, under one lock
    /// acquisition.
    pub async fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().await.extend(iter)
    }
}

impl<T> Default for LockVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LockVec<T>
where
    T: Clone + Send + Sync + 'static,
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

#[cfg(test)]
mod tests {
    use super::LockVec;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_lockvec_async_basic_write() {
        let vec: LockVec<usize> = LockVec::new();
        assert!(vec.is_empty().await);
        for i in 0..10 {
            vec.push(i * 10).await;
        }
        assert_eq!(vec.len().await, 10);
        assert_eq!(vec.get(4).await, Ok(40));
        let err = vec.get(10).await.unwrap_err();
        assert_eq!(err.index, 10);
        assert_eq!(err.len, 10);
        assert!(vec.contains(&90).await);
        assert_eq!(vec.remove_item(&90).await, Some(90));
        assert_eq!(vec.remove_item(&90).await, None);
        assert_eq!(vec.remove(0).await, Ok(0));
        vec.clear().await;
        assert!(vec.is_empty().await);
    }

    #[tokio::test]
    async fn test_lockvec_async_iter_stream() {
        let vec: LockVec<usize> = [5, 6, 7].into_iter().collect();
        let mut stream = vec.iter().await;
        let mut pairs = Vec::new();
        while let Some(pair) = stream.next().await {
            pairs.push(pair);
        }
        assert_eq!(pairs, vec![(0, 5), (1, 6), (2, 7)]);
    }

    #[tokio::test]
    async fn test_lockvec_async_iter_releases_lock() {
        let vec: LockVec<usize> = (0..50).collect();
        let mut stream = vec.iter().await;
        assert_eq!(stream.next().await, Some((0, 0)));

        // Writes must go through while the stream is alive.
        let pushed = tokio::time::timeout(Duration::from_secs(5), vec.push(999)).await;
        assert!(pushed.is_ok(), "push blocked behind a live stream");

        // The stream sees only its snapshot.
        let mut last = 0;
        while let Some((i, _)) = stream.next().await {
            last = i;
        }
        assert_eq!(last, 49);
        assert_eq!(vec.len().await, 51);
    }

    #[tokio::test]
    async fn test_lockvec_async_abandoned_stream() {
        let vec: LockVec<usize> = (0..64).collect();
        {
            let mut stream = vec.iter().await;
            assert!(stream.next().await.is_some());
        }
        let usable = tokio::time::timeout(Duration::from_secs(5), async {
            vec.push(64).await;
            vec.len().await
        })
        .await;
        assert_eq!(usable.expect("vec unusable after abandoned stream"), 65);
    }

    #[tokio::test]
    async fn test_lockvec_async_multitask() {
        let vec: Arc<LockVec<usize>> = Arc::new(LockVec::new());
        let wr_a = vec.clone();
        let wr_b = vec.clone();
        let h_a = tokio::task::spawn(async move {
            for i in 0..100 {
                wr_a.push(i).await;
            }
        });
        let h_b = tokio::task::spawn(async move {
            for i in 100..200 {
                wr_b.push(i).await;
            }
        });
        let (r_a, r_b) = tokio::join!(h_a, h_b);
        r_a.unwrap();
        r_b.unwrap();
        assert_eq!(vec.len().await, 200);
        let mut all = vec.to_vec().await;
        all.sort_unstable();
        assert_eq!(all, (0..200).collect::<Vec<_>>());
    }
}
