//! Channel backed delivery of container snapshots.
//!
//! The async containers iterate by capturing an owned snapshot under a read
//! lock, releasing the lock, then spawning a detached producer task that
//! feeds the snapshot through a bounded channel. The consumer side is a
//! [`SnapshotStream`]. Because the producer owns its data outright, no lock
//! is held at any point of the stream's life, and a consumer that stops
//! early costs nothing more than an aborted task.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// An in flight snapshot being delivered by a detached producer task.
///
/// Call [`next`](Self::next) until it returns `None`. Dropping the stream at
/// any point aborts the producer, so abandoning iteration midway is safe and
/// leaks nothing. The source container is fully usable, from any task or from
/// the consuming loop itself, while the stream is alive.
pub struct SnapshotStream<I> {
    rx: mpsc::Receiver<I>,
    producer: JoinHandle<()>,
}

impl<I> SnapshotStream<I>
where
    I: Send + 'static,
{
    /// Spawn a producer that feeds `items` through a channel of `capacity`
    /// slots (floored at one, a zero capacity channel can not exist).
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(items: Vec<I>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let producer = tokio::spawn(async move {
            for item in items {
                if tx.send(item).await.is_err() {
                    trace!("snapshot consumer went away, producer stopping");
                    return;
                }
            }
        });
        SnapshotStream { rx, producer }
    }
}

impl<I> SnapshotStream<I> {
    /// Receive the next snapshot item. `None` means the snapshot is
    /// exhausted, or the stream was [closed](Self::close) and the buffer has
    /// drained.
    pub async fn next(&mut self) -> Option<I> {
        self.rx.recv().await
    }

    /// Tell the producer to stop. Items already buffered in the channel can
    /// still be received, after that [`next`](Self::next) returns `None`.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

impl<I> Drop for SnapshotStream<I> {
    fn drop(&mut self) {
        self.producer.abort();
    }
}
