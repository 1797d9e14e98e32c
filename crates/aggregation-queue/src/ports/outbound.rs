//! Outbound (Driven) ports for the aggregation queue.
//!
//! `BinSink` receives drained bins; `QueueObserver` receives bookkeeping
//! notifications (metrics, audits). Both are implemented outside the domain.

use crate::domain::{Bin, SinkError};

/// A bin the sink could not take, handed back to the queue.
///
/// Mirrors `tokio::sync::mpsc::error::SendError`: ownership returns to the
/// caller so the bin is never lost.
#[derive(Debug)]
pub struct DeliveryFailure<K, V> {
    /// The undelivered bin.
    pub bin: Bin<K, V>,

    /// Why delivery failed.
    pub error: SinkError,
}

impl<K, V> DeliveryFailure<K, V> {
    /// Wraps an undelivered bin with its failure reason.
    pub fn new(bin: Bin<K, V>, error: SinkError) -> Self {
        Self { bin, error }
    }
}

/// Downstream consumer of drained bins.
pub trait BinSink<K, V> {
    /// Takes ownership of one drained bin.
    ///
    /// # Deadlocks
    ///
    /// `drain_into` calls this while the queue is borrowed, and
    /// `SharedAggregationQueue::drain_into` calls it with the queue's
    /// mutex held. Implementations must not call back into the queue that
    /// is draining them.
    ///
    /// # Errors
    /// Returns the bin with a `SinkError` if it cannot be accepted.
    fn deliver(&mut self, bin: Bin<K, V>) -> Result<(), DeliveryFailure<K, V>>;
}

/// Notifications about queue activity.
///
/// Every method defaults to a no-op. Callbacks run inside queue operations
/// (under the mutex for `SharedAggregationQueue`) and must not call back
/// into the queue.
pub trait QueueObserver: Send + Sync {
    /// A value was placed in the bin at `bin_index` (0 = oldest).
    fn on_insert(&self, _bin_index: usize) {}

    /// A bin was appended; `bins` is the new bin count.
    fn on_bin_created(&self, _bins: usize) {}

    /// A bin left the queue; `remaining` bins are still queued.
    fn on_drain(&self, _remaining: usize) {}

    /// `try_insert` refused a value because the queue was full.
    fn on_rejected(&self) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl QueueObserver for NoopObserver {}
