//! # Shared Aggregation Queue
//!
//! `AggregationQueue` is not synchronised: `insert` scans and then mutates,
//! `poll` removes from the front, and neither is atomic with respect to the
//! other. This handle puts the whole queue behind one mutex so every
//! operation sees a consistent sequence.

use crate::domain::{AggregationQueue, Bin, QueueConfig, QueueError};
use crate::ports::{AggregationApi, BinSink};
use parking_lot::Mutex;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Cloneable, thread-safe handle to one `AggregationQueue`.
///
/// All clones share the same queue.
pub struct SharedAggregationQueue<K, V> {
    inner: Arc<Mutex<AggregationQueue<K, V>>>,
}

impl<K: Eq + Hash, V> SharedAggregationQueue<K, V> {
    /// Creates a handle to a new, unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::from_queue(AggregationQueue::new())
    }

    /// Creates a handle to a new queue with the given limits.
    #[must_use]
    pub fn with_config(config: QueueConfig) -> Self {
        Self::from_queue(AggregationQueue::with_config(config))
    }

    /// Wraps an existing queue.
    #[must_use]
    pub fn from_queue(queue: AggregationQueue<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// See `AggregationQueue::insert`.
    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    /// See `AggregationQueue::try_insert`.
    ///
    /// # Errors
    /// - `QueueError::CapacityExceeded` when the queue is at its cap
    pub fn try_insert(&self, key: K, value: V) -> Result<usize, QueueError> {
        self.inner.lock().try_insert(key, value)
    }

    /// See `AggregationQueue::poll`.
    pub fn poll(&self) -> Option<Bin<K, V>> {
        self.inner.lock().poll()
    }

    /// Returns true if no bins are queued.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the number of queued bins.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns the number of values held across all bins.
    pub fn value_count(&self) -> usize {
        self.inner.lock().value_count()
    }

    /// Drains every bin into `sink` while holding the lock, so producers
    /// cannot interleave with the drain.
    ///
    /// # Deadlocks
    ///
    /// `sink.deliver` and the queue's observer run with the lock held, and
    /// the lock is not reentrant. A sink that calls back into any clone of
    /// this handle blocks forever. Such sinks must be fed from a `poll`
    /// loop instead, which takes the lock once per bin.
    ///
    /// # Errors
    /// - `QueueError::Sink` when the sink refuses a bin (the bin is requeued)
    pub fn drain_into<S>(&self, sink: &mut S) -> Result<usize, QueueError>
    where
        S: BinSink<K, V> + ?Sized,
    {
        self.inner.lock().drain_into(sink)
    }
}

impl<K: Eq + Hash, V> Default for SharedAggregationQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for SharedAggregationQueue<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SharedAggregationQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedAggregationQueue")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

impl<K: Eq + Hash, V> AggregationApi<K, V> for SharedAggregationQueue<K, V> {
    fn insert(&mut self, key: K, value: V) {
        SharedAggregationQueue::insert(self, key, value);
    }

    fn try_insert(&mut self, key: K, value: V) -> Result<usize, QueueError> {
        SharedAggregationQueue::try_insert(self, key, value)
    }

    fn is_empty(&self) -> bool {
        SharedAggregationQueue::is_empty(self)
    }

    fn poll(&mut self) -> Option<Bin<K, V>> {
        SharedAggregationQueue::poll(self)
    }

    fn len(&self) -> usize {
        SharedAggregationQueue::len(self)
    }
}
