//! # Aggregation Queue - First-Fit Placement and FIFO Drain
//!
//! ## Data Structures
//!
//! - `bins`: `VecDeque` of bins, oldest at the front
//!
//! ## Invariants Enforced
//!
//! - No overwrite: a value only lands in a bin that lacks its key
//! - First-fit: the oldest such bin wins; a new bin is appended otherwise
//! - FIFO: bins leave from the front only, so the sequence stays contiguous
//!
//! Placement scans every bin, which is O(bins) per insert. The bin count is
//! bounded by the highest repetition count of any one key inside the
//! undrained window, so the scan stays short in practice.

use super::bin::Bin;
use super::config::QueueConfig;
use super::errors::QueueError;
use crate::ports::{AggregationApi, BinSink, NoopObserver, QueueObserver};
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Ordered sequence of bins that never overwrites an unconsumed value.
///
/// Not synchronised; wrap it in `SharedAggregationQueue` for shared use.
pub struct AggregationQueue<K, V> {
    /// Bins, oldest first.
    bins: VecDeque<Bin<K, V>>,

    /// Growth limits.
    config: QueueConfig,

    /// Receives placement and drain notifications.
    observer: Arc<dyn QueueObserver>,
}

impl<K: Eq + Hash, V> AggregationQueue<K, V> {
    /// Creates an empty, unbounded queue.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates an empty queue with the given limits.
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            bins: VecDeque::new(),
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attaches an observer (metrics, auditing) to this queue.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn QueueObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Returns the number of queued bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if no bins are queued.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the number of values held across all bins.
    pub fn value_count(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Borrows the oldest bin without draining it.
    pub fn peek(&self) -> Option<&Bin<K, V>> {
        self.bins.front()
    }

    /// Places `value` under `key` in the oldest bin that lacks `key`,
    /// appending a new bin if every bin already has one.
    ///
    /// Always succeeds, ignoring `max_bins`.
    pub fn insert(&mut self, key: K, value: V) {
        let index = match self.free_bin_index(&key) {
            Some(index) => index,
            None => self.open_bin(),
        };
        self.place(index, key, value);
    }

    /// Like `insert`, but refuses to grow past `QueueConfig::max_bins`.
    ///
    /// Returns the index (0 = oldest) of the bin that received the value.
    ///
    /// # Errors
    ///
    /// - `QueueError::CapacityExceeded` - every bin holds `key` and the queue
    ///   is at its cap. The queue is left unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<usize, QueueError> {
        let index = match self.free_bin_index(&key) {
            Some(index) => index,
            None => {
                if let Some(max_bins) = self.config.max_bins {
                    if self.bins.len() >= max_bins {
                        self.observer.on_rejected();
                        debug!(max_bins, "Insert rejected, queue at capacity");
                        return Err(QueueError::CapacityExceeded { max_bins });
                    }
                }
                self.open_bin()
            }
        };
        self.place(index, key, value);
        Ok(index)
    }

    /// Removes and returns the oldest bin, or `None` if the queue is empty.
    pub fn poll(&mut self) -> Option<Bin<K, V>> {
        let bin = self.bins.pop_front()?;
        self.observer.on_drain(self.bins.len());
        debug!(
            keys = bin.len(),
            remaining = self.bins.len(),
            "Bin drained"
        );
        Some(bin)
    }

    /// Drains every queued bin, oldest first, into `sink`.
    ///
    /// Returns the number of bins delivered.
    ///
    /// # Errors
    ///
    /// - `QueueError::Sink` - the sink refused a bin. That bin goes back to
    ///   the head of the queue and later bins stay queued.
    pub fn drain_into<S>(&mut self, sink: &mut S) -> Result<usize, QueueError>
    where
        S: BinSink<K, V> + ?Sized,
    {
        let mut delivered = 0;
        while let Some(bin) = self.bins.pop_front() {
            if let Err(failure) = sink.deliver(bin) {
                self.bins.push_front(failure.bin);
                warn!(
                    delivered,
                    pending = self.bins.len(),
                    error = %failure.error,
                    "Bin delivery failed, bin requeued"
                );
                return Err(QueueError::Sink(failure.error));
            }
            delivered += 1;
            self.observer.on_drain(self.bins.len());
        }
        if delivered > 0 {
            debug!(delivered, "Queue drained");
        }
        Ok(delivered)
    }

    /// Index of the oldest bin without a value for `key`.
    fn free_bin_index(&self, key: &K) -> Option<usize> {
        self.bins.iter().position(|bin| !bin.contains_key(key))
    }

    /// Appends an empty bin and returns its index.
    fn open_bin(&mut self) -> usize {
        self.bins.push_back(Bin::new());
        let bins = self.bins.len();
        self.observer.on_bin_created(bins);

        if bins == self.config.high_water_mark.saturating_add(1) {
            warn!(
                bins,
                high_water_mark = self.config.high_water_mark,
                "Aggregation queue above high-water mark, consumer is falling behind"
            );
        } else {
            debug!(bins, "Bin opened");
        }
        bins - 1
    }

    fn place(&mut self, index: usize, key: K, value: V) {
        self.bins[index].place(key, value);
        self.observer.on_insert(index);
        trace!(bin = index, "Value placed");
    }
}

impl<K: Eq + Hash, V> Default for AggregationQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AggregationQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregationQueue")
            .field("bins", &self.bins)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<K: Eq + Hash, V> AggregationApi<K, V> for AggregationQueue<K, V> {
    fn insert(&mut self, key: K, value: V) {
        AggregationQueue::insert(self, key, value);
    }

    fn try_insert(&mut self, key: K, value: V) -> Result<usize, QueueError> {
        AggregationQueue::try_insert(self, key, value)
    }

    fn is_empty(&self) -> bool {
        AggregationQueue::is_empty(self)
    }

    fn poll(&mut self) -> Option<Bin<K, V>> {
        AggregationQueue::poll(self)
    }

    fn len(&self) -> usize {
        AggregationQueue::len(self)
    }
}
