//! # Inbound Port - AggregationApi
//!
//! Primary driving port. Producers call `insert`/`try_insert` once per
//! keyed update; the notifier calls `poll` (or checks `is_empty`) whenever
//! it is ready to deliver a round.

use crate::domain::{Bin, QueueError};

/// API of an aggregation queue.
///
/// # Example
///
/// ```rust
/// use aggregation_queue::{AggregationApi, AggregationQueue};
///
/// fn collect(queue: &mut impl AggregationApi<&'static str, f64>) {
///     queue.insert("temp", 21.5);
///     queue.insert("pressure", 1013.0);
///     queue.insert("temp", 21.7); // "temp" taken in bin 0, opens bin 1
/// }
///
/// let mut queue = AggregationQueue::new();
/// collect(&mut queue);
///
/// let first = queue.poll().unwrap();
/// assert_eq!(first.get(&"temp"), Some(&21.5));
/// assert_eq!(first.get(&"pressure"), Some(&1013.0));
///
/// let second = queue.poll().unwrap();
/// assert_eq!(second.get(&"temp"), Some(&21.7));
/// assert!(queue.is_empty());
/// ```
pub trait AggregationApi<K, V> {
    /// Places `value` in the oldest bin without a value for `key`, or in a
    /// newly appended bin. Never overwrites and never fails.
    fn insert(&mut self, key: K, value: V);

    /// Like `insert`, but refuses to open a bin beyond the configured cap.
    ///
    /// Returns the index of the receiving bin, 0 being the oldest.
    ///
    /// # Errors
    /// - `CapacityExceeded`: a new bin is needed and the queue is full
    fn try_insert(&mut self, key: K, value: V) -> Result<usize, QueueError>;

    /// Returns true if no bins are queued.
    fn is_empty(&self) -> bool;

    /// Removes and returns the oldest bin. `None` means nothing to deliver.
    fn poll(&mut self) -> Option<Bin<K, V>>;

    /// Returns the number of queued bins.
    fn len(&self) -> usize;
}
