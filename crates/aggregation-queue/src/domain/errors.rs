//! Aggregation queue error types.
//!
//! `insert`, `is_empty` and `poll` never fail. Errors only come from the
//! opt-in capacity check and from delivering bins to a sink.

use thiserror::Error;

/// Errors from queue operations that can be refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Placing the value would need a new bin beyond the configured cap.
    #[error("Queue holds {max_bins} bins and the value needs a new one")]
    CapacityExceeded { max_bins: usize },

    /// The sink refused a drained bin. The bin was put back at the head.
    #[error("Bin delivery failed: {0}")]
    Sink(#[from] SinkError),
}

/// Errors reported by a `BinSink`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The receiving side is gone.
    #[error("Sink closed")]
    Closed,

    /// The sink rejected the bin for its own reasons.
    #[error("Sink rejected bin: {0}")]
    Rejected(String),
}
