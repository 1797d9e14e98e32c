//! Adapters layer for the aggregation queue.
//!
//! - `shared`: mutex-guarded handle for multi-producer / consumer use
//! - `channel`: `BinSink` that forwards drained bins over a tokio channel

pub mod channel;
pub mod shared;

pub use channel::ChannelSink;
pub use shared::SharedAggregationQueue;
