//! # Domain Layer - Aggregation Queue
//!
//! Pure data structuring: no I/O, no scheduling, no interior locking.
//!
//! - `bin`: `Bin`, a collision-free key → value map for one round
//! - `queue`: `AggregationQueue`, first-fit placement and FIFO drain
//! - `config`: `QueueConfig`, growth limits
//! - `errors`: `QueueError`, `SinkError`

pub mod bin;
pub mod config;
pub mod errors;
pub mod queue;

pub use bin::Bin;
pub use config::QueueConfig;
pub use errors::{QueueError, SinkError};
pub use queue::AggregationQueue;
