//! Ports layer for the aggregation queue.
//!
//! - Inbound (Driving) ports: the queue API exposed to producers and consumers
//! - Outbound (Driven) ports: where drained bins and notifications go

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
