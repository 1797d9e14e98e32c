//! # Aggregation Queue
//!
//! Collects keyed updates that arrive piecemeal (telemetry channel values
//! keyed by source identifier, for example) into batches called *bins*, so
//! that a downstream notifier can deliver one bin per round without ever
//! dropping a value that has not been consumed yet.
//!
//! ## Placement and Consumption
//!
//! ```text
//!  insert("x",1) insert("y",2) insert("x",3)
//!        │             │             │
//!        ▼             ▼             ▼  (bin 0 already has "x")
//!  ┌──────────────────────────┐ ┌──────────────┐
//!  │ bin 0: { x: 1, y: 2 }    │ │ bin 1: {x: 3}│   ◄── appended
//!  └──────────────────────────┘ └──────────────┘
//!        │
//!        └── poll() ──► oldest bin first (FIFO)
//! ```
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | No value is overwritten | `domain/queue.rs` - `free_bin_index()` |
//! | First-fit, not best-fit | `domain/queue.rs` - oldest-to-newest scan |
//! | Bins drain strictly FIFO | `domain/queue.rs` - `VecDeque::pop_front` |
//! | Shared use is atomic | `adapters/shared.rs` - single mutex |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! adapters/  - SharedAggregationQueue (locked handle), ChannelSink
//! ports/     - AggregationApi (inbound), BinSink + QueueObserver (outbound)
//! domain/    - Bin, AggregationQueue, QueueConfig, QueueError
//! ```
//!
//! ## Growth
//!
//! The queue is unbounded by default. A caller that keeps inserting the same
//! key without draining grows the queue by one bin per insert; drain at a
//! rate that keeps memory in check, or set `QueueConfig::max_bins` and use
//! `try_insert`.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{ChannelSink, SharedAggregationQueue};
pub use domain::{AggregationQueue, Bin, QueueConfig, QueueError, SinkError};
pub use ports::{AggregationApi, BinSink, DeliveryFailure, NoopObserver, QueueObserver};

/// Bin count above which `insert` starts warning, unless configured.
pub const DEFAULT_HIGH_WATER_MARK: usize = 1024;
