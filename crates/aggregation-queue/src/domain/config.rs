//! Queue configuration from environment variables.

use crate::DEFAULT_HIGH_WATER_MARK;
use std::env;

/// Growth limits for an `AggregationQueue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Hard cap on bins, enforced by `try_insert` only. `None` = unbounded.
    pub max_bins: Option<usize>,

    /// Bin count above which `insert` logs a warning.
    pub high_water_mark: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_bins: None,
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
        }
    }
}

impl QueueConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AGG_QUEUE_MAX_BINS`: Bin cap for `try_insert` (default: unbounded)
    /// - `AGG_QUEUE_HIGH_WATER_MARK`: Warning threshold (default: 1024)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            max_bins: env::var("AGG_QUEUE_MAX_BINS")
                .ok()
                .and_then(|v| v.parse().ok()),

            high_water_mark: env::var("AGG_QUEUE_HIGH_WATER_MARK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HIGH_WATER_MARK),
        }
    }

    /// Unbounded configuration with a custom warning threshold.
    #[must_use]
    pub fn with_high_water_mark(high_water_mark: usize) -> Self {
        Self {
            max_bins: None,
            high_water_mark,
        }
    }

    /// Bounded configuration; the warning threshold follows the cap.
    #[must_use]
    pub fn bounded(max_bins: usize) -> Self {
        Self {
            max_bins: Some(max_bins),
            high_water_mark: max_bins,
        }
    }
}
