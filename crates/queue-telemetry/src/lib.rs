//! # Queue Telemetry
//!
//! Observability for aggregation queues.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env filter, JSON or pretty output
//! - **Metrics**: per-queue Prometheus registry fed through `QueueObserver`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aggregation_queue::AggregationQueue;
//! use queue_telemetry::{init_telemetry, TelemetryConfig};
//! use std::sync::Arc;
//!
//! let config = TelemetryConfig::from_env();
//! let metrics = init_telemetry(&config).expect("Failed to init telemetry");
//!
//! let mut queue: AggregationQueue<String, f64> =
//!     AggregationQueue::new().with_observer(Arc::new(metrics.clone()));
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `aggregation-queue` | Service name in logs |
//! | `AGG_LOG_LEVEL` | `info` | Log level filter |
//! | `AGG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `AGG_JSON_LOGS` | `false` | JSON log records |
//! | `AGG_METRICS_PREFIX` | `agg_queue` | Metric name prefix |

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::QueueMetrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Install logging and create queue metrics in one step.
///
/// # Errors
///
/// Any error from `init_logging` or `QueueMetrics::new`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<QueueMetrics, TelemetryError> {
    // Metrics first so a bad prefix does not leave a subscriber behind
    let metrics = QueueMetrics::new(config)?;
    init_logging(config)?;
    Ok(metrics)
}
