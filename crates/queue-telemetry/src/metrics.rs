//! Prometheus metrics for aggregation queues.
//!
//! Metric names follow `<prefix>_<metric>_<unit>`.
//!
//! ## Metric Types
//!
//! - **Counter**: values inserted, bins created, bins drained, inserts rejected
//! - **Gauge**: bins currently pending

use aggregation_queue::QueueObserver;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

use crate::{TelemetryConfig, TelemetryError};

/// Queue metrics registered in their own registry.
///
/// Implements `QueueObserver`; attach it with
/// `AggregationQueue::with_observer(Arc::new(metrics))`.
#[derive(Clone)]
pub struct QueueMetrics {
    registry: Registry,

    /// Values placed into bins
    pub values_inserted: IntCounter,

    /// Bins appended to the queue
    pub bins_created: IntCounter,

    /// Bins removed by poll or drain
    pub bins_drained: IntCounter,

    /// `try_insert` calls refused at capacity
    pub inserts_rejected: IntCounter,

    /// Bins currently queued
    pub bins_pending: IntGauge,
}

impl QueueMetrics {
    /// Create and register every queue metric.
    ///
    /// # Errors
    ///
    /// - `TelemetryError::MetricsInit` - invalid metric name or duplicate
    ///   registration
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let counter = |suffix: &str, help: &str| {
            IntCounter::new(config.metric_name(suffix), help)
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))
        };

        let metrics = Self {
            registry: Registry::new(),
            values_inserted: counter("values_inserted_total", "Values placed into bins")?,
            bins_created: counter("bins_created_total", "Bins appended to the queue")?,
            bins_drained: counter("bins_drained_total", "Bins removed from the queue")?,
            inserts_rejected: counter(
                "inserts_rejected_total",
                "Inserts refused because the queue was at capacity",
            )?,
            bins_pending: IntGauge::new(
                config.metric_name("bins_pending"),
                "Bins currently queued",
            )
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?,
        };

        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.values_inserted.clone()),
            Box::new(metrics.bins_created.clone()),
            Box::new(metrics.bins_drained.clone()),
            Box::new(metrics.inserts_rejected.clone()),
            Box::new(metrics.bins_pending.clone()),
        ];

        for collector in collectors {
            metrics
                .registry
                .register(collector)
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        }

        crate::log_event!(
            debug,
            "metrics",
            "Queue metrics registered",
            prefix = %config.metrics_prefix
        );

        Ok(metrics)
    }

    /// Encode all metrics as Prometheus text format.
    pub fn gather_text(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

impl QueueObserver for QueueMetrics {
    fn on_insert(&self, _bin_index: usize) {
        self.values_inserted.inc();
    }

    fn on_bin_created(&self, bins: usize) {
        self.bins_created.inc();
        self.bins_pending.set(i64::try_from(bins).unwrap_or(i64::MAX));
    }

    fn on_drain(&self, remaining: usize) {
        self.bins_drained.inc();
        self.bins_pending.set(i64::try_from(remaining).unwrap_or(i64::MAX));
    }

    fn on_rejected(&self) {
        self.inserts_rejected.inc();
    }
}
