//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for queue logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log records
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or full directive
    pub log_level: String,

    /// Whether to write log records to stdout
    pub console_output: bool,

    /// Whether to format log records as JSON
    pub json_logs: bool,

    /// Prefix for every metric name
    pub metrics_prefix: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "aggregation-queue".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_prefix: "agg_queue".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: aggregation-queue)
    /// - `AGG_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `AGG_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `AGG_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `AGG_METRICS_PREFIX`: Metric name prefix (default: agg_queue)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "aggregation-queue".to_string()),

            log_level: env::var("AGG_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("AGG_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("AGG_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            metrics_prefix: env::var("AGG_METRICS_PREFIX")
                .unwrap_or_else(|_| "agg_queue".to_string()),
        }
    }

    /// Configuration for a named queue; metrics get the queue name as suffix.
    pub fn for_queue(queue_name: &str) -> Self {
        let mut config = Self::from_env();
        config.metrics_prefix = format!("{}_{}", config.metrics_prefix, queue_name);
        config
    }

    /// Full metric name for `suffix` under this prefix.
    pub fn metric_name(&self, suffix: &str) -> String {
        if self.metrics_prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.metrics_prefix, suffix)
        }
    }
}
