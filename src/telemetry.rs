//! Telemetry and observability utilities

use std::sync::Arc;

#[cfg(feature = "metrics")]
use opentelemetry::{
    metrics::{Counter, Histogram},
    KeyValue,
};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether telemetry is enabled
    pub enabled: bool,
    /// Service name for metrics
    pub service_name: String,
    /// Service version for metrics
    pub service_version: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: "flickr-reflect".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Client metrics collector
#[derive(Clone)]
pub struct Metrics {
    #[cfg(feature = "metrics")]
    pub(crate) requests_total: Counter<u64>,

    #[cfg(feature = "metrics")]
    pub(crate) request_duration: Histogram<f64>,

    #[cfg(feature = "metrics")]
    pub(crate) errors_total: Counter<u64>,

    #[cfg(feature = "metrics")]
    pub(crate) cache_hits: Counter<u64>,

    #[cfg(feature = "metrics")]
    pub(crate) cache_misses: Counter<u64>,

    #[cfg(feature = "metrics")]
    pub(crate) discovered_methods: Counter<u64>,

    #[cfg(feature = "metrics")]
    pub(crate) discovery_failures: Counter<u64>,
}

impl Metrics {
    /// Create new metrics instance
    #[cfg(feature = "metrics")]
    pub fn new(config: &TelemetryConfig) -> Self {
        use opentelemetry::global;

        let meter = global::meter(config.service_name.clone());

        let requests_total = meter
            .u64_counter("flickr_reflect.requests_total")
            .with_description("Total number of API calls made")
            .init();

        let request_duration = meter
            .f64_histogram("flickr_reflect.request_duration_seconds")
            .with_description("API call duration in seconds")
            .init();

        let errors_total = meter
            .u64_counter("flickr_reflect.errors_total")
            .with_description("Total number of failed API calls")
            .init();

        let cache_hits = meter
            .u64_counter("flickr_reflect.credential_cache_hits_total")
            .with_description("Credential reads served from memory")
            .init();

        let cache_misses = meter
            .u64_counter("flickr_reflect.credential_cache_misses_total")
            .with_description("Credential reads that went to the persisted tier")
            .init();

        let discovered_methods = meter
            .u64_counter("flickr_reflect.discovered_methods_total")
            .with_description("Methods added to a call surface")
            .init();

        let discovery_failures = meter
            .u64_counter("flickr_reflect.discovery_failures_total")
            .with_description("Methods that could not be described during discovery")
            .init();

        Self {
            requests_total,
            request_duration,
            errors_total,
            cache_hits,
            cache_misses,
            discovered_methods,
            discovery_failures,
        }
    }

    /// Create a no-op metrics instance when feature is disabled
    #[cfg(not(feature = "metrics"))]
    pub fn new(_config: &TelemetryConfig) -> Self {
        Self {}
    }

    /// Record one API call
    #[cfg(feature = "metrics")]
    pub fn record_request(&self, method: &str, error_kind: Option<&str>, duration_secs: f64) {
        let labels = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("outcome", error_kind.unwrap_or("ok").to_string()),
        ];

        self.requests_total.add(1, labels);
        self.request_duration.record(duration_secs, labels);

        if let Some(kind) = error_kind {
            self.errors_total
                .add(1, &[KeyValue::new("kind", kind.to_string())]);
        }
    }

    /// Record one API call (no-op when metrics disabled)
    #[cfg(not(feature = "metrics"))]
    pub fn record_request(&self, _method: &str, _error_kind: Option<&str>, _duration_secs: f64) {}

    /// Record a credential cache lookup
    #[cfg(feature = "metrics")]
    pub fn record_cache(&self, secret: &str, hit: bool) {
        let labels = &[KeyValue::new("secret", secret.to_string())];
        if hit {
            self.cache_hits.add(1, labels);
        } else {
            self.cache_misses.add(1, labels);
        }
    }

    /// Record a credential cache lookup (no-op)
    #[cfg(not(feature = "metrics"))]
    pub fn record_cache(&self, _secret: &str, _hit: bool) {}

    /// Record the outcome of a discovery run
    #[cfg(feature = "metrics")]
    pub fn record_discovery(&self, resolved: u64, failed: u64) {
        self.discovered_methods.add(resolved, &[]);
        self.discovery_failures.add(failed, &[]);
    }

    /// Record the outcome of a discovery run (no-op)
    #[cfg(not(feature = "metrics"))]
    pub fn record_discovery(&self, _resolved: u64, _failed: u64) {}
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("enabled", &cfg!(feature = "metrics"))
            .finish()
    }
}

/// Global telemetry instance holder
static TELEMETRY: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Initialize global telemetry, returning the instance shared by all clients
pub fn init_telemetry(config: TelemetryConfig) -> Arc<Metrics> {
    TELEMETRY
        .get_or_init(|| Arc::new(Metrics::new(&config)))
        .clone()
}

/// Create the metrics instance for one client
pub(crate) fn metrics_for(config: &TelemetryConfig) -> Arc<Metrics> {
    if config.enabled {
        init_telemetry(config.clone())
    } else {
        Arc::new(Metrics::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.service_name, "flickr-reflect");
    }

    #[test]
    fn test_metrics_record_calls() {
        let config = TelemetryConfig {
            enabled: true,
            ..Default::default()
        };

        let metrics = metrics_for(&config);
        metrics.record_request("flickr.test.echo", None, 0.05);
        metrics.record_request("flickr.test.login", Some("api"), 0.02);
        metrics.record_cache("token", true);
        metrics.record_discovery(2, 1);
        assert!(Arc::ptr_eq(&metrics, &metrics_for(&config)));
    }
}
