//! Gauge storage for per-container state series
//!
//! The reconciler only needs two operations against the metric store: upsert
//! one series and drop one series. They are behind a trait so the
//! reconciliation engine can be exercised against an in-memory sink in tests.

use crate::models::ContainerState;
use prometheus::{GaugeVec, Opts, Registry};
use tracing::warn;

/// Metric name of the exported gauge.
pub const STATE_METRIC_NAME: &str = "dockercontainer_state";

/// Multi-dimensional gauge store keyed by (id, image, name, state).
pub trait StateSink: Send + Sync {
    /// Upsert one series to the given value.
    fn set(&self, id: &str, image: &str, name: &str, state: ContainerState, value: f64);

    /// Remove one series if present. Absent series are not an error.
    fn delete(&self, id: &str, image: &str, name: &str, state: ContainerState);
}

/// [`StateSink`] backed by a `prometheus::GaugeVec` on an explicit registry.
#[derive(Clone)]
pub struct PrometheusSink {
    gauge: GaugeVec,
}

impl PrometheusSink {
    /// Create the container state gauge and register it.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let gauge = GaugeVec::new(
            Opts::new(STATE_METRIC_NAME, "Docker container status"),
            &["id", "image", "name", "state"],
        )?;
        registry.register(Box::new(gauge.clone()))?;
        Ok(Self { gauge })
    }
}

impl StateSink for PrometheusSink {
    fn set(&self, id: &str, image: &str, name: &str, state: ContainerState, value: f64) {
        match self
            .gauge
            .get_metric_with_label_values(&[id, image, name, state.as_str()])
        {
            Ok(series) => series.set(value),
            Err(error) => {
                // Label validation failures skip the series, never the cycle.
                warn!(
                    container_id = %id,
                    state = %state,
                    error = %error,
                    "Failed to set container state series"
                );
            }
        }
    }

    fn delete(&self, id: &str, image: &str, name: &str, state: ContainerState) {
        // remove_label_values errors when the series does not exist; delete
        // is idempotent, so that case is ignored.
        let _ = self
            .gauge
            .remove_label_values(&[id, image, name, state.as_str()]);
    }
}
