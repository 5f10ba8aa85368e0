//! Self-observability metrics for the exporter
//!
//! These series describe the exporter itself (cycle timing, observation
//! failures, tracked container count) and live on the same registry as the
//! container state gauge, so one scrape returns both.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry};

/// Histogram buckets for reconciliation cycle duration (in seconds). A cycle
/// includes one Docker API round trip, so buckets reach into seconds.
const CYCLE_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Handle to the exporter's own metrics. Clones share the underlying series.
#[derive(Clone)]
pub struct ExporterMetrics {
    cycle_duration_seconds: Histogram,
    cycles_total: IntCounter,
    observe_errors_total: IntCounter,
    containers_tracked: IntGauge,
}

impl ExporterMetrics {
    /// Create and register all exporter self-metrics.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "exporter_reconcile_duration_seconds",
                "Time spent running one reconciliation cycle",
            )
            .buckets(CYCLE_DURATION_BUCKETS.to_vec()),
        )?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;

        let cycles_total = IntCounter::with_opts(Opts::new(
            "exporter_reconcile_cycles_total",
            "Total number of completed reconciliation cycles",
        ))?;
        registry.register(Box::new(cycles_total.clone()))?;

        let observe_errors_total = IntCounter::with_opts(Opts::new(
            "exporter_observe_errors_total",
            "Total number of failed container listings",
        ))?;
        registry.register(Box::new(observe_errors_total.clone()))?;

        let containers_tracked = IntGauge::with_opts(Opts::new(
            "exporter_containers_tracked",
            "Number of containers in the latest snapshot",
        ))?;
        registry.register(Box::new(containers_tracked.clone()))?;

        Ok(Self {
            cycle_duration_seconds,
            cycles_total,
            observe_errors_total,
            containers_tracked,
        })
    }

    /// Record the duration of a completed cycle.
    pub fn observe_cycle_duration(&self, duration_secs: f64) {
        self.cycle_duration_seconds.observe(duration_secs);
        self.cycles_total.inc();
    }

    /// Record a failed container listing.
    pub fn inc_observe_errors(&self) {
        self.observe_errors_total.inc();
    }

    /// Update the tracked container count.
    pub fn set_containers_tracked(&self, count: i64) {
        self.containers_tracked.set(count);
    }
}
