//! Periodic reconciliation loop
//!
//! Runs one reconciliation per tick on a fixed interval. The loop exclusively
//! owns the [`Reconciler`], so cycles can never overlap; if a cycle overruns
//! the interval, the missed ticks are dropped.

use super::Reconciler;
use crate::health::{components, HealthRegistry};
use crate::observability::ExporterMetrics;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Configuration for the reconciliation loop
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Period between reconciliation cycles (default: 10 seconds)
    pub interval: Duration,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

/// Periodic driver around a [`Reconciler`].
pub struct ReconcileLoop {
    reconciler: Reconciler,
    config: ReconcileConfig,
    metrics: ExporterMetrics,
    health: HealthRegistry,
}

impl ReconcileLoop {
    pub fn new(
        reconciler: Reconciler,
        config: ReconcileConfig,
        metrics: ExporterMetrics,
        health: HealthRegistry,
    ) -> Self {
        Self {
            reconciler,
            config,
            metrics,
            health,
        }
    }

    /// Run until the shutdown channel fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            "Starting reconcile loop"
        );

        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the startup cycle already
        // ran before the loop was spawned.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.cycle().await;
                }
                _ = shutdown.recv() => {
                    info!("Shutting down reconcile loop");
                    break;
                }
            }
        }
    }

    /// Run one cycle, recording timing and outcome.
    ///
    /// Observation failures are cycle-local: the error is logged, the source
    /// is marked degraded, and the previous state stays in place until the
    /// next tick retries.
    async fn cycle(&mut self) {
        let start = Instant::now();

        match self.reconciler.reconcile().await {
            Ok(()) => {
                let elapsed = start.elapsed();
                self.metrics.observe_cycle_duration(elapsed.as_secs_f64());
                self.metrics
                    .set_containers_tracked(self.reconciler.tracked() as i64);
                self.health.set_healthy(components::SOURCE).await;
                debug!(
                    containers = self.reconciler.tracked(),
                    elapsed_ms = elapsed.as_millis(),
                    "Reconciliation cycle complete"
                );
            }
            Err(error) => {
                self.metrics.inc_observe_errors();
                self.health
                    .set_degraded(components::SOURCE, error.to_string())
                    .await;
                warn!(
                    error = %error,
                    "Container listing failed, keeping previous state until next tick"
                );
            }
        }
    }
}
