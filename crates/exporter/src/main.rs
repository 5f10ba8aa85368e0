//! Container State Exporter
//!
//! Periodically lists all containers on the host via the Docker API and
//! exposes their lifecycle state as Prometheus gauge series for scraping.

use anyhow::{Context, Result};
use clap::Parser;
use exporter_lib::{
    health::components, DockerSource, ExporterMetrics, HealthRegistry, PrometheusSink,
    ReconcileConfig, ReconcileLoop, Reconciler,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting container-state-exporter");

    let cli = config::Cli::parse();
    let config = config::ExporterConfig::load(&cli)?;
    info!(
        listen_address = %config.listen_address,
        interval_secs = config.reconcile_interval_secs,
        "Exporter configured"
    );

    // One registry carries the container state gauge and the exporter's own
    // series; the /metrics handler encodes it directly.
    let registry = prometheus::Registry::new();
    let sink = Arc::new(PrometheusSink::register(&registry)?);
    let metrics = ExporterMetrics::register(&registry)?;

    let health_registry = HealthRegistry::new();
    health_registry.register(components::SOURCE).await;
    health_registry.register(components::RECONCILER).await;

    let source =
        Arc::new(DockerSource::connect().context("failed to create Docker client")?);
    let mut reconciler = Reconciler::new(source, sink);

    // First cycle runs before any traffic is served, so the first scrape is
    // never empty. An unreachable runtime at startup is fatal.
    reconciler
        .reconcile()
        .await
        .context("initial container listing failed")?;
    metrics.set_containers_tracked(reconciler.tracked() as i64);
    info!(containers = reconciler.tracked(), "Initial reconciliation complete");
    health_registry.set_ready(true).await;

    let (shutdown_tx, _) = broadcast::channel(1);
    let reconcile_loop = ReconcileLoop::new(
        reconciler,
        ReconcileConfig {
            interval: Duration::from_secs(config.reconcile_interval_secs),
        },
        metrics,
        health_registry.clone(),
    );
    tokio::spawn(reconcile_loop.run(shutdown_tx.subscribe()));

    let state = Arc::new(api::AppState::new(health_registry, registry));
    let server = tokio::spawn(api::serve(config.bind_address(), state));

    tokio::select! {
        result = server => {
            // The server only returns on bind or serve failure.
            result.context("metrics server panicked")??;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down");
        }
    }

    let _ = shutdown_tx.send(());
    Ok(())
}
