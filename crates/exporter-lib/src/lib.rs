//! Library for the container state exporter
//!
//! This crate provides the core functionality for:
//! - Snapshotting containers from the Docker daemon
//! - Reconciling the snapshot against previously observed state
//! - Exposing per-container lifecycle state as Prometheus gauge series
//! - Health checks and self-observability

pub mod health;
pub mod models;
pub mod observability;
pub mod reconcile;
pub mod sink;

pub use health::{ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse};
pub use models::{ContainerRecord, ContainerState, Snapshot};
pub use observability::ExporterMetrics;
pub use reconcile::{
    DockerSource, ObserveError, ReconcileConfig, ReconcileLoop, Reconciler, SnapshotSource,
};
pub use sink::{PrometheusSink, StateSink, STATE_METRIC_NAME};
