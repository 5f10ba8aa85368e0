//! Container state reconciliation
//!
//! One cycle takes a fresh snapshot of all containers, diffs it against the
//! snapshot retained from the previous cycle, rewrites the full state-label
//! set for every container still present, and retracts every series belonging
//! to containers that have disappeared.

mod docker;
mod encoder;
mod r#loop;


pub use docker::DockerSource;
pub use encoder::encode;
pub use r#loop::{ReconcileConfig, ReconcileLoop};

use crate::models::{ContainerRecord, ContainerState, Snapshot};
use crate::sink::StateSink;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub use async_trait::async_trait;

/// Failure to obtain a container snapshot.
#[derive(Debug, Error)]
pub enum ObserveError {
    /// Connectivity or permission failure talking to the Docker daemon.
    #[error("docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),
    /// Listing failure from a non-Docker source.
    #[error("container listing failed: {0}")]
    Listing(String),
}

/// Source of container snapshots.
///
/// Implementations must list all containers regardless of lifecycle state,
/// and guarantee `id` uniqueness within one snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn observe(&self) -> Result<Snapshot, ObserveError>;
}

/// Drives the observe-diff-apply sequence and owns the retained snapshot.
pub struct Reconciler {
    source: Arc<dyn SnapshotSource>,
    sink: Arc<dyn StateSink>,
    previous: Snapshot,
}

impl Reconciler {
    pub fn new(source: Arc<dyn SnapshotSource>, sink: Arc<dyn StateSink>) -> Self {
        Self {
            source,
            sink,
            previous: Snapshot::new(),
        }
    }

    /// Number of containers in the retained snapshot.
    pub fn tracked(&self) -> usize {
        self.previous.len()
    }

    /// Run one reconciliation cycle.
    ///
    /// On observation failure nothing is applied: the sink and the retained
    /// snapshot are left exactly as they were, and the caller decides whether
    /// the failure is fatal (startup) or retried on the next tick (steady
    /// state).
    pub async fn reconcile(&mut self) -> Result<(), ObserveError> {
        let current = self.source.observe().await?;

        for prev in &self.previous {
            match current.iter().find(|record| record.id == prev.id) {
                Some(record) => {
                    // Identity is keyed on id alone. If image or name changed
                    // under the same id, the old labels would otherwise leave
                    // orphaned series behind.
                    if record.image != prev.image || record.name != prev.name {
                        debug!(
                            container_id = %prev.id,
                            old_name = %prev.name,
                            new_name = %record.name,
                            "Container metadata changed, retiring old series"
                        );
                        delete_all_states(self.sink.as_ref(), prev);
                    }
                    // Encode the current record: state may have moved since
                    // the previous cycle and the sink must reflect the new
                    // truth.
                    apply_states(self.sink.as_ref(), record);
                }
                None => {
                    info!(
                        container_id = %prev.id,
                        name = %prev.name,
                        "Container removed, deleting its state series"
                    );
                    delete_all_states(self.sink.as_ref(), prev);
                }
            }
        }

        // Containers seen for the first time are encoded in this cycle, not
        // deferred until the retained snapshot catches up.
        for record in &current {
            if !self.previous.iter().any(|prev| prev.id == record.id) {
                debug!(
                    container_id = %record.id,
                    name = %record.name,
                    state = %record.state,
                    "New container discovered"
                );
                apply_states(self.sink.as_ref(), record);
            }
        }

        self.previous = current;
        Ok(())
    }
}

/// Push the full state-label assignment for one container into the sink.
fn apply_states(sink: &dyn StateSink, record: &ContainerRecord) {
    for (state, value) in encode(record) {
        sink.set(&record.id, &record.image, &record.name, state, value);
    }
}

/// Remove every tracked state series for one container.
fn delete_all_states(sink: &dyn StateSink, record: &ContainerRecord) {
    for state in ContainerState::ALL {
        sink.delete(&record.id, &record.image, &record.name, state);
    }
}
