//! Docker snapshot source
//!
//! Lists every container on the host through the Docker API (stopped and
//! created ones included) and normalizes each entry into a
//! [`ContainerRecord`].

use super::{async_trait, ObserveError, SnapshotSource};
use crate::models::{ContainerRecord, Snapshot};
use bollard::container::ListContainersOptions;
use bollard::models::ContainerSummary;
use bollard::Docker;

/// [`SnapshotSource`] backed by the local Docker daemon.
pub struct DockerSource {
    docker: Docker,
}

impl DockerSource {
    /// Connect using the standard local environment (unix socket or
    /// `DOCKER_HOST`).
    pub fn connect() -> Result<Self, ObserveError> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl SnapshotSource for DockerSource {
    async fn observe(&self) -> Result<Snapshot, ObserveError> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };

        let containers = self.docker.list_containers(Some(options)).await?;
        Ok(containers.into_iter().map(record_from_summary).collect())
    }
}

/// Normalize one Docker listing entry.
///
/// Docker reports names with a leading `/`; it is stripped for the exported
/// label. Missing optional fields map to empty strings rather than dropping
/// the container.
fn record_from_summary(summary: ContainerSummary) -> ContainerRecord {
    let name = summary
        .names
        .as_ref()
        .and_then(|names| names.first())
        .map(|name| name.trim_start_matches('/').to_string())
        .unwrap_or_default();

    ContainerRecord {
        id: summary.id.unwrap_or_default(),
        image: summary.image.unwrap_or_default(),
        name,
        state: summary.state.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_summary_strips_leading_slash() {
        let summary = ContainerSummary {
            id: Some("abc123".to_string()),
            names: Some(vec!["/web".to_string()]),
            image: Some("nginx:latest".to_string()),
            state: Some("running".to_string()),
            ..Default::default()
        };

        let record = record_from_summary(summary);
        assert_eq!(record.id, "abc123");
        assert_eq!(record.name, "web");
        assert_eq!(record.image, "nginx:latest");
        assert_eq!(record.state, "running");
    }

    #[test]
    fn test_record_from_summary_takes_first_name() {
        let summary = ContainerSummary {
            id: Some("abc123".to_string()),
            names: Some(vec!["/primary".to_string(), "/alias".to_string()]),
            ..Default::default()
        };

        assert_eq!(record_from_summary(summary).name, "primary");
    }

    #[test]
    fn test_record_from_summary_handles_missing_fields() {
        let record = record_from_summary(ContainerSummary::default());

        assert_eq!(record.id, "");
        assert_eq!(record.image, "");
        assert_eq!(record.name, "");
        assert_eq!(record.state, "");
    }
}
