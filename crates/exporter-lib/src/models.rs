//! Core data models for the container state exporter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states a container can report.
///
/// The vocabulary is closed: the encoder and the deletion path both iterate
/// [`ContainerState::ALL`], so every series created for a container is also
/// covered when the container disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Paused,
    Restarting,
    Running,
    Dead,
    Created,
    Exited,
}

impl ContainerState {
    /// All tracked states, in a fixed order.
    pub const ALL: [ContainerState; 6] = [
        ContainerState::Paused,
        ContainerState::Restarting,
        ContainerState::Running,
        ContainerState::Dead,
        ContainerState::Created,
        ContainerState::Exited,
    ];

    /// The label value used on the exported series.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Running => "running",
            ContainerState::Dead => "dead",
            ContainerState::Created => "created",
            ContainerState::Exited => "exited",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed container at a point in time.
///
/// `state` is kept as the raw string the runtime reported; a value outside
/// the tracked vocabulary is legal and simply matches no label during
/// encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Opaque stable identifier, unique among currently-existing containers.
    pub id: String,
    /// Image reference, descriptive only.
    pub image: String,
    /// Display name with any leading path separator stripped.
    pub name: String,
    /// Raw lifecycle state string as reported by the runtime.
    pub state: String,
}

/// The set of containers that existed at observation time, in any state.
pub type Snapshot = Vec<ContainerRecord>;
