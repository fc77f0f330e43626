use crate::connectors::{ProbeDescriptor, ProbeError};
use serde::{Deserialize, Serialize};

/// Failure classes a probe result can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Connectivity,
    Semantic,
    Configuration,
    Unsupported,
    /// The probe itself crashed
    Internal,
}

/// Outcome of one probe in one cycle.
///
/// Serialises as `{"Type": .., "Name": .., "Error": ..}`; `Error` is empty on
/// success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(skip)]
    pub error_kind: Option<ErrorKind>,
}

impl ProbeResult {
    pub fn success(descriptor: ProbeDescriptor) -> Self {
        Self {
            kind: descriptor.kind,
            name: descriptor.name,
            error: String::new(),
            error_kind: None,
        }
    }

    pub fn failure(descriptor: ProbeDescriptor, kind: ErrorKind, error: String) -> Self {
        Self {
            kind: descriptor.kind,
            name: descriptor.name,
            error,
            error_kind: Some(kind),
        }
    }

    pub fn from_error(descriptor: ProbeDescriptor, err: &ProbeError) -> Self {
        Self::failure(descriptor, err.kind(), err.to_string())
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_empty()
    }
}

/// Aggregated outcome of one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub results: Vec<ProbeResult>,
}

impl HealthReport {
    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|result| !result.is_healthy())
    }
}
