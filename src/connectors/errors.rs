use crate::health::ErrorKind;

/// Errors a probe can report for one check.
///
/// The message is what ends up in the `Error` field of the report, so the
/// variants carry the underlying client's text verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Dependency could not be reached (network, auth, driver error)
    #[error("{0}")]
    Connectivity(String),
    /// Dependency answered but reported an unhealthy state
    #[error("{0}")]
    Unhealthy(String),
    /// Probe could not be set up (bad parameters, shared session)
    #[error("{0}")]
    Config(String),
    #[error("driver not supported")]
    Unsupported,
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::Unhealthy(_) => ErrorKind::Semantic,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Unsupported => ErrorKind::Unsupported,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Connectivity(err.to_string())
        }
    }
}

impl From<sqlx::Error> for ProbeError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(e) => Self::Config(e.to_string()),
            e => Self::Connectivity(e.to_string()),
        }
    }
}

impl From<redis::RedisError> for ProbeError {
    fn from(err: redis::RedisError) -> Self {
        if err.kind() == redis::ErrorKind::InvalidClientConfig {
            Self::Config(err.to_string())
        } else {
            Self::Connectivity(err.to_string())
        }
    }
}
