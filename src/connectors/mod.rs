//! Dependency probes
//!
//! One adapter per dependency kind. Every adapter wraps an existing client
//! library and exposes the same two operations through the [`Probe`] trait,
//! so the execution engine never depends on a concrete kind.
//!
//! ## Adding a kind
//!
//! 1. Add `{kind}.rs` with a struct holding the connection parameters
//! 2. Implement [`Probe`] for it: `describe` is static, `check` does exactly
//!    one round-trip and tears down anything it opened
//! 3. Add a `ProbeSettings` variant in `configuration.rs` if the kind should
//!    be configurable from `configuration.yaml`
//!
//! ```ignore
//! let drivers: DriverSet = vec![
//!     Arc::new(HttpProbe::new("google.com", "https://google.com").status_codes(vec![200, 301, 302])),
//!     Arc::new(RedisProbe::new("cache", "127.0.0.1:6379")),
//! ];
//! ```

pub mod aws;
pub mod elasticsearch;
pub mod errors;
pub mod http;
pub mod redis;
pub mod sql;
pub mod unsupported;

use async_trait::async_trait;
use serde::Serialize;

pub use aws::{AwsContext, CloudFrontProbe, DynamoDbProbe, RekognitionProbe, S3Probe};
pub use elasticsearch::ElasticsearchProbe;
pub use errors::ProbeError;
pub use http::HttpProbe;
pub use self::redis::RedisProbe;
pub use sql::{SqlDriver, SqlProbe};
pub use unsupported::UnsupportedProbe;

/// Identification of a probe, copied into every result it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeDescriptor {
    pub kind: String,
    pub name: String,
}

impl ProbeDescriptor {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// A configured check against one external dependency.
#[async_trait]
pub trait Probe: Send + Sync {
    fn describe(&self) -> ProbeDescriptor;

    async fn check(&self) -> Result<(), ProbeError>;
}
