use super::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;

/// Stands in for a configured kind this crate has no adapter for.
///
/// It stays in the driver set so the report still shows one entry for it.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedProbe {
    descriptor: ProbeDescriptor,
}

impl UnsupportedProbe {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            descriptor: ProbeDescriptor::new(kind, name),
        }
    }
}

#[async_trait]
impl Probe for UnsupportedProbe {
    fn describe(&self) -> ProbeDescriptor {
        self.descriptor.clone()
    }

    async fn check(&self) -> Result<(), ProbeError> {
        Err(ProbeError::Unsupported)
    }
}
