use super::{sdk_error, AwsContext};
use crate::connectors::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use std::sync::Arc;

pub const KIND: &str = "CloudFront";

/// Distribution states that count as healthy.
pub const HEALTHY_STATUSES: &[&str] = &["Deployed", "InProgress"];

/// Fetches a distribution and checks its deployment status.
#[derive(Debug, Clone)]
pub struct CloudFrontProbe {
    name: String,
    id: String,
    ctx: Arc<AwsContext>,
}

impl CloudFrontProbe {
    pub fn new(name: impl Into<String>, id: impl Into<String>, ctx: Arc<AwsContext>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            ctx,
        }
    }
}

pub(crate) fn verify_status(status: &str) -> Result<(), ProbeError> {
    if HEALTHY_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ProbeError::Unhealthy(format!("distribution status: {}", status)))
    }
}

#[async_trait]
impl Probe for CloudFrontProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let config = self.ctx.session().await?;
        let client = aws_sdk_cloudfront::Client::new(config);

        let output = client
            .get_distribution()
            .id(&self.id)
            .send()
            .await
            .map_err(sdk_error)?;

        let distribution = output.distribution().ok_or_else(|| {
            ProbeError::Unhealthy(format!("distribution {} not returned", self.id))
        })?;

        verify_status(distribution.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployed_and_in_progress_are_healthy() {
        assert!(verify_status("Deployed").is_ok());
        assert!(verify_status("InProgress").is_ok());
    }

    #[test]
    fn other_statuses_are_semantic_failures() {
        let err = verify_status("Disabled").unwrap_err();
        assert!(matches!(err, ProbeError::Unhealthy(_)));
        assert_eq!(err.to_string(), "distribution status: Disabled");

        assert!(verify_status("deployed").is_err());
        assert!(verify_status("").is_err());
    }
}
