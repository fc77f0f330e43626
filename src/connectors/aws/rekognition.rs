use super::{sdk_error, AwsContext};
use crate::connectors::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use std::sync::Arc;

pub const KIND: &str = "Rekognition";

/// Liveness of the Rekognition API, via a one-item `DescribeProjects`.
#[derive(Debug, Clone)]
pub struct RekognitionProbe {
    name: String,
    ctx: Arc<AwsContext>,
}

impl RekognitionProbe {
    pub fn new(name: impl Into<String>, ctx: Arc<AwsContext>) -> Self {
        Self {
            name: name.into(),
            ctx,
        }
    }
}

#[async_trait]
impl Probe for RekognitionProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let config = self.ctx.session().await?;
        let client = aws_sdk_rekognition::Client::new(config);

        client
            .describe_projects()
            .max_results(1)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}
