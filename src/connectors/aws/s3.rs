use super::{sdk_error, AwsContext};
use crate::connectors::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use std::sync::Arc;

pub const KIND: &str = "S3";

/// Checks that a bucket exists with `HeadBucket`.
#[derive(Debug, Clone)]
pub struct S3Probe {
    name: String,
    bucket: String,
    ctx: Arc<AwsContext>,
}

impl S3Probe {
    pub fn new(name: impl Into<String>, bucket: impl Into<String>, ctx: Arc<AwsContext>) -> Self {
        Self {
            name: name.into(),
            bucket: bucket.into(),
            ctx,
        }
    }
}

#[async_trait]
impl Probe for S3Probe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let config = self.ctx.session().await?;
        // emulators behind an endpoint override do not resolve bucket subdomains
        let client_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(self.ctx.endpoint_url().is_some())
            .build();
        let client = aws_sdk_s3::Client::from_conf(client_config);

        client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}
