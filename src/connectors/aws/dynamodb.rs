use super::{sdk_error, AwsContext};
use crate::connectors::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use std::sync::Arc;

pub const KIND: &str = "DynamoDB";

/// Checks that a table exists with `DescribeTable`.
#[derive(Debug, Clone)]
pub struct DynamoDbProbe {
    name: String,
    table: String,
    ctx: Arc<AwsContext>,
}

impl DynamoDbProbe {
    pub fn new(name: impl Into<String>, table: impl Into<String>, ctx: Arc<AwsContext>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            ctx,
        }
    }
}

#[async_trait]
impl Probe for DynamoDbProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let config = self.ctx.session().await?;
        let client = aws_sdk_dynamodb::Client::new(config);

        client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}
