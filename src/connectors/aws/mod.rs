//! Cloud-backed probes
//!
//! Every AWS probe holds an `Arc<AwsContext>`. The context owns the SDK
//! configuration, loaded the first time any probe needs it and then reused
//! by all of them for the life of the process.

pub mod cloudfront;
pub mod dynamodb;
pub mod rekognition;
pub mod s3;

pub use cloudfront::CloudFrontProbe;
pub use dynamodb::DynamoDbProbe;
pub use rekognition::RekognitionProbe;
pub use s3::S3Probe;

use super::ProbeError;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tokio::sync::OnceCell;

pub const DEFAULT_REGION: &str = "us-east-1";

const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidAccessKeyId",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

/// Maps an SDK failure onto the probe error taxonomy.
///
/// Service errors mean the API answered, so the resource is absent or
/// unhealthy, except for credential rejections which count as connectivity.
pub(crate) fn sdk_error<E, R>(err: SdkError<E, R>) -> ProbeError
where
    E: std::error::Error + ProvideErrorMetadata + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    let auth_failure = err
        .code()
        .map(|code| AUTH_ERROR_CODES.contains(&code))
        .unwrap_or(false);

    match err {
        SdkError::ServiceError(_) if !auth_failure => ProbeError::Unhealthy(message),
        SdkError::ConstructionFailure(_) => ProbeError::Config(message),
        _ => ProbeError::Connectivity(message),
    }
}

/// Shared AWS session for all cloud probes.
#[derive(Debug)]
pub struct AwsContext {
    region: String,
    endpoint_url: Option<String>,
    credentials: Option<Credentials>,
    config: OnceCell<SdkConfig>,
}

impl AwsContext {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            credentials: None,
            config: OnceCell::new(),
        }
    }

    /// Sends every cloud request to `endpoint_url` instead of the AWS endpoints.
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Static credentials in place of the default provider chain.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "zpages",
        ));
        self
    }

    /// Region from `AWS_REGION`, `us-east-1` when unset or empty.
    pub fn from_env() -> Self {
        let region = std::env::var("AWS_REGION")
            .ok()
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Self::new(region)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Returns the shared SDK configuration, loading it on first use.
    ///
    /// Concurrent first callers wait on the same initialisation; exactly one
    /// of them loads the configuration. A failed load is not cached, the next
    /// cycle tries again.
    pub async fn session(&self) -> Result<&SdkConfig, ProbeError> {
        self.config
            .get_or_try_init(|| async {
                if self.region.is_empty() {
                    return Err(ProbeError::Config("aws session: empty region".to_string()));
                }

                tracing::info!(region = %self.region, endpoint = ?self.endpoint_url, "Loading AWS session");
                let mut loader = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()));
                if let Some(endpoint_url) = &self.endpoint_url {
                    loader = loader.endpoint_url(endpoint_url);
                }
                if let Some(credentials) = &self.credentials {
                    loader = loader.credentials_provider(credentials.clone());
                }

                Ok(loader.load().await)
            })
            .await
    }
}

impl Default for AwsContext {
    fn default() -> Self {
        Self::from_env()
    }
}
