use crate::connectors::{
    AwsContext, CloudFrontProbe, DynamoDbProbe, ElasticsearchProbe, HttpProbe, Probe, RedisProbe,
    RekognitionProbe, S3Probe, SqlProbe, UnsupportedProbe,
};
use crate::health::{DriverSet, StatusMap};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    /// Overrides `AWS_REGION` for the shared cloud session
    #[serde(default)]
    pub aws_region: Option<String>,
    /// Sends every cloud request to this endpoint, e.g. a local emulator
    #[serde(default)]
    pub aws_endpoint: Option<String>,
    #[serde(default)]
    pub probes: Vec<ProbeSettings>,
    /// Served on /statusz, keys are kept as written
    #[serde(default)]
    pub status: StatusMap,
}

/// One entry of the `probes` list, selected by its `kind` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum ProbeSettings {
    #[serde(rename = "HTTP")]
    Http {
        name: String,
        address: String,
        #[serde(default = "default_method")]
        method: String,
        #[serde(default)]
        body: String,
        #[serde(default = "default_status_codes")]
        status_codes: Vec<u16>,
    },
    #[serde(rename = "SQL")]
    Sql {
        name: String,
        driver: String,
        host: String,
        database: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    Redis {
        name: String,
        address: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        database: i64,
    },
    Elasticsearch {
        name: String,
        #[serde(default)]
        addresses: Vec<String>,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    #[serde(rename = "DynamoDB")]
    DynamoDb { name: String, table: String },
    S3 { name: String, bucket: String },
    CloudFront { name: String, id: String },
    Rekognition { name: String },
    /// Any kind without an adapter
    #[serde(other)]
    Unsupported,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status_codes() -> Vec<u16> {
    vec![200]
}

impl ProbeSettings {
    pub fn build(&self, aws: &Arc<AwsContext>) -> Arc<dyn Probe> {
        match self.clone() {
            Self::Http {
                name,
                address,
                method,
                body,
                status_codes,
            } => Arc::new(
                HttpProbe::new(name, address)
                    .method(method)
                    .body(body)
                    .status_codes(status_codes),
            ),
            Self::Sql {
                name,
                driver,
                host,
                database,
                username,
                password,
            } => Arc::new(SqlProbe::new(name, driver, host, database).credentials(username, password)),
            Self::Redis {
                name,
                address,
                password,
                database,
            } => Arc::new(RedisProbe::new(name, address).password(password).database(database)),
            Self::Elasticsearch {
                name,
                addresses,
                username,
                password,
            } => Arc::new(ElasticsearchProbe::new(name, addresses).credentials(username, password)),
            Self::DynamoDb { name, table } => Arc::new(DynamoDbProbe::new(name, table, aws.clone())),
            Self::S3 { name, bucket } => Arc::new(S3Probe::new(name, bucket, aws.clone())),
            Self::CloudFront { name, id } => Arc::new(CloudFrontProbe::new(name, id, aws.clone())),
            Self::Rekognition { name } => Arc::new(RekognitionProbe::new(name, aws.clone())),
            Self::Unsupported => Arc::new(UnsupportedProbe::default()),
        }
    }
}

impl Settings {
    pub fn aws_context(&self) -> AwsContext {
        let ctx = match self.aws_region.as_deref() {
            Some(region) if !region.is_empty() => AwsContext::new(region),
            _ => AwsContext::from_env(),
        };
        match self.aws_endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => ctx.with_endpoint(endpoint),
            _ => ctx,
        }
    }

    /// Builds the driver set in configuration order.
    pub fn driver_set(&self, aws: &Arc<AwsContext>) -> DriverSet {
        self.probes.iter().map(|probe| probe.build(aws)).collect()
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 8080_i64)?
        // .json, .toml, .yaml, .yml
        .add_source(config::File::with_name("configuration").required(false))
        .set_override_option("app_host", std::env::var("APP_HOST").ok())?
        .set_override_option("app_port", std::env::var("APP_PORT").ok())?
        .build()?;

    settings.try_deserialize()
}
