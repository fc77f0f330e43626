use super::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;

pub const KIND: &str = "Redis";

/// Opens one connection and sends `PING`.
#[derive(Debug, Clone)]
pub struct RedisProbe {
    name: String,
    address: String,
    password: String,
    database: i64,
}

impl RedisProbe {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            password: String::new(),
            database: 0,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    pub fn connection_string(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}/{}", self.address, self.database)
        } else {
            format!(
                "redis://:{}@{}/{}",
                urlencoding::encode(&self.password),
                self.address,
                self.database
            )
        }
    }
}

#[async_trait]
impl Probe for RedisProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let client = redis::Client::open(self.connection_string().as_str())?;
        // dropped at the end of the check, no reuse across cycles
        let mut conn = client.get_multiplexed_async_connection().await?;

        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::debug!("Redis answered {}", pong);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_string_without_password() {
        let probe = RedisProbe::new("cache", "127.0.0.1:6379").database(2);
        assert_eq!(probe.connection_string(), "redis://127.0.0.1:6379/2");
    }

    #[test]
    fn connection_string_encodes_password() {
        let probe = RedisProbe::new("cache", "cache.internal:6379").password("p@ss/word");
        assert_eq!(
            probe.connection_string(),
            "redis://:p%40ss%2Fword@cache.internal:6379/0"
        );
    }

    #[tokio::test]
    async fn unreachable_cache_is_a_connectivity_error() {
        let probe = RedisProbe::new("cache", "127.0.0.1:1");

        let err = probe.check().await.unwrap_err();
        assert!(matches!(err, ProbeError::Connectivity(_)), "got {:?}", err);
    }
}
