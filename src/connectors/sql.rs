use super::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use sqlx::{Connection, MySqlConnection, PgConnection};
use std::str::FromStr;

pub const KIND: &str = "SQL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDriver {
    /// `host` is used as given, with or without a port
    MySql,
    /// `host` must be `host:port`
    Postgres,
}

impl FromStr for SqlDriver {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(Self::MySql),
            "postgres" => Ok(Self::Postgres),
            other => Err(ProbeError::Config(format!("unknown sql driver: {}", other))),
        }
    }
}

/// Opens one connection, pings it and closes it.
#[derive(Debug, Clone)]
pub struct SqlProbe {
    name: String,
    driver: String,
    host: String,
    database: String,
    username: String,
    password: String,
}

impl SqlProbe {
    pub fn new(
        name: impl Into<String>,
        driver: impl Into<String>,
        host: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            host: host.into(),
            database: database.into(),
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    // Connection string: <driver>://<username>:<password>@<host>[:<port>]/<database>
    pub fn connection_string(&self) -> Result<String, ProbeError> {
        let username = urlencoding::encode(&self.username);
        let password = urlencoding::encode(&self.password);

        match self.driver.parse::<SqlDriver>()? {
            SqlDriver::MySql => Ok(format!(
                "mysql://{}:{}@{}/{}",
                username, password, self.host, self.database,
            )),
            SqlDriver::Postgres => {
                let malformed = || {
                    ProbeError::Config(format!("postgres host must be host:port, got {:?}", self.host))
                };
                let (host, port) = self.host.rsplit_once(':').ok_or_else(malformed)?;
                if host.is_empty() || port.parse::<u16>().is_err() {
                    return Err(malformed());
                }
                Ok(format!(
                    "postgres://{}:{}@{}:{}/{}?sslmode=require",
                    username, password, host, port, self.database,
                ))
            }
        }
    }
}

#[async_trait]
impl Probe for SqlProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let connection_string = self.connection_string()?;

        match self.driver.parse::<SqlDriver>()? {
            SqlDriver::MySql => {
                let mut conn = MySqlConnection::connect(&connection_string).await?;
                let result = conn.ping().await;
                if let Err(err) = conn.close().await {
                    tracing::debug!("Failed to close mysql connection: {:?}", err);
                }
                result?;
            }
            SqlDriver::Postgres => {
                let mut conn = PgConnection::connect(&connection_string).await?;
                let result = conn.ping().await;
                if let Err(err) = conn.close().await {
                    tracing::debug!("Failed to close postgres connection: {:?}", err);
                }
                result?;
            }
        }

        Ok(())
    }
}
