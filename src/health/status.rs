use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type StatusMap = serde_json::Map<String, Value>;

pub const VERSION_KEY: &str = "Version";
pub const ENVIRONMENT_KEY: &str = "Environment";

/// Where the status payload comes from.
#[derive(Clone)]
pub enum StatusSource {
    /// Same map on every request
    Static(StatusMap),
    /// Invoked on every request
    Producer(Arc<dyn Fn() -> StatusMap + Send + Sync>),
}

impl fmt::Debug for StatusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(map) => f.debug_tuple("Static").field(map).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Values filled into a snapshot when the caller did not set them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDefaults {
    pub version: Option<String>,
    pub environment: Option<String>,
}

impl StatusDefaults {
    /// `VERSION`, and `ENV` falling back to `ENVIRONMENT`.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());

        Self {
            version: read("VERSION"),
            environment: read("ENV").or_else(|| read("ENVIRONMENT")),
        }
    }

    /// Sets `Version` and `Environment` only where the key is absent and the
    /// default is non-empty. Caller-supplied keys are never overwritten.
    pub fn apply(&self, mut status: StatusMap) -> StatusMap {
        fill(&mut status, ENVIRONMENT_KEY, self.environment.as_deref());
        fill(&mut status, VERSION_KEY, self.version.as_deref());
        status
    }
}

fn fill(status: &mut StatusMap, key: &str, value: Option<&str>) {
    match value {
        Some(value) if !value.is_empty() && !status.contains_key(key) => {
            status.insert(key.to_string(), Value::String(value.to_string()));
        }
        _ => {}
    }
}

/// Serves point-in-time process metadata for `/statusz`.
#[derive(Debug, Clone)]
pub struct StatusProvider {
    source: StatusSource,
}

impl StatusProvider {
    pub fn fixed(status: StatusMap) -> Self {
        Self {
            source: StatusSource::Static(status),
        }
    }

    pub fn producer<F>(producer: F) -> Self
    where
        F: Fn() -> StatusMap + Send + Sync + 'static,
    {
        Self {
            source: StatusSource::Producer(Arc::new(producer)),
        }
    }

    pub fn source(&self) -> &StatusSource {
        &self.source
    }

    /// Current snapshot with defaults read from the environment.
    pub fn snapshot(&self) -> StatusMap {
        self.snapshot_with(&StatusDefaults::from_env())
    }

    pub fn snapshot_with(&self, defaults: &StatusDefaults) -> StatusMap {
        let status = match &self.source {
            StatusSource::Static(status) => status.clone(),
            StatusSource::Producer(producer) => producer(),
        };
        defaults.apply(status)
    }
}

impl Default for StatusProvider {
    fn default() -> Self {
        Self::fixed(StatusMap::new())
    }
}

impl From<StatusMap> for StatusProvider {
    fn from(status: StatusMap) -> Self {
        Self::fixed(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn map(value: Value) -> StatusMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn defaults(version: &str, environment: &str) -> StatusDefaults {
        StatusDefaults {
            version: Some(version.to_string()),
            environment: Some(environment.to_string()),
        }
    }

    #[test]
    fn fills_missing_keys() {
        let status = defaults("1.2.3", "prod").apply(StatusMap::new());
        assert_eq!(
            Value::Object(status),
            json!({"Version": "1.2.3", "Environment": "prod"})
        );
    }

    #[test]
    fn caller_keys_win() {
        let status = defaults("1.2.3", "prod").apply(map(json!({"Version": "custom"})));
        assert_eq!(status["Version"], "custom");
        assert_eq!(status["Environment"], "prod");
    }

    #[test]
    fn explicit_null_counts_as_present() {
        let status = defaults("1.2.3", "prod").apply(map(json!({"Environment": null})));
        assert_eq!(status["Environment"], Value::Null);
    }

    #[test]
    fn empty_defaults_are_skipped() {
        let status = defaults("", "").apply(StatusMap::new());
        assert!(status.is_empty());

        let status = StatusDefaults::default().apply(map(json!({"Foo": "bar"})));
        assert_eq!(Value::Object(status), json!({"Foo": "bar"}));
    }

    #[test]
    fn environment_falls_back_to_environment_variable() {
        temp_env::with_vars(
            [
                ("VERSION", Some("1.2.3")),
                ("ENV", None),
                ("ENVIRONMENT", Some("prod")),
            ],
            || {
                let status = StatusProvider::default().snapshot();
                assert_eq!(
                    Value::Object(status),
                    json!({"Version": "1.2.3", "Environment": "prod"})
                );
            },
        );
    }

    #[test]
    fn env_takes_precedence_over_environment() {
        temp_env::with_vars(
            [("ENV", Some("staging")), ("ENVIRONMENT", Some("prod"))],
            || {
                assert_eq!(
                    StatusDefaults::from_env().environment.as_deref(),
                    Some("staging")
                );
            },
        );
    }

    #[test]
    fn static_snapshot_is_a_copy() {
        let provider = StatusProvider::fixed(map(json!({"Foo": "bar"})));

        let mut first = provider.snapshot_with(&defaults("1.0.0", "dev"));
        first.insert("Foo".to_string(), json!("changed"));

        let second = provider.snapshot_with(&StatusDefaults::default());
        assert_eq!(Value::Object(second), json!({"Foo": "bar"}));
    }

    #[test]
    fn producer_is_invoked_per_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider = StatusProvider::producer(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            map(json!({"Calls": n}))
        });

        provider.snapshot_with(&StatusDefaults::default());
        let status = provider.snapshot_with(&defaults("2.0.0", "prod"));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            Value::Object(status),
            json!({"Calls": 2, "Version": "2.0.0", "Environment": "prod"})
        );
    }
}
