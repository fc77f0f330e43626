use super::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;

pub const KIND: &str = "Elasticsearch";
const DEFAULT_ADDRESS: &str = "http://localhost:9200";

/// Pings the cluster with `HEAD /`, trying the configured nodes in order.
#[derive(Debug, Clone)]
pub struct ElasticsearchProbe {
    name: String,
    addresses: Vec<String>,
    username: String,
    password: String,
}

impl ElasticsearchProbe {
    pub fn new(name: impl Into<String>, addresses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            addresses,
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    fn nodes(&self) -> Vec<&str> {
        if self.addresses.is_empty() {
            vec![DEFAULT_ADDRESS]
        } else {
            self.addresses.iter().map(String::as_str).collect()
        }
    }

    async fn ping_node(&self, client: &reqwest::Client, node: &str) -> Result<(), ProbeError> {
        let mut request = client.head(node);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProbeError::Unhealthy(format!(
                "elasticsearch {} returned status: {}",
                node,
                response.status()
            )))
        }
    }
}

#[async_trait]
impl Probe for ElasticsearchProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let client = reqwest::Client::builder().build()?;

        // a node that answered outranks nodes that could not be reached
        let mut answered = None;
        let mut unreachable = None;
        for node in self.nodes() {
            match self.ping_node(&client, node).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::debug!("Elasticsearch node {} failed: {}", node, err);
                    match err {
                        ProbeError::Unhealthy(_) => {
                            answered.get_or_insert(err);
                        }
                        _ => unreachable = Some(err),
                    }
                }
            }
        }

        Err(answered
            .or(unreachable)
            .unwrap_or_else(|| ProbeError::Config("no elasticsearch nodes".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_local_node() {
        let probe = ElasticsearchProbe::new("search", vec![]);
        assert_eq!(probe.nodes(), vec![DEFAULT_ADDRESS]);
    }

    #[test]
    fn keeps_configured_node_order() {
        let probe = ElasticsearchProbe::new(
            "search",
            vec!["http://es-1:9200".to_string(), "http://es-2:9200".to_string()],
        );
        assert_eq!(probe.nodes(), vec!["http://es-1:9200", "http://es-2:9200"]);
    }
}
