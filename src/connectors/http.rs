use super::{Probe, ProbeDescriptor, ProbeError};
use async_trait::async_trait;
use reqwest::Method;

pub const KIND: &str = "HTTP";

/// Sends one request and accepts the answer if its status code is allowed.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    name: String,
    address: String,
    method: String,
    body: Vec<u8>,
    status_codes: Vec<u16>,
}

impl HttpProbe {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            method: "GET".to_string(),
            body: Vec::new(),
            status_codes: vec![200],
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status_codes(mut self, status_codes: Vec<u16>) -> Self {
        self.status_codes = status_codes;
        self
    }

    fn parsed_method(&self) -> Result<Method, ProbeError> {
        if self.method.is_empty() {
            return Ok(Method::GET);
        }
        Method::from_bytes(self.method.to_uppercase().as_bytes())
            .map_err(|err| ProbeError::Config(format!("invalid method {:?}: {}", self.method, err)))
    }

    fn verify_status(&self, status: u16) -> Result<(), ProbeError> {
        if self.status_codes.contains(&status) {
            return Ok(());
        }
        Err(ProbeError::Unhealthy(format!(
            "status code error. Expected one of {:?}, got {}",
            self.status_codes, status
        )))
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn describe(&self) -> ProbeDescriptor {
        ProbeDescriptor::new(KIND, &self.name)
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let method = self.parsed_method()?;
        let client = reqwest::Client::builder().build()?;

        let response = client
            .request(method, &self.address)
            .body(self.body.clone())
            .send()
            .await?;

        self.verify_status(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mismatch_names_expected_and_actual() {
        let probe = HttpProbe::new("site", "http://localhost").status_codes(vec![200, 301, 302]);

        let err = probe.verify_status(404).unwrap_err();

        assert_eq!(
            err.to_string(),
            "status code error. Expected one of [200, 301, 302], got 404"
        );
        assert!(matches!(err, ProbeError::Unhealthy(_)));
        assert!(probe.verify_status(301).is_ok());
    }

    #[test]
    fn empty_method_defaults_to_get() {
        let probe = HttpProbe::new("site", "http://localhost").method("");
        assert_eq!(probe.parsed_method().unwrap(), Method::GET);

        let probe = probe.method("post");
        assert_eq!(probe.parsed_method().unwrap(), Method::POST);
    }

    #[test]
    fn malformed_method_is_a_configuration_error() {
        let probe = HttpProbe::new("site", "http://localhost").method("GE T");
        assert!(matches!(probe.parsed_method(), Err(ProbeError::Config(_))));
    }
}
