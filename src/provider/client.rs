//! Outbound provider client

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::GenerateContentRequest;
use crate::config::ProviderConfig;

/// Raw reply from the provider: upstream status plus unparsed body
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderCallError {
    #[error("Invalid provider endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProviderCallError {
    fn from(e: reqwest::Error) -> Self {
        ProviderCallError::Transport(e.to_string())
    }
}

/// Seam between the relay and the provider's HTTP API.
///
/// The production implementation talks to the real endpoint; tests substitute
/// a recording mock to assert when calls are (not) made.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issue one generateContent call, authenticated with the given key
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<ProviderReply, ProviderCallError>;
}

/// reqwest-backed client for the Gemini generateContent endpoint
pub struct HttpProviderClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpProviderClient {
    /// Build a client for the configured provider URL and model
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderCallError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let endpoint = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url(),
            config.model
        ))?;

        Ok(Self { client, endpoint })
    }

    /// The generateContent URL, without the key query parameter
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<ProviderReply, ProviderCallError> {
        // Key travels only in the outbound query string; never log this URL
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", api_key);

        let response = self.client.post(url).json(request).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, body_size = body.len(), "Received provider response");

        Ok(ProviderReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let config = ProviderConfig {
            url: "http://localhost:9090/".to_string(),
            model: "gemini-test".to_string(),
            ..ProviderConfig::default()
        };
        let client = HttpProviderClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:9090/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_endpoint_default_provider() {
        let client = HttpProviderClient::new(&ProviderConfig::default()).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent"
        );
    }

    #[test]
    fn test_endpoint_rejects_garbage_url() {
        let config = ProviderConfig {
            url: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        assert!(HttpProviderClient::new(&config).is_err());
    }

    #[test]
    fn test_provider_reply_success_range() {
        assert!(ProviderReply { status: 200, body: String::new() }.is_success());
        assert!(ProviderReply { status: 204, body: String::new() }.is_success());
        assert!(!ProviderReply { status: 429, body: String::new() }.is_success());
        assert!(!ProviderReply { status: 500, body: String::new() }.is_success());
    }
}
