//! Core relay: validate the inbound request, build the provider payload,
//! forward it and map the reply

use serde::Deserialize;
use std::sync::Arc;

use super::error::RelayError;
use crate::provider::{GenerateContentRequest, ProviderClient};

/// Platform-neutral inbound request, produced by a hosting adapter
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// Uppercase HTTP method name
    pub method: String,
    pub body: Vec<u8>,
}

impl RawRequest {
    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "POST".to_string(),
            body: body.into(),
        }
    }
}

/// Platform-neutral outbound response, adapted by each hosting target
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl RawResponse {
    /// A JSON response with the given body as-is
    pub fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    /// A relay-generated `{"error": "..."}` response
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }).to_string())
    }
}

/// Inbound request body
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// The relay itself: one instance per process, shared across invocations.
///
/// Configuration is resolved at startup and passed in here; request handling
/// performs no environment lookups.
pub struct PromptRelay {
    api_key: Option<String>,
    system_instruction: String,
    client: Arc<dyn ProviderClient>,
}

impl PromptRelay {
    pub fn new(
        api_key: Option<String>,
        system_instruction: String,
        client: Arc<dyn ProviderClient>,
    ) -> Self {
        Self {
            api_key,
            system_instruction,
            client,
        }
    }

    /// Handle one inbound request end to end.
    ///
    /// All failure paths produce a single terminal response via the central
    /// error mapping; there is no retry or fallback.
    pub async fn handle(&self, request: RawRequest) -> RawResponse {
        match self.process(request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    /// Validation order: method, credential, body, prompt. Each step is a
    /// distinct terminal rejection point and nothing is sent upstream until
    /// all four pass.
    async fn process(&self, request: RawRequest) -> Result<RawResponse, RelayError> {
        if request.method != "POST" {
            return Err(RelayError::method_not_allowed());
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(RelayError::missing_api_key)?;

        let prompt = extract_prompt(&request.body)?;

        tracing::debug!(prompt_len = prompt.len(), "Relaying prompt to provider");

        let payload = GenerateContentRequest::new(&prompt, &self.system_instruction);

        let reply = self
            .client
            .generate(api_key, &payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach provider");
                RelayError::Transport(e.to_string())
            })?;

        if !reply.is_success() {
            tracing::error!(
                status = reply.status,
                error_body = %reply.body,
                "Provider returned error response"
            );
            return Err(RelayError::Upstream {
                status: reply.status,
                detail: reply.body,
            });
        }

        // Success bodies pass through unchanged
        Ok(RawResponse::json(200, reply.body))
    }
}

/// Parse the body and extract a non-empty prompt
fn extract_prompt(body: &[u8]) -> Result<String, RelayError> {
    if body.is_empty() {
        return Err(RelayError::bad_request("request body is empty"));
    }

    let request: PromptRequest = serde_json::from_slice(body)
        .map_err(|e| RelayError::bad_request(format!("Invalid JSON body: {}", e)))?;

    match request.prompt {
        Some(prompt) if !prompt.trim().is_empty() => Ok(prompt),
        _ => Err(RelayError::bad_request("prompt is required")),
    }
}
