//! axum hosting adapter for the relay

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handler::{PromptRelay, RawRequest, RawResponse};
use crate::config::AppConfig;
use crate::provider::HttpProviderClient;

/// Inbound bodies larger than this are rejected while reading
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state for the relay server
#[derive(Clone)]
pub struct RelayState {
    pub relay: Arc<PromptRelay>,
}

/// Build the router around an already-constructed relay
pub fn build_router(relay: Arc<PromptRelay>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // All methods land on the relay so it owns the 405, not the router
        .route("/api/generate", any(generate_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(RelayState { relay })
}

/// Run the relay server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.provider.resolved_api_key();
    if api_key.is_none() {
        tracing::warn!(
            "No provider API key configured; generate requests will be rejected with 500"
        );
    }

    let client = HttpProviderClient::new(&config.provider)?;
    let relay = PromptRelay::new(
        api_key,
        config.provider.system_instruction.clone(),
        Arc::new(client),
    );

    let app = build_router(Arc::new(relay));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("prompt-relay listening on {}", addr);
    tracing::info!("Relaying to {}", config.provider.base_url());

    Ok(axum::serve(listener, app).await?)
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Adapt the axum request to the platform-neutral relay contract
async fn generate_handler(
    State(state): State<RelayState>,
    req: axum::extract::Request,
) -> Response {
    let method = req.method().as_str().to_string();

    let body_bytes = match to_bytes(req.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read request body");
            return RawResponse::error(400, &format!("Failed to read request body: {}", e))
                .into_axum();
        }
    };

    let raw = state
        .relay
        .handle(RawRequest {
            method,
            body: body_bytes.to_vec(),
        })
        .await;

    raw.into_axum()
}

impl RawResponse {
    /// Adapt the platform-neutral response to an axum response
    fn into_axum(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, self.content_type)],
            Body::from(self.body),
        )
            .into_response()
    }
}
