//! prompt-relay: HTTP gateway for the Gemini generateContent API
//!
//! Features:
//! - Single POST endpoint accepting `{ "prompt": "..." }`
//! - Fixed system instruction and google_search tool added to every call
//! - Provider responses (success or error) relayed with status preserved
//! - Typed error taxonomy mapped centrally to HTTP responses

pub mod config;
pub mod provider;
pub mod relay;

pub use config::AppConfig;
pub use relay::{run_server, PromptRelay, RawRequest, RawResponse, RelayError};
