//! Prompt relay: validation, payload construction and response mapping

mod error;
mod handler;
mod server;

pub use error::RelayError;
pub use handler::{PromptRelay, PromptRequest, RawRequest, RawResponse};
pub use server::{build_router, run_server, RelayState};
