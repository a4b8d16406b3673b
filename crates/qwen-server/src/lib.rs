//! # qwen-server
//!
//! OpenAI-compatible HTTP façade for a local text-generation engine.
//! Translates `/v1/chat/completions` requests into a single flat prompt,
//! hands it to the engine pool, and wraps whatever comes back in the
//! OpenAI response envelope. A degraded generation is still a 200 with
//! empty content; only malformed requests produce error responses.

pub mod error;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod server;
pub mod service;
pub mod state;

pub use error::ServerError;
pub use server::{create_router, run_server};
pub use service::CompletionService;
pub use state::AppState;
