//! OpenAI-compatible request/response types.

pub mod chat;
pub mod common;

pub use chat::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse};
pub use common::{ChatMessage, Role};
