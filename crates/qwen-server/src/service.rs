//! Per-request orchestration: format the prompt, run the pool, wrap the
//! response envelope.

use std::sync::Arc;

use chrono::Utc;

use qwen_engine::SamplingConfig;
use qwen_runtime::EnginePool;

use crate::models::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role};
use crate::prompt::format_prompt;

/// Response id. The façade serves a single local model, so the id is a
/// constant rather than a per-request token.
const COMPLETION_ID: &str = "chatcmpl-local-qwen";

/// Orchestrates one chat-completion request end to end.
///
/// Infallible once invoked: validation happens at the HTTP boundary, and a
/// degraded (empty-text) generation still produces a well-formed response.
/// No retries — one engine attempt per request.
#[derive(Clone)]
pub struct CompletionService {
    pool: Arc<EnginePool>,
}

impl CompletionService {
    pub fn new(pool: Arc<EnginePool>) -> Self {
        Self { pool }
    }

    /// Translate the conversation, run generation off the request path,
    /// and assemble the response envelope.
    pub async fn complete(&self, request: ChatCompletionRequest) -> ChatCompletionResponse {
        let requested_stop = request.stop.unwrap_or_default();
        let (prompt, stop) = format_prompt(&request.messages, &requested_stop);

        let config = SamplingConfig {
            temperature: request
                .temperature
                .unwrap_or(SamplingConfig::DEFAULT_TEMPERATURE),
            top_p: SamplingConfig::NUCLEUS_TOP_P,
            max_tokens: request
                .max_tokens
                .unwrap_or(SamplingConfig::DEFAULT_MAX_TOKENS),
            stop,
        };

        tracing::debug!(
            prompt_chars = prompt.len(),
            max_tokens = config.max_tokens,
            "dispatching generation"
        );
        let text = self.pool.generate(prompt, config).await;

        ChatCompletionResponse {
            id: COMPLETION_ID.to_string(),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp() as u64,
            model: request.model,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: Role::Assistant,
                    content: text.trim().to_string(),
                },
                finish_reason: "stop".to_string(),
            }],
        }
    }
}
