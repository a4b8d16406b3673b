//! Chat completion handler.

use axum::{extract::State, Json};

use crate::{
    error::ServerError,
    models::{ChatCompletionRequest, ChatCompletionResponse},
    state::AppState,
};

/// Handle chat completion requests.
///
/// Unknown roles and malformed bodies never get this far — the axum `Json`
/// extractor rejects them. What's left to check here are the numeric
/// invariants serde cannot express. Past validation the pipeline cannot
/// fail, only degrade to empty content.
pub async fn handle_chat_completion(
    State(state): State<AppState>,
    Json(req): Json<ChatCompletionRequest>,
) -> Result<Json<ChatCompletionResponse>, ServerError> {
    validate(&req)?;
    Ok(Json(state.service.complete(req).await))
}

fn validate(req: &ChatCompletionRequest) -> Result<(), ServerError> {
    if let Some(t) = req.temperature {
        if t.is_nan() || t < 0.0 {
            return Err(ServerError::InvalidRequest(format!(
                "temperature must be non-negative (got {t})"
            )));
        }
    }
    if req.max_tokens == Some(0) {
        return Err(ServerError::InvalidRequest(
            "max_tokens must be positive".to_string(),
        ));
    }
    Ok(())
}
