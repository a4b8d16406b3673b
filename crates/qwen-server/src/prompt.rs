//! Conversation-to-prompt translation.

use qwen_engine::SamplingConfig;

use crate::models::ChatMessage;

/// Flatten a conversation into a single prompt and pick the stop set.
///
/// Each message becomes one `[<Role>]: <content>` line in original order;
/// the trailing `[Assistant]:` (no newline) cues the engine to produce an
/// assistant turn. The requested stop set wins when non-empty; otherwise
/// the default `[User]:` stop keeps the engine from writing the user's
/// next turn as well.
///
/// Pure and deterministic — identical input yields byte-identical output.
pub fn format_prompt(
    messages: &[ChatMessage],
    requested_stop: &[String],
) -> (String, Vec<String>) {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(&format!(
            "[{}]: {}\n",
            message.role.prompt_tag(),
            message.content
        ));
    }
    prompt.push_str("[Assistant]:");

    let stop = if requested_stop.is_empty() {
        vec![SamplingConfig::DEFAULT_STOP.to_string()]
    } else {
        requested_stop.to_vec()
    };

    (prompt, stop)
}
