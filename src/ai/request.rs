//! Request payload construction for both schemas.

use serde_json::{Value, json};

use crate::core::config::ClientConfig;
use crate::core::models::Schema;

/// The user turn sent to the model. No escaping beyond JSON encoding.
#[must_use]
pub fn user_message(author: &str, content: &str) -> String {
    format!("Commenter Name: {author}\nComment Content: {content}")
}

/// Builds the POST body for `schema`.
///
/// The Responses variant sends the same system/user message list as `input`
/// instead of a single string; several compatible providers ignore system
/// instructions otherwise.
#[must_use]
pub fn build_request_body(schema: Schema, config: &ClientConfig, author: &str, content: &str) -> Value {
    let messages = json!([
        { "role": "system", "content": config.system_prompt() },
        { "role": "user", "content": user_message(author, content) }
    ]);

    match schema {
        Schema::ChatCompletions => json!({
            "model": config.model_id(),
            "messages": messages,
            "temperature": config.temperature()
        }),
        Schema::Responses => json!({
            "model": config.model_id(),
            "input": messages,
            "temperature": config.temperature(),
            "stream": false
        }),
    }
}
