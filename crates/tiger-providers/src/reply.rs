//! Assistant reply extraction.
//!
//! Upstream bodies are kept opaque; the only thing we pull out is a
//! human-readable reply from the first choice, if it has one of the two
//! conventional shapes.

use serde::Deserialize;
use serde_json::Value;

/// The recognised shapes of `choices[0]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyShape {
    /// Chat-completions shape: `{"message": {"content": ...}}`.
    ChatMessage { message: MessageBody },
    /// Legacy completions shape: `{"text": ...}`.
    CompletionText { text: Value },
    /// Anything else, including a missing or empty `choices` array.
    #[serde(skip_deserializing)]
    Unknown,
}

/// The `message` object of a chat choice. `content` must be present
/// (it may be `null`) for the choice to count as a chat message.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MessageBody {
    pub content: Value,
}

impl ReplyShape {
    /// Decode the shape of the first choice of an upstream body.
    pub fn from_body(body: &Value) -> Self {
        body.get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|first| ReplyShape::deserialize(first).ok())
            .unwrap_or(ReplyShape::Unknown)
    }

    /// The reply text, if the shape carries a string.
    pub fn into_content(self) -> Option<String> {
        let value = match self {
            ReplyShape::ChatMessage { message } => message.content,
            ReplyShape::CompletionText { text } => text,
            ReplyShape::Unknown => return None,
        };
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Shorthand for `ReplyShape::from_body(body).into_content()`.
pub fn extract_content(body: &Value) -> Option<String> {
    ReplyShape::from_body(body).into_content()
}
