//! Chat types shared by the gateway and the provider dispatcher.
//!
//! These model the OpenAI chat-completions format that all three upstream
//! providers speak, plus the looser shape accepted on `POST /generate`.

use serde::{Deserialize, Serialize};

/// Default `max_tokens` when the caller doesn't supply one.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Default sampling temperature when the caller doesn't supply one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// One role/content pair of a conversation.
///
/// The role is kept as a free-form string; it is forwarded verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a user message with text content.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a system message with text content.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Message content — plain text, or provider-specific multipart objects
/// (images etc.) which are passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<serde_json::Value>),
}

// ─────────────────────────────────────────────
// Inbound payload
// ─────────────────────────────────────────────

/// Body of `POST /generate`.
///
/// Either `messages` or `prompt` carries the conversation; when both are
/// present `messages` wins.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub messages: Option<Vec<ChatMessage>>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl GenerateRequest {
    /// Normalize into a [`ChatRequest`], applying defaults.
    pub fn into_chat_request(self) -> ChatRequest {
        let messages = match self.messages {
            Some(messages) => messages,
            None => vec![ChatMessage::user(self.prompt.unwrap_or_default())],
        };

        ChatRequest {
            messages,
            model: self.model.filter(|m| !m.trim().is_empty()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}

/// A normalized chat request, ready for dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    /// Conversation, in order.
    pub messages: Vec<ChatMessage>,
    /// Model override; `None` means the provider's default model.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    /// Single-prompt request with default parameters.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        GenerateRequest {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
        .into_chat_request()
    }
}

// ─────────────────────────────────────────────
// Outbound payload
// ─────────────────────────────────────────────

/// Request body for `/chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f64,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_becomes_single_user_message() {
        let req: GenerateRequest = serde_json::from_value(json!({"prompt": "Hi there"})).unwrap();
        let chat = req.into_chat_request();

        assert_eq!(chat.messages, vec![ChatMessage::user("Hi there")]);
        assert_eq!(chat.max_tokens, 512);
        assert_eq!(chat.temperature, 0.7);
        assert!(chat.model.is_none());
    }

    #[test]
    fn test_messages_win_over_prompt() {
        let req: GenerateRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hello"}
            ],
            "prompt": "ignored"
        }))
        .unwrap();
        let chat = req.into_chat_request();

        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0], ChatMessage::system("Be brief."));
        assert_eq!(chat.messages[1].role, "user");
    }

    #[test]
    fn test_empty_payload_is_empty_prompt() {
        let chat = GenerateRequest::default().into_chat_request();
        assert_eq!(chat.messages, vec![ChatMessage::user("")]);
    }

    #[test]
    fn test_overrides_are_kept() {
        let req: GenerateRequest = serde_json::from_value(json!({
            "prompt": "x",
            "model": "mixtral-8x7b",
            "max_tokens": 64,
            "temperature": 0.1
        }))
        .unwrap();
        let chat = req.into_chat_request();

        assert_eq!(chat.model.as_deref(), Some("mixtral-8x7b"));
        assert_eq!(chat.max_tokens, 64);
        assert_eq!(chat.temperature, 0.1);
    }

    #[test]
    fn test_blank_model_means_default() {
        let req: GenerateRequest =
            serde_json::from_value(json!({"prompt": "x", "model": "  "})).unwrap();
        assert!(req.into_chat_request().model.is_none());
    }

    #[test]
    fn test_multipart_content_passes_through() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "role": "user",
            "content": [{"type": "text", "text": "look"}]
        }))
        .unwrap();
        assert!(matches!(msg.content, MessageContent::Parts(ref p) if p.len() == 1));

        let back = serde_json::to_value(&msg).unwrap();
        assert_eq!(back["content"][0]["text"], "look");
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<GenerateRequest>(json!({"max_tokens": "lots"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_completion_request_serialization() {
        let messages = vec![ChatMessage::user("Hello")];
        let body = ChatCompletionRequest {
            model: "deepseek-chat",
            messages: &messages,
            max_tokens: 512,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "Hello"}],
                "max_tokens": 512,
                "temperature": 0.7
            })
        );
    }
}
