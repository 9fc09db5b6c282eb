//! Wire models for the generative-text provider
//!
//! Request and response shapes for an OpenAI-compatible chat-completions
//! API. Only the fields the core consumes are modeled.

use serde::{Deserialize, Serialize};

/// Role tag on a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction
    System,
    /// User prompt
    User,
    /// Assistant reply
    Assistant,
}

/// One role-tagged message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: ChatRole,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,

    /// Role-tagged message sequence
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f64,

    /// Requested response format
    pub response_format: ResponseFormat,
}

/// Response format selector
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format type; the core always requests "json_object"
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// JSON-object output
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Returned completion choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatResponseMessage,
}

/// Message payload of a completion choice
#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    /// Generated content; may be absent on filtered responses
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extracts the first choice's content, if any
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::system("You are a medical education expert.");
        assert_eq!(msg.role, ChatRole::System);

        let msg = ChatMessage::user("Create a quiz.");
        assert_eq!(msg.role, ChatRole::User);
    }

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let request = ChatCompletionRequest {
            model: "gpt-4-turbo-preview".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.7,
            response_format: ResponseFormat::json_object(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"type\":\"json_object\""));
    }

    #[test]
    fn test_response_content_extraction() {
        let json = r#"{"choices":[{"message":{"content":"{\"title\":\"Quiz\"}"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.into_content().unwrap(),
            "{\"title\":\"Quiz\"}"
        );
    }

    #[test]
    fn test_response_without_choices() {
        let json = r#"{"choices":[]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_content().is_none());
    }

    #[test]
    fn test_response_with_null_content() {
        let json = r#"{"choices":[{"message":{"content":null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_content().is_none());
    }
}
