//! Groq chat completions API types.
//!
//! Request/response structures for the OpenAI-compatible wire format. These
//! are provider-specific HTTP types, not the engine's prompt payload.

use serde::{Deserialize, Serialize};

use mindmate_engine::prompt::PromptPayload;

/// A single message in a chat completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

impl ChatCompletionRequest {
    /// Build a request from the engine's prompt payload.
    ///
    /// The message list is always `[system, user]`: the prior transcript is
    /// never included.
    pub fn from_payload(model: &str, temperature: f64, payload: &PromptPayload) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: payload.system_instruction.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: payload.user_turn.clone(),
                },
            ],
            temperature,
        }
    }
}

/// One completion choice in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response body for `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub model: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PromptPayload {
        PromptPayload {
            system_instruction: "Be kind.".to_string(),
            user_turn: "I feel anxious".to_string(),
        }
    }

    #[test]
    fn test_request_carries_exactly_two_messages() {
        let req = ChatCompletionRequest::from_payload("llama3-70b-8192", 0.7, &payload());
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[0].content, "Be kind.");
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].content, "I feel anxious");
    }

    #[test]
    fn test_request_serialization_shape() {
        let req = ChatCompletionRequest::from_payload("llama3-70b-8192", 0.7, &payload());
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{
            "id": "chatcmpl-123",
            "model": "llama3-70b-8192",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Take a slow breath."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 50, "completion_tokens": 8}
        }"#;
        let resp: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.choices.len(), 1);
        assert_eq!(resp.choices[0].message.content, "Take a slow breath.");
        assert_eq!(resp.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.model.as_deref(), Some("llama3-70b-8192"));
    }

    #[test]
    fn test_response_with_no_choices_deserializes() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(resp.choices.is_empty());
    }
}
