use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletionRequest {
    /// The model identifier to use.
    pub model: String,

    /// The messages to complete from.
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Create a new `ChatCompletionRequest`.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

/// A single choice in a completion response.
///
/// Backends attach additional fields (`index`, `finish_reason`); only the
/// message itself matters here and unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
}

/// Response body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletionResponse {
    /// Generated choices, in backend order.
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice's message, if the backend produced one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }

    /// Consume the response, yielding the first choice's content.
    pub fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
    }
}
