use serde::{Deserialize, Serialize};

/// A single message on the wire, as the chat completions endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: ChatRole,

    /// The content of the message.
    pub content: String,
}

/// Role type for a wire message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given role and content.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user `ChatMessage`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create a new assistant `ChatMessage`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

impl From<&str> for ChatMessage {
    fn from(content: &str) -> Self {
        Self::user(content)
    }
}

impl From<String> for ChatMessage {
    fn from(content: String) -> Self {
        Self::user(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn chat_message_serialization() {
        let message = ChatMessage::user("hi there");
        let json = to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "user",
                "content": "hi there"
            })
        );
    }

    #[test]
    fn chat_message_deserialization() {
        let json = json!({
            "role": "assistant",
            "content": "Hello!"
        });

        let message: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(message.content, "Hello!");
    }

    #[test]
    fn chat_message_from_str() {
        let message: ChatMessage = "hi".into();
        assert_eq!(message.role, ChatRole::User);

        let message = ChatMessage::from("hello".to_string());
        assert_eq!(message.role, ChatRole::User);
    }
}
