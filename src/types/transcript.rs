use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Who a transcript entry belongs to.
///
/// Unlike the wire roles, a transcript can also carry `Error` entries so
/// that failed turns stay visible in the conversation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The user typed it.
    User,

    /// The backend generated it.
    Assistant,

    /// A turn failed; the failure description is the content.
    Error,
}

/// One entry in a conversation transcript.
///
/// Entries are immutable once created; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who produced this entry.
    pub speaker: Speaker,

    /// The text of the entry.
    pub content: String,

    /// When the entry was appended, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::utils::time")]
    pub timestamp: Option<OffsetDateTime>,
}

impl TranscriptEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            timestamp: Some(OffsetDateTime::now_utc()),
        }
    }

    /// Create a new user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    /// Create a new assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }

    /// Create a new error entry.
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Speaker::Error, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_speaker_and_timestamp() {
        let entry = TranscriptEntry::user("hi");
        assert_eq!(entry.speaker, Speaker::User);
        assert_eq!(entry.content, "hi");
        assert!(entry.timestamp.is_some());

        assert_eq!(TranscriptEntry::assistant("yo").speaker, Speaker::Assistant);
        assert_eq!(TranscriptEntry::error("Error: x").speaker, Speaker::Error);
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let entry = TranscriptEntry {
            speaker: Speaker::Assistant,
            content: "Hello!".to_string(),
            timestamp: Some(time::macros::datetime!(2025-02-19 0:00:00 UTC)),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            json!({
                "speaker": "assistant",
                "content": "Hello!",
                "timestamp": "2025-02-19T00:00:00Z"
            })
        );
    }

    #[test]
    fn missing_timestamp_tolerated() {
        let entry: TranscriptEntry = serde_json::from_value(json!({
            "speaker": "error",
            "content": "Error: backend unreachable"
        }))
        .unwrap();
        assert_eq!(entry.speaker, Speaker::Error);
        assert!(entry.timestamp.is_none());
    }
}
