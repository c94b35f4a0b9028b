//! Core conversation session management.
//!
//! This module provides the `ConversationSession` struct which owns the
//! transcript and mediates every exchange with the backend.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::chat::config::ChatConfig;
use crate::client::OpenWebUi;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatCompletionRequest, ChatMessage, ModelDescriptor, Speaker, TranscriptEntry};

/// A conversation session that owns the transcript and mediates backend
/// exchanges.
///
/// Every failure path of a turn terminates in a transcript append rather
/// than a raised fault, so the transcript is always renderable and the
/// driving loop never needs to special-case a broken turn. Exclusive
/// `&mut self` access is the critical section: interleaved appends are
/// impossible without an explicit lock.
pub struct ConversationSession {
    transcript: Vec<TranscriptEntry>,
    include_history: bool,
    transcript_path: Option<PathBuf>,
}

impl ConversationSession {
    /// Creates a new session with an empty transcript.
    ///
    /// History is included in outgoing requests by default.
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            include_history: true,
            transcript_path: None,
        }
    }

    /// Creates a new session from a chat configuration.
    pub fn with_config(config: &ChatConfig) -> Self {
        Self {
            transcript: Vec::new(),
            include_history: config.include_history,
            transcript_path: config.transcript_path.clone(),
        }
    }

    /// Submits one user turn and returns the updated transcript.
    ///
    /// This method:
    /// 1. Appends a single error entry and returns immediately, without
    ///    contacting the backend, when no model is active
    /// 2. Appends the user entry
    /// 3. Sends the chat request using the active model
    /// 4. Appends the assistant reply, or an error entry describing the
    ///    failure
    ///
    /// Success and failure both terminate with a valid, renderable
    /// transcript; no fault propagates out of this method.
    pub async fn submit_user_turn(
        &mut self,
        client: &OpenWebUi,
        text: &str,
        active: Option<&ModelDescriptor>,
    ) -> &[TranscriptEntry] {
        observability::SESSION_TURNS.click();
        let Some(model) = active else {
            observability::SESSION_TURN_ERRORS.click();
            self.transcript
                .push(TranscriptEntry::error("Error: no model selected"));
            return &self.transcript;
        };

        self.transcript.push(TranscriptEntry::user(text));

        let request = ChatCompletionRequest::new(&model.id, self.outgoing_messages(text));
        match client.chat(request).await {
            Ok(response) => match response.into_first_content() {
                Some(content) => {
                    self.transcript.push(TranscriptEntry::assistant(content));
                }
                None => {
                    observability::SESSION_TURN_ERRORS.click();
                    self.transcript.push(TranscriptEntry::error(
                        "Error: response contained no completion choices",
                    ));
                }
            },
            Err(err) => {
                observability::SESSION_TURN_ERRORS.click();
                self.transcript
                    .push(TranscriptEntry::error(format!("Error: {err}")));
            }
        }

        &self.transcript
    }

    /// The messages to send for the turn currently being submitted.
    ///
    /// With history enabled this is every user and assistant entry in
    /// order (error entries are never sent); otherwise only the latest
    /// user turn goes out and the backend sees no prior context.
    fn outgoing_messages(&self, latest: &str) -> Vec<ChatMessage> {
        if self.include_history {
            self.transcript
                .iter()
                .filter_map(|entry| match entry.speaker {
                    Speaker::User => Some(ChatMessage::user(entry.content.clone())),
                    Speaker::Assistant => Some(ChatMessage::assistant(entry.content.clone())),
                    Speaker::Error => None,
                })
                .collect()
        } else {
            vec![ChatMessage::user(latest)]
        }
    }

    /// Clears the transcript. No backend interaction.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Returns the current transcript.
    pub fn history(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Returns the number of entries in the transcript.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns whether outgoing requests carry the accumulated history.
    pub fn include_history(&self) -> bool {
        self.include_history
    }

    /// Sets whether outgoing requests carry the accumulated history.
    pub fn set_include_history(&mut self, include_history: bool) {
        self.include_history = include_history;
    }

    /// Sets the auto-save transcript path.
    pub fn set_transcript_path(&mut self, path: Option<PathBuf>) {
        self.transcript_path = path;
    }

    /// Returns the configured transcript path, if any.
    pub fn transcript_path(&self) -> Option<&Path> {
        self.transcript_path.as_deref()
    }

    /// Saves the transcript to the specified path.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let transcript = TranscriptFile::new(&self.transcript);
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &transcript).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }

    /// Loads a transcript from disk, replacing the current transcript.
    pub fn load_transcript_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path.as_ref())
            .map_err(|err| Error::io("failed to open transcript file", err))?;
        let reader = BufReader::new(file);
        let transcript: TranscriptFile = from_reader(reader).map_err(|err| {
            Error::serialization("failed to parse transcript", Some(Box::new(err)))
        })?;
        self.transcript = transcript.entries;
        Ok(())
    }

    /// Saves to the auto-save path, if one is configured.
    ///
    /// Auto-save failures surface here, to the caller; they never become
    /// transcript entries, which only record conversation and backend
    /// failures.
    pub fn auto_save_transcript(&self) -> Result<()> {
        if let Some(path) = &self.transcript_path {
            self.save_transcript_to(path)
        } else {
            Ok(())
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    entries: Vec<TranscriptEntry>,
}

impl TranscriptFile {
    fn new(entries: &[TranscriptEntry]) -> Self {
        Self {
            version: 1,
            entries: entries.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> OpenWebUi {
        // Unroutable port; only used on paths that never reach the network.
        OpenWebUi::with_options(
            Some("test-key".to_string()),
            Some("http://127.0.0.1:1".to_string()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_session_empty() {
        let session = ConversationSession::new();
        assert_eq!(session.message_count(), 0);
        assert!(session.include_history());
    }

    #[test]
    fn clear_session() {
        let mut session = ConversationSession::new();
        session.transcript.push(TranscriptEntry::user("test"));
        assert_eq!(session.message_count(), 1);

        session.clear();
        assert_eq!(session.message_count(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn no_active_model_appends_single_error_entry() {
        let client = offline_client();
        let mut session = ConversationSession::new();

        let transcript =
            tokio_test::block_on(session.submit_user_turn(&client, "hi", None)).to_vec();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].speaker, Speaker::Error);
        assert!(transcript[0].content.contains("model"));
    }

    #[test]
    fn outgoing_messages_with_history() {
        let mut session = ConversationSession::new();
        session.transcript.push(TranscriptEntry::user("one"));
        session.transcript.push(TranscriptEntry::assistant("two"));
        session.transcript.push(TranscriptEntry::error("Error: x"));
        session.transcript.push(TranscriptEntry::user("three"));

        let messages = session.outgoing_messages("three");
        assert_eq!(
            messages,
            vec![
                ChatMessage::user("one"),
                ChatMessage::assistant("two"),
                ChatMessage::user("three"),
            ]
        );
    }

    #[test]
    fn outgoing_messages_without_history() {
        let mut session = ConversationSession::new();
        session.set_include_history(false);
        session.transcript.push(TranscriptEntry::user("one"));
        session.transcript.push(TranscriptEntry::assistant("two"));
        session.transcript.push(TranscriptEntry::user("three"));

        let messages = session.outgoing_messages("three");
        assert_eq!(messages, vec![ChatMessage::user("three")]);
    }

    #[test]
    fn transcript_round_trips_through_disk() {
        let mut session = ConversationSession::new();
        session.transcript.push(TranscriptEntry::user("hi"));
        session.transcript.push(TranscriptEntry::assistant("Hello!"));

        let dir = std::env::temp_dir().join("parley-session-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("transcript.json");
        session.save_transcript_to(&path).unwrap();

        let mut restored = ConversationSession::new();
        restored.load_transcript_from(&path).unwrap();
        assert_eq!(restored.history(), session.history());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn auto_save_without_path_is_noop() {
        let session = ConversationSession::new();
        assert!(session.auto_save_transcript().is_ok());
    }
}
