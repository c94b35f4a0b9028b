//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

/// Command-line arguments for the parley-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend base URL.
    #[arrrg(
        optional,
        "Backend base URL (default: OPENWEBUI_API_URL or http://localhost:8080)",
        "URL"
    )]
    pub url: Option<String>,

    /// API key for the backend.
    #[arrrg(optional, "API key (default: OPENWEBUI_API_KEY)", "KEY")]
    pub api_key: Option<String>,

    /// Model to activate once the catalog is fetched.
    #[arrrg(optional, "Model id to activate at startup", "MODEL")]
    pub model: Option<String>,

    /// Send only the latest user turn instead of the full history.
    #[arrrg(flag, "Send only the latest turn, not the accumulated history")]
    pub no_history: bool,

    /// Auto-save the transcript after each turn.
    #[arrrg(optional, "Auto-save the transcript to this file after each turn", "FILE")]
    pub transcript: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a conversation session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults. Base URL and API key
/// stay optional here; the client falls back to its environment variables
/// when they are unset.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Backend base URL override.
    pub base_url: Option<String>,

    /// API key override.
    pub api_key: Option<String>,

    /// Model id to activate at startup, if any.
    pub model: Option<String>,

    /// Whether chat requests carry the accumulated history or only the
    /// latest user turn.
    pub include_history: bool,

    /// Path to persist transcripts automatically after each turn.
    pub transcript_path: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL / API key: resolved by the client from the environment
    /// - History: included
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: None,
            include_history: true,
            transcript_path: None,
            use_color: true,
        }
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the model to activate at startup.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets whether chat requests carry the accumulated history.
    pub fn with_include_history(mut self, include_history: bool) -> Self {
        self.include_history = include_history;
        self
    }

    /// Sets the transcript auto-save path.
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        self.transcript_path = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            base_url: args.url,
            api_key: args.api_key,
            model: args.model,
            include_history: !args.no_history,
            transcript_path: args.transcript.map(PathBuf::from),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.base_url.is_none());
        assert!(config.api_key.is_none());
        assert!(config.model.is_none());
        assert!(config.include_history);
        assert!(config.transcript_path.is_none());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert!(config.include_history);
        assert!(config.use_color);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            url: Some("https://chat.example.com".to_string()),
            api_key: Some("sk-test".to_string()),
            model: Some("gpt-b".to_string()),
            no_history: true,
            transcript: Some("chat.json".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, Some("https://chat.example.com".to_string()));
        assert_eq!(config.api_key, Some("sk-test".to_string()));
        assert_eq!(config.model, Some("gpt-b".to_string()));
        assert!(!config.include_history);
        assert_eq!(config.transcript_path, Some(PathBuf::from("chat.json")));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://localhost:3000".to_string())
            .with_api_key("sk-test".to_string())
            .with_model("gpt-a".to_string())
            .with_include_history(false)
            .with_transcript_path(Some(PathBuf::from("transcript.json")))
            .without_color();

        assert_eq!(config.base_url, Some("http://localhost:3000".to_string()));
        assert_eq!(config.api_key, Some("sk-test".to_string()));
        assert_eq!(config.model, Some("gpt-a".to_string()));
        assert!(!config.include_history);
        assert_eq!(
            config.transcript_path,
            Some(PathBuf::from("transcript.json"))
        );
        assert!(!config.use_color);
    }
}
