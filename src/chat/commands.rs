//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the session without sending messages to the
//! backend.

/// A parsed chat command.
///
/// These commands control the session and are not sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the conversation history.
    Clear,

    /// Activate a model by id.
    Model(String),

    /// List the cached catalog.
    Models,

    /// Re-fetch the catalog from the backend.
    Refresh,

    /// Toggle whether requests carry the accumulated history.
    History(bool),

    /// Save the transcript to a specific file immediately.
    SaveTranscript(String),

    /// Load a transcript from a file.
    LoadTranscript(String),

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use parley::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model gpt-b").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model id".to_string()),
        },
        "models" => ChatCommand::Models,
        "refresh" => ChatCommand::Refresh,
        "history" => match argument.and_then(parse_on_off) {
            Some(on) => ChatCommand::History(on),
            None => ChatCommand::Invalid("/history expects on or off".to_string()),
        },
        "save" => match argument {
            Some(path) => ChatCommand::SaveTranscript(path.to_string()),
            None => ChatCommand::Invalid("/save requires a file path".to_string()),
        },
        "load" => match argument {
            Some(path) => ChatCommand::LoadTranscript(path.to_string()),
            None => ChatCommand::Invalid("/load requires a file path".to_string()),
        },
        "stats" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{command}")),
    };

    Some(result)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Clear conversation history
  /model <id>            Activate a model (e.g., /model gpt-b)
  /models                List the cached model catalog
  /refresh               Re-fetch the model catalog from the backend
  /history on|off        Send full history or only the latest turn
  /save <file>           Save the current transcript immediately
  /load <file>           Load a transcript from disk
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_model() {
        assert_eq!(
            parse_command("/model gpt-b"),
            Some(ChatCommand::Model("gpt-b".to_string()))
        );
        assert_eq!(
            parse_command("/model   llama3:8b  "),
            Some(ChatCommand::Model("llama3:8b".to_string()))
        );
        assert_eq!(
            parse_command("/model"),
            Some(ChatCommand::Invalid("/model requires a model id".to_string()))
        );
    }

    #[test]
    fn parse_models_and_refresh() {
        assert_eq!(parse_command("/models"), Some(ChatCommand::Models));
        assert_eq!(parse_command("/refresh"), Some(ChatCommand::Refresh));
    }

    #[test]
    fn parse_history_toggle() {
        assert_eq!(
            parse_command("/history on"),
            Some(ChatCommand::History(true))
        );
        assert_eq!(
            parse_command("/history off"),
            Some(ChatCommand::History(false))
        );
        assert!(matches!(
            parse_command("/history maybe"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("expects")
        ));
    }

    #[test]
    fn parse_transcript_commands() {
        assert_eq!(
            parse_command("/save session.json"),
            Some(ChatCommand::SaveTranscript("session.json".to_string()))
        );
        assert_eq!(
            parse_command("/load session.json"),
            Some(ChatCommand::LoadTranscript("session.json".to_string()))
        );
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("frobnicate")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello there!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/model"));
        assert!(help.contains("/history"));
    }
}
