//! Interactive chat application for conversing with an Open WebUI-compatible
//! backend.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against OPENWEBUI_API_URL / OPENWEBUI_API_KEY
//! parley-chat
//!
//! # Point at a specific backend and model
//! parley-chat --url http://localhost:8080 --model llama3:8b
//!
//! # Send only the latest turn instead of the full history
//! parley-chat --no-history
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/models` - List the cached model catalog
//! - `/model <id>` - Activate a model
//! - `/refresh` - Re-fetch the catalog
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use parley::chat::{
    ChatArgs, ChatCommand, ChatConfig, ConversationSession, help_text, parse_command,
};
use parley::types::{Speaker, TranscriptEntry};
use parley::{ModelCatalog, OpenWebUi};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Main entry point for the parley-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("parley-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = OpenWebUi::with_options(config.api_key.clone(), config.base_url.clone(), None)?;
    let mut catalog = ModelCatalog::new();
    let mut session = ConversationSession::with_config(&config);
    let mut rl = DefaultEditor::new()?;

    match catalog.refresh(&client).await {
        Ok(models) => println!("Fetched {} models from {}", models.len(), client.base_url()),
        Err(err) => print_error(use_color, &format!("Could not fetch models: {err}")),
    }
    if let Some(model_id) = &config.model {
        match catalog.set_active(model_id) {
            Ok(()) => {}
            Err(err) => print_error(use_color, &err.to_string()),
        }
    }

    match catalog.active_model() {
        Some(model) => println!("Parley Chat (model: {model})"),
        None => println!("Parley Chat (no model selected; use /models and /model <id>)"),
    }
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            println!("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Models => {
                            print_models(&catalog);
                        }
                        ChatCommand::Refresh => match catalog.refresh(&client).await {
                            Ok(models) => println!("Catalog refreshed: {} models", models.len()),
                            Err(err) => print_error(use_color, &err.to_string()),
                        },
                        ChatCommand::Model(model_id) => match catalog.set_active(&model_id) {
                            Ok(()) => {
                                if let Some(model) = catalog.active_model() {
                                    println!("Model changed to: {model}");
                                }
                            }
                            Err(err) => print_error(use_color, &err.to_string()),
                        },
                        ChatCommand::History(on) => {
                            session.set_include_history(on);
                            if on {
                                println!("Requests now carry the full history.");
                            } else {
                                println!("Requests now carry only the latest turn.");
                            }
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match session.save_transcript_to(&path) {
                                Ok(()) => println!("Transcript saved to {}", path),
                                Err(err) => print_error(
                                    use_color,
                                    &format!("Failed to save transcript: {err}"),
                                ),
                            }
                        }
                        ChatCommand::LoadTranscript(path) => {
                            match session.load_transcript_from(&path) {
                                Ok(()) => println!("Transcript loaded from {}", path),
                                Err(err) => print_error(
                                    use_color,
                                    &format!("Failed to load transcript: {err}"),
                                ),
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&catalog, &session);
                        }
                        ChatCommand::Invalid(message) => {
                            print_error(use_color, &message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend
                let before = session.message_count();
                session
                    .submit_user_turn(&client, line, catalog.active_model())
                    .await;
                for entry in &session.history()[before..] {
                    print_entry(use_color, entry);
                }
                if let Err(err) = session.auto_save_transcript() {
                    print_error(use_color, &format!("Failed to auto-save transcript: {err}"));
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                print_error(use_color, &format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_entry(use_color: bool, entry: &TranscriptEntry) {
    match entry.speaker {
        Speaker::User => {}
        Speaker::Assistant => println!("Assistant: {}", entry.content),
        Speaker::Error => print_error(use_color, &entry.content),
    }
}

fn print_models(catalog: &ModelCatalog) {
    if catalog.is_empty() {
        println!("    (catalog is empty; try /refresh)");
        return;
    }
    let active_id = catalog.active_model().map(|model| model.id.clone());
    for model in catalog.models() {
        let marker = if Some(&model.id) == active_id.as_ref() {
            "*"
        } else {
            " "
        };
        println!("  {marker} {model}");
    }
}

fn print_stats(catalog: &ModelCatalog, session: &ConversationSession) {
    println!("    Session Statistics:");
    match catalog.active_model() {
        Some(model) => println!("      Model: {model}"),
        None => println!("      Model: (none selected)"),
    }
    println!("      Cached models: {}", catalog.models().len());
    println!("      Transcript entries: {}", session.message_count());
    println!(
        "      History in requests: {}",
        if session.include_history() { "full" } else { "latest turn only" }
    );
    match session.transcript_path() {
        Some(path) => println!("      Transcript file: {}", path.display()),
        None => println!("      Transcript file: (disabled)"),
    }
}

fn print_error(use_color: bool, message: &str) {
    if use_color {
        eprintln!("{RED}{message}{RESET}");
    } else {
        eprintln!("{message}");
    }
}
