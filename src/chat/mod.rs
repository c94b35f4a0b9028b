//! Chat application module for interactive conversations with an
//! Open WebUI-compatible backend.
//!
//! This module provides a REPL chat interface built on top of the parley
//! client library. It supports:
//!
//! - A model catalog with explicit activation
//! - Slash commands for session control
//! - Full-history or latest-turn-only request payloads
//! - Transcript save/load
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core conversation session management
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::ConversationSession;
