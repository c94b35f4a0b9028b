//! Logging trait for backend client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log API interactions passing through the [`OpenWebUi`]
//! client.
//!
//! [`OpenWebUi`]: crate::OpenWebUi

use crate::types::{ChatCompletionResponse, ModelDescriptor};

/// A trait for logging backend client operations.
///
/// Implement this trait to capture and record successful API interactions.
///
/// # Example
///
/// ```rust,ignore
/// use parley::{ChatCompletionResponse, ClientLogger, ModelDescriptor};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_models_response(&self, models: &[ModelDescriptor]) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Models: {}", serde_json::to_string(models).unwrap()).unwrap();
///     }
///
///     fn log_chat_response(&self, response: &ChatCompletionResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Chat: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a successful catalog fetch.
    ///
    /// Called once per successful `list_models` call with the parsed
    /// catalog.
    fn log_models_response(&self, models: &[ModelDescriptor]);

    /// Log a successful chat completion.
    ///
    /// Called once per successful `chat` call with the parsed response.
    fn log_chat_response(&self, response: &ChatCompletionResponse);
}
