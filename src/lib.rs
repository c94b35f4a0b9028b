// Public modules
pub mod catalog;
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod types;
pub mod utils;

// Re-exports
pub use catalog::ModelCatalog;
pub use client::OpenWebUi;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use types::*;
