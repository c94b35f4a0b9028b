// Public modules
pub mod chat_completion;
pub mod chat_message;
pub mod model_descriptor;
pub mod model_list_response;
pub mod transcript;

// Re-exports
pub use chat_completion::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse};
pub use chat_message::{ChatMessage, ChatRole};
pub use model_descriptor::ModelDescriptor;
pub use model_list_response::ModelListResponse;
pub use transcript::{Speaker, TranscriptEntry};
