pub mod client;
pub mod gemini;
pub mod types;

pub use client::{AnswerClient, AnswerError};
pub use gemini::GeminiClient;
pub use types::ModelInfo;
