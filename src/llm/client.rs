use async_trait::async_trait;
use thiserror::Error;

/// Why a single prompt/answer round trip failed.
///
/// Frontends render these as text; the variants let them log or surface
/// transport problems separately from provider rejections.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text ({0})")]
    Empty(String),
}

/// One remote call/response cycle with a generative-text provider.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Sends `prompt` verbatim and returns the generated text.
    async fn answer(&self, prompt: &str) -> Result<String, AnswerError>;
}
