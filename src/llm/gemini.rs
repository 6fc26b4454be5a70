use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::GeminiConfig;
use super::client::{AnswerClient, AnswerError};
use super::types::{
    ApiErrorBody, GenerateContentRequest, GenerateContentResponse, ListModelsResponse, ModelInfo,
};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const MODELS_PAGE_SIZE: u32 = 100;

/// Client for the Gemini Generative Language REST API
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Builds a client from settings. A missing key is accepted here and
    /// reported by each call instead.
    pub fn new(config: &GeminiConfig) -> Result<Self, AnswerError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Model identifier sent with every generation call
    pub fn model(&self) -> &str {
        &self.model
    }

    fn key(&self) -> Result<&str, AnswerError> {
        self.api_key.as_deref().ok_or(AnswerError::MissingApiKey)
    }

    fn generate_url(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/{}/models/{}:generateContent", self.base_url, API_VERSION, model)
    }

    /// Lists every model visible to the configured key, following pagination.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, AnswerError> {
        let key = self.key()?;
        let url = format!("{}/{}/models", self.base_url, API_VERSION);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .header(API_KEY_HEADER, key)
                .query(&[("pageSize", MODELS_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = check_status(request.send().await?).await?;
            let page: ListModelsResponse = response.json().await?;
            debug!("Fetched {} models", page.models.len());
            models.extend(page.models);

            match page.next_page_token {
                Some(token) if !token.is_empty() && page_token.as_deref() != Some(token.as_str()) => {
                    page_token = Some(token)
                }
                Some(token) if !token.is_empty() => {
                    warn!("Server repeated page token '{}', stopping", token);
                    break;
                }
                _ => break,
            }
        }

        info!("Listed {} models", models.len());
        Ok(models)
    }
}

#[async_trait]
impl AnswerClient for GeminiClient {
    async fn answer(&self, prompt: &str) -> Result<String, AnswerError> {
        let key = self.key()?;
        debug!("Sending prompt to {} ({} chars)", self.model, prompt.len());

        let response = self
            .http
            .post(self.generate_url())
            .header(API_KEY_HEADER, key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let reply: GenerateContentResponse = check_status(response).await?.json().await?;
        match reply.text() {
            Some(text) => Ok(text),
            None => {
                let reason = reply.empty_reason();
                error!("Model returned no text: {}", reason);
                Err(AnswerError::Empty(reason))
            }
        }
    }
}

/// Turns non-2xx replies into [`AnswerError::Api`] with the provider's message
async fn check_status(response: Response) -> Result<Response, AnswerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = api_error_message(&body);
    error!("API error {}: {}", status, message);
    Err(AnswerError::Api { status: status.as_u16(), message })
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(status) => format!("{} ({})", parsed.error.message, status),
            None => parsed.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
