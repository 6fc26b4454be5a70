use std::sync::Arc;
use std::error::Error;
use tokio::net::TcpListener;
use axum::{Router, routing::{get, post}};
use tracing::info;

use crate::llm::AnswerClient;
use crate::text::Normalizer;
use super::routes;

/// Shared, read-only state handed to every request
pub struct AppState {
    pub normalizer: Normalizer,
    pub client: Arc<dyn AnswerClient>,
}

/// Builds the application router: the form page and the ask endpoint
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/ask", post(routes::ask))
        .with_state(state)
}

/// HTTP server for the question form
pub struct ApiServer {
    state: Arc<AppState>,
    host: String,
    port: u16,
}

impl ApiServer {
    pub fn new(state: AppState, host: String, port: u16) -> Self {
        info!("Creating new API server on {}:{}", host, port);
        Self {
            state: Arc::new(state),
            host,
            port,
        }
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = router(Arc::clone(&self.state));

        info!("Starting server on {}:{}", self.host, self.port);
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;

        info!("Server started successfully");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
