use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{Html, IntoResponse, Response},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, warn, error};
use uuid::Uuid;

use super::server::AppState;
use super::types::{AskRequest, AskResponse, ErrorResponse};

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const NO_QUESTION: &str = "No question provided";

/// Serves the question form
pub async fn index() -> Html<&'static str> {
    info!("Index page requested");
    Html(INDEX_HTML)
}

/// Answers one question.
///
/// The question goes to the model as-is, without the instruction template the
/// CLI adds. Model failures are reported inside `answer` with status 200.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let question = match payload {
        Ok(Json(AskRequest { question: Some(q) })) if !q.trim().is_empty() => q,
        Ok(_) => {
            warn!(%request_id, "Ask called without a question");
            return bad_request();
        }
        Err(rejection) => {
            warn!(%request_id, "Rejected ask body: {}", rejection);
            return bad_request();
        }
    };

    info!(%request_id, "Ask endpoint called. Question: '{}'", question);

    let normalized = state.normalizer.normalize(&question);
    info!(%request_id, "Tokens: {:?}", normalized.tokens);

    let answer = match state.client.answer(&question).await {
        Ok(text) => {
            info!(%request_id, "Answer received ({} chars)", text.len());
            text
        }
        Err(e) => {
            error!(%request_id, "Failed to get answer: {}", e);
            format!("Error: {}", e)
        }
    };

    let response = AskResponse {
        question,
        processed_question: normalized.text,
        tokens: normalized.tokens,
        answer,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn bad_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: NO_QUESTION.to_string() }),
    )
        .into_response()
}
