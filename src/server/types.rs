use serde::{Deserialize, Serialize};

/// Body of `POST /ask`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful reply of `POST /ask`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub question: String,
    pub processed_question: String,
    pub tokens: Vec<String>,
    pub answer: String,
}

/// Reply for rejected requests
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
