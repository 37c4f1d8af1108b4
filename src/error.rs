use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found in Leganto: {0}")]
    NotFound(String),

    #[error("HTTP error {status}: {body}")]
    Transport { status: StatusCode, body: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No sis_user_id for Canvas user {0}")]
    MissingIdentity(u64),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Builds a `Transport` error from a non-success response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        AppError::Transport { status, body }
    }
}
