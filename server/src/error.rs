//! Request-level errors and their HTTP status mapping.
//!
//! Every variant is terminal for the request. Responses are a status code with
//! a plain-text message body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::NotFound;

#[derive(Debug, Error)]
pub enum AppError {
    /// The multipart body could not be read.
    #[error("invalid form: {0}")]
    InvalidForm(String),

    /// The id path segment was missing.
    #[error("Invalid ID")]
    InvalidId,

    /// The `subtasks` field was not a JSON array of subtasks.
    #[error("Invalid subtasks format")]
    InvalidSubtasks(#[source] serde_json::Error),

    /// The body exceeded the configured upload limit.
    #[error("request body too large")]
    TooLarge,

    #[error("Todo not found")]
    NotFound,

    /// Saving an upload failed.
    #[error("failed to save upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NotFound> for AppError {
    fn from(_: NotFound) -> Self {
        AppError::NotFound
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId | AppError::InvalidForm(_) | AppError::InvalidSubtasks(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Io(e) => tracing::error!(error = %e, "request failed"),
            AppError::InvalidSubtasks(e) => tracing::debug!(error = %e, "rejected subtasks"),
            other => tracing::debug!(%status, error = %other, "request rejected"),
        }
        (status, self.to_string()).into_response()
    }
}
