//! Error types for the todo API client.
//!
//! `NotFound` and `BadRequest` get dedicated variants because callers act on
//! them: a missing todo, or a form the server rejected (usually malformed
//! subtasks). Every other non-success response lands in `HttpError`.

use std::fmt;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    NotFound,

    /// The server returned 400 with this message.
    BadRequest(String),

    /// The server returned a non-2xx status other than 400 or 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
