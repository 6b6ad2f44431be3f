//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so the
//! client does not pull in Axum. The integration test catches schema drift.

use serde::{Deserialize, Serialize};

/// A subtask as sent to and returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A single todo item returned by the API.
///
/// `completed` is computed by the server from `subtasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

/// An image to upload with a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Form payload for creating or updating a todo.
///
/// `None` text fields are not sent. On update the server keeps the current
/// title and description when they are missing, but always replaces
/// `subtasks` and `images` with what this form carries (empty when absent).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
    pub images: Vec<ImageFile>,
}
