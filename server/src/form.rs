//! Decoding of the multipart body sent to create and update.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};

use crate::error::AppError;
use crate::files::Upload;

/// The text fields and files of a create/update request.
///
/// Text fields are `None` when the client did not send them. For repeated text
/// fields the first occurrence wins. Every `images` part that carries a
/// filename is kept, in order; `images` parts without one are plain text and
/// are ignored.
#[derive(Debug, Default)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtasks: Option<String>,
    pub images: Vec<Upload>,
}

impl TodoForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = TodoForm::default();
        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();
            let slot = match name.as_str() {
                "title" => &mut form.title,
                "description" => &mut form.description,
                "subtasks" => &mut form.subtasks,
                "images" if field.file_name().is_some_and(|n| !n.is_empty()) => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(form_error)?;
                    form.images.push(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                    continue;
                }
                other => {
                    tracing::debug!(field = other, "ignoring unknown form field");
                    continue;
                }
            };
            let text = field.text().await.map_err(form_error)?;
            if slot.is_none() {
                *slot = Some(text);
            }
        }
        Ok(form)
    }
}

fn form_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge
    } else {
        AppError::InvalidForm(e.body_text())
    }
}
