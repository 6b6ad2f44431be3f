//! `multipart/form-data` encoding for create and update requests.

use crate::error::ApiError;
use crate::types::TodoForm;

/// Boundary used for every encoded form. Image bytes must not contain it.
pub const BOUNDARY: &str = "todo-core-form-boundary-5f1c8a";

/// `Content-Type` header value matching [`encode_form`] output.
pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Encode `form` as a multipart body. Absent text fields are skipped.
pub fn encode_form(form: &TodoForm) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();

    if let Some(title) = &form.title {
        write_text(&mut body, "title", title);
    }
    if let Some(description) = &form.description {
        write_text(&mut body, "description", description);
    }
    if let Some(subtasks) = &form.subtasks {
        let json = serde_json::to_string(subtasks)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        write_text(&mut body, "subtasks", &json);
    }
    for image in &form.images {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\n",
                escape_quoted(&image.file_name)
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.content_type).as_bytes());
        body.extend_from_slice(&image.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Ok(body)
}

fn write_text(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

/// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
