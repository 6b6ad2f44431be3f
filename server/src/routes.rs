//! HTTP routes for the todo API.
//!
//! Create and update follow the same order: decode the form, parse the
//! subtasks, save every upload, and only then touch the store. A failure at
//! any step returns before the collection changes.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::error::AppError;
use crate::files::{save_all, FileSink};
use crate::form::TodoForm;
use crate::model::{parse_subtasks, Subtask, Todo};
use crate::store::{NewTodo, TodoPatch, TodoStore};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub sink: Arc<dyn FileSink>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<TodoStore>, sink: Arc<dyn FileSink>) -> Self {
        Self {
            store,
            sink,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}

pub fn app(state: AppState) -> Router {
    let limit = state.max_upload_bytes;
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", any(missing_id))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.store.list().await)
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, AppError> {
    Ok(Json(state.store.get(id).await?))
}

async fn create_todo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let form = read_form(multipart).await?;
    let subtasks = subtasks_from(&form)?;
    let images = save_all(state.sink.as_ref(), &form.images).await?;

    let todo = state
        .store
        .create(NewTodo {
            title: form.title.unwrap_or_default(),
            description: form.description.unwrap_or_default(),
            subtasks,
            images,
        })
        .await;
    tracing::info!(id = todo.id, images = todo.images.len(), "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Todo>, AppError> {
    // unknown ids are rejected before any upload is written
    state.store.get(id).await?;

    let form = read_form(multipart).await?;
    let subtasks = subtasks_from(&form)?;
    let images = save_all(state.sink.as_ref(), &form.images).await?;

    let todo = state
        .store
        .update(
            id,
            TodoPatch {
                title: form.title,
                description: form.description,
                subtasks,
                images,
            },
        )
        .await?;
    tracing::info!(id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    tracing::info!(id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

async fn missing_id() -> AppError {
    AppError::InvalidId
}

async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<TodoForm, AppError> {
    let multipart = multipart.map_err(|e| AppError::InvalidForm(e.body_text()))?;
    TodoForm::from_multipart(multipart).await
}

fn subtasks_from(form: &TodoForm) -> Result<Vec<Subtask>, AppError> {
    parse_subtasks(form.subtasks.as_deref().unwrap_or_default()).map_err(AppError::InvalidSubtasks)
}
