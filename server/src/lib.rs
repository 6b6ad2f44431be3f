//! In-memory todo service over HTTP.
//!
//! # Overview
//! Todos live in a [`TodoStore`] owned by the router state; uploaded images
//! are written to disk through a [`FileSink`] before the store is touched.
//!
//! # Design
//! - The store is constructed once and shared through `Arc`; there are no
//!   process-wide globals.
//! - `completed` is derived from subtasks on every write and never read from
//!   the request.
//! - Handlers do all I/O up front, so the store lock is never held across disk
//!   writes.

pub mod config;
pub mod error;
pub mod files;
pub mod form;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use config::Config;
pub use error::AppError;
pub use files::{DiskSink, FileSink, Upload};
pub use model::{Subtask, Todo};
pub use routes::{app, AppState};
pub use store::{NewTodo, NotFound, TodoPatch, TodoStore};

/// Serve the API on `listener` with uploads written to `upload_dir`.
pub async fn run(
    listener: TcpListener,
    upload_dir: impl Into<std::path::PathBuf>,
) -> Result<(), std::io::Error> {
    let sink = DiskSink::new(upload_dir);
    sink.ensure_dir().await?;
    let state = AppState::new(Arc::new(TodoStore::new()), Arc::new(sink));
    axum::serve(listener, app(state)).await
}
