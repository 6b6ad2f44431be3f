//! In-memory todo collection.
//!
//! # Design
//! The map and the id counter sit behind one `RwLock`, so id allocation and
//! insertion happen in the same write section. Reads take the shared lock and
//! hand back clones; nothing returned to a caller aliases the stored records.
//! No I/O happens while the lock is held: uploads are saved by the caller
//! before `create`/`update` is invoked.

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::{all_completed, Subtask, Todo};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("todo {0} not found")]
pub struct NotFound(pub i64);

/// Fields for a new todo. `completed` is derived, so it is not here.
#[derive(Debug, Default, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
    pub images: Vec<String>,
}

/// Replacement values for an existing todo.
///
/// `title` and `description` are kept when `None` or empty. `subtasks` and
/// `images` always replace the stored lists, so an empty vec clears them.
#[derive(Debug, Default, Clone)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtasks: Vec<Subtask>,
    pub images: Vec<String>,
}

struct Inner {
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn create(&self, new: NewTodo) -> Todo {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let todo = Todo {
            id,
            completed: all_completed(&new.subtasks),
            title: new.title,
            description: new.description,
            images: new.images,
            subtasks: new.subtasks,
        };
        inner.todos.insert(id, todo.clone());
        tracing::debug!(id, "todo created");
        todo
    }

    pub async fn get(&self, id: i64) -> Result<Todo, NotFound> {
        self.inner
            .read()
            .await
            .todos
            .get(&id)
            .cloned()
            .ok_or(NotFound(id))
    }

    /// Snapshot of every live todo, in ascending id order.
    pub async fn list(&self) -> Vec<Todo> {
        self.inner.read().await.todos.values().cloned().collect()
    }

    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Todo, NotFound> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id).ok_or(NotFound(id))?;
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            todo.title = title;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            todo.description = description;
        }
        todo.subtasks = patch.subtasks;
        todo.images = patch.images;
        todo.completed = all_completed(&todo.subtasks);
        tracing::debug!(id, completed = todo.completed, "todo updated");
        Ok(todo.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<(), NotFound> {
        let mut inner = self.inner.write().await;
        inner.todos.remove(&id).map(|_| ()).ok_or(NotFound(id))?;
        tracing::debug!(id, "todo deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}
