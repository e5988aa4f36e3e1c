use chrono::Utc;
use shared::{CreateTodoRequest, TodoStatus, UpdateTodoRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::error::TodoError;
use crate::domain::models::Todo;
use crate::domain::validation::{validate_create, validate_update};
use crate::storage::TodoStorage;

/// Service for managing todos.
///
/// Every operation validates its input before the storage layer is called.
#[derive(Clone)]
pub struct TodoService {
    todo_repository: Arc<dyn TodoStorage>,
}

impl TodoService {
    pub fn new(todo_repository: Arc<dyn TodoStorage>) -> Self {
        Self { todo_repository }
    }

    /// Create a new todo
    pub async fn create_todo(&self, request: &CreateTodoRequest) -> Result<Todo, TodoError> {
        let command = validate_create(request)?;
        info!("Creating todo: id={}, name={}", command.id, command.name);

        let todo = Todo::new(command, Utc::now());
        if !self.todo_repository.store_todo(&todo).await? {
            warn!("Todo already exists: {}", todo.id);
            return Err(TodoError::AlreadyExists(todo.id));
        }

        info!("Created todo: {}", todo.id);
        Ok(todo)
    }

    /// List todos, optionally restricted to a status.
    ///
    /// An empty filter means no filter. A value that is not a known status
    /// matches nothing.
    pub async fn list_todos(&self, status: Option<&str>) -> Result<Vec<Todo>, TodoError> {
        let status = match status.filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<TodoStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    debug!("{}, returning no todos", e);
                    return Ok(Vec::new());
                }
            },
        };
        info!("Listing todos with status {:?}", status);

        let todos = self.todo_repository.list_todos(status).await?;

        info!("Found {} todos", todos.len());
        Ok(todos)
    }

    /// Get a todo by ID
    pub async fn get_todo(&self, todo_id: &str) -> Result<Todo, TodoError> {
        info!("Getting todo: {}", todo_id);

        self.todo_repository
            .get_todo(todo_id)
            .await?
            .ok_or_else(|| TodoError::NotFound(todo_id.to_string()))
    }

    /// Apply a partial update to an existing todo
    pub async fn update_todo(
        &self,
        todo_id: &str,
        request: &UpdateTodoRequest,
    ) -> Result<Todo, TodoError> {
        let command = validate_update(request)?;
        info!("Updating todo: {}", todo_id);

        let mut todo = self.get_todo(todo_id).await?;
        todo.apply_update(command, Utc::now());

        // The row can disappear between the read and the write
        if !self.todo_repository.update_todo(&todo).await? {
            return Err(TodoError::NotFound(todo_id.to_string()));
        }

        info!("Updated todo: {}", todo.id);
        Ok(todo)
    }

    /// Delete a todo
    pub async fn delete_todo(&self, todo_id: &str) -> Result<(), TodoError> {
        info!("Deleting todo: {}", todo_id);

        if !self.todo_repository.delete_todo(todo_id).await? {
            return Err(TodoError::NotFound(todo_id.to_string()));
        }

        info!("Deleted todo: {}", todo_id);
        Ok(())
    }
}
