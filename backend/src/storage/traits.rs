//! # Storage Traits
//!
//! The domain layer talks to persistence only through these traits, so the
//! SQL repository can be swapped for a test double.

use anyhow::Result;
use async_trait::async_trait;
use shared::TodoStatus;

use crate::domain::models::Todo;

/// Trait defining the interface for todo storage operations.
///
/// Every method is a single statement against the `todos` table.
#[async_trait]
pub trait TodoStorage: Send + Sync {
    /// Insert a new todo.
    /// Returns false if a todo with the same ID already exists.
    async fn store_todo(&self, todo: &Todo) -> Result<bool>;

    /// List todos, optionally restricted to one status.
    /// Ordered by creation time, then ID.
    async fn list_todos(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>>;

    /// Retrieve a specific todo by ID
    async fn get_todo(&self, todo_id: &str) -> Result<Option<Todo>>;

    /// Overwrite the mutable columns of an existing todo.
    /// Returns false if no row has the todo's ID.
    async fn update_todo(&self, todo: &Todo) -> Result<bool>;

    /// Delete a todo by ID.
    /// Returns true if the todo was found and deleted, false otherwise
    async fn delete_todo(&self, todo_id: &str) -> Result<bool>;
}
