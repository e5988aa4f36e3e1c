//! Validated inputs to `TodoService`.
//!
//! These are only produced by `domain::validation`, so every value in them
//! already satisfies the field constraints.

use chrono::{DateTime, Utc};
use shared::TodoStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTodoCommand {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date_at: Option<DateTime<Utc>>,
    pub due_date_at: Option<DateTime<Utc>>,
}

/// Partial update. `None` leaves a field untouched; for the date fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTodoCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date_at: Option<Option<DateTime<Utc>>>,
    pub due_date_at: Option<Option<DateTime<Utc>>>,
    pub status: Option<TodoStatus>,
}
