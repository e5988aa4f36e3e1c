use chrono::{DateTime, Utc};
use shared::TodoStatus;

use crate::domain::commands::{CreateTodoCommand, UpdateTodoCommand};

/// Domain model representing a stored todo
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub start_date_at: Option<DateTime<Utc>>,
    pub due_date_at: Option<DateTime<Utc>>,
    pub status: TodoStatus,
}

impl Todo {
    /// Build a fresh todo with server-assigned creation time and default status
    pub fn new(command: CreateTodoCommand, now: DateTime<Utc>) -> Self {
        Self {
            id: command.id,
            name: command.name,
            description: command.description,
            created_at: now,
            updated_at: None,
            start_date_at: command.start_date_at,
            due_date_at: command.due_date_at,
            status: TodoStatus::default(),
        }
    }

    /// Overlay the supplied fields and stamp `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply_update(&mut self, command: UpdateTodoCommand, now: DateTime<Utc>) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
        if let Some(start_date_at) = command.start_date_at {
            self.start_date_at = start_date_at;
        }
        if let Some(due_date_at) = command.due_date_at {
            self.due_date_at = due_date_at;
        }
        if let Some(status) = command.status {
            self.status = status;
        }

        self.updated_at = Some(match self.updated_at {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}
