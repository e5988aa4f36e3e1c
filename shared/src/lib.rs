use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// A todo record as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Client-chosen identifier (4 to 36 characters)
    #[schema(min_length = 4, max_length = 36)]
    pub id: String,
    #[schema(min_length = 4, max_length = 36)]
    pub name: String,
    pub description: String,
    /// Assigned by the server when the todo is created
    pub created_at: DateTime<Utc>,
    /// Null until the first successful update
    pub updated_at: Option<DateTime<Utc>>,
    pub start_date_at: Option<DateTime<Utc>>,
    pub due_date_at: Option<DateTime<Utc>>,
    pub status: TodoStatus,
}

/// Lifecycle state of a todo.
///
/// The same enumeration is used for validation, storage and the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TodoStatus {
    #[serde(rename = "IN PROCESS", alias = "IN_PROCESS")]
    InProcess,
    #[serde(rename = "DONE")]
    Done,
    #[default]
    #[serde(rename = "IDLE")]
    Idle,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [TodoStatus::InProcess, TodoStatus::Done, TodoStatus::Idle];

    /// Canonical literal used in responses and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::InProcess => "IN PROCESS",
            TodoStatus::Done => "DONE",
            TodoStatus::Idle => "IDLE",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = TodoStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN PROCESS" | "IN_PROCESS" => Ok(TodoStatus::InProcess),
            "DONE" => Ok(TodoStatus::Done),
            "IDLE" => Ok(TodoStatus::Idle),
            other => Err(TodoStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoStatusError(pub String);

impl fmt::Display for TodoStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid todo status: {:?}", self.0)
    }
}

impl std::error::Error for TodoStatusError {}

/// Request body for POST /todos.
///
/// Fields are kept as raw text so the server can report every constraint
/// violation as a validation failure instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, min_length = 4, max_length = 36)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, min_length = 4, max_length = 36)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(default = "")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_date_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date_at: Option<Option<String>>,
}

/// Request body for PUT /todos/:id. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 4, max_length = 36)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `null` clears the stored date
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_date_at: Option<Option<String>>,
    /// `null` clears the stored date
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<TodoStatus>)]
    pub status: Option<String>,
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

/// A date as sent by the client: text, or epoch milliseconds as a JSON number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Millis(i64),
}

/// Distinguishes a field that was sent as null (`Some(None)`) from one that
/// was omitted (`None`, via `#[serde(default)]`). Numbers are kept as their
/// decimal text, the same value a form body carries.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDate>::deserialize(deserializer)?;
    Ok(Some(raw.map(|date| match date {
        RawDate::Text(text) => text,
        RawDate::Millis(millis) => millis.to_string(),
    })))
}
