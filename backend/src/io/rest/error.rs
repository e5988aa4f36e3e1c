use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::TodoError;

/// Everything a handler can fail with, already classified by HTTP status.
///
/// The response body is always `{status, error}` with the canonical reason
/// phrase; the detail message only goes to the log.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &str {
        match self {
            ApiError::BadRequest(detail)
            | ApiError::NotFound(detail)
            | ApiError::Conflict(detail)
            | ApiError::Internal(detail) => detail,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        let detail = e.to_string();
        match e {
            TodoError::Validation(_) => ApiError::BadRequest(detail),
            TodoError::NotFound(_) => ApiError::NotFound(detail),
            TodoError::AlreadyExists(_) => ApiError::Conflict(detail),
            TodoError::Storage(_) => ApiError::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.detail());
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self.detail());
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_todo_error_mapping() {
        let cases = [
            (
                TodoError::Validation(ValidationError::MissingField { field: "id" }),
                StatusCode::BAD_REQUEST,
            ),
            (TodoError::NotFound("abcd".to_string()), StatusCode::NOT_FOUND),
            (TodoError::AlreadyExists("abcd".to_string()), StatusCode::CONFLICT),
            (
                TodoError::Storage(anyhow::anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::NotFound("Todo with ID abcd not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
