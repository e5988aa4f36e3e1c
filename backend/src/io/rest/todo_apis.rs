//! # REST API for Todo Management
//!
//! Endpoints for creating, listing, retrieving, updating, and deleting todos.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{CreateTodoRequest, ErrorResponse, Todo, TodoStatus, UpdateTodoRequest};
use tracing::info;
use utoipa::IntoParams;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::todo_mapper::TodoMapper;
use crate::io::rest::payload::Payload;
use crate::AppState;

/// Query parameters for GET /todos
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoListQuery {
    /// Only return todos in this status
    #[param(value_type = Option<TodoStatus>)]
    pub status: Option<String>,
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body(content = CreateTodoRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Payload failed validation", body = ErrorResponse),
        (status = 409, description = "A todo with this ID already exists", body = ErrorResponse),
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Payload(request): Payload<CreateTodoRequest>,
) -> impl IntoResponse {
    info!("POST /todos - request: {:?}", request);

    match state.todo_service.create_todo(&request).await {
        Ok(todo) => (StatusCode::CREATED, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// List todos, optionally filtered by status
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    params(TodoListQuery),
    responses(
        (status = 200, description = "Matching todos", body = [Todo]),
    )
)]
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<TodoListQuery>,
) -> impl IntoResponse {
    info!("GET /todos - query: {:?}", query);

    match state.todo_service.list_todos(query.status.as_deref()).await {
        Ok(todos) => (StatusCode::OK, Json(TodoMapper::to_dto_list(todos))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "No todo with this ID", body = ErrorResponse),
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /todos/{}", todo_id);

    match state.todo_service.get_todo(&todo_id).await {
        Ok(todo) => (StatusCode::OK, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Update a todo; omitted fields keep their current value
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body(content = UpdateTodoRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The updated todo", body = Todo),
        (status = 400, description = "Payload failed validation", body = ErrorResponse),
        (status = 404, description = "No todo with this ID", body = ErrorResponse),
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
    Payload(request): Payload<UpdateTodoRequest>,
) -> impl IntoResponse {
    info!("PUT /todos/{} - request: {:?}", todo_id, request);

    match state.todo_service.update_todo(&todo_id, &request).await {
        Ok(todo) => (StatusCode::OK, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "No todo with this ID", body = ErrorResponse),
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /todos/{}", todo_id);

    match state.todo_service.delete_todo(&todo_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
