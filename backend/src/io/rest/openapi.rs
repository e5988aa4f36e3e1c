use axum::response::Json;
use shared::{CreateTodoRequest, ErrorResponse, Todo, TodoStatus, UpdateTodoRequest};
use utoipa::OpenApi;

use crate::io::rest::{health_apis, todo_apis};

/// OpenAPI document generated from the handler annotations and shared types
#[derive(OpenApi)]
#[openapi(
    info(title = "Todo Service", description = "CRUD API for todo records"),
    paths(
        todo_apis::create_todo,
        todo_apis::list_todos,
        todo_apis::get_todo,
        todo_apis::update_todo,
        todo_apis::delete_todo,
        health_apis::health_check,
    ),
    components(schemas(Todo, TodoStatus, CreateTodoRequest, UpdateTodoRequest, ErrorResponse)),
    tags(
        (name = "todos", description = "Todo management"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        assert!(paths["/todos"]["get"].is_object());
        assert!(paths["/todos"]["post"].is_object());
        assert!(paths["/todos/{id}"]["get"].is_object());
        assert!(paths["/todos/{id}"]["put"].is_object());
        assert!(paths["/todos/{id}"]["delete"].is_object());
        assert!(paths["/health"]["get"].is_object());
    }

    #[test]
    fn test_schemas_carry_constraints() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        assert_eq!(schemas["CreateTodoRequest"]["properties"]["name"]["minLength"], 4);
        assert_eq!(schemas["CreateTodoRequest"]["properties"]["name"]["maxLength"], 36);

        let statuses = schemas["TodoStatus"]["enum"].as_array().unwrap();
        assert!(statuses.contains(&"IN PROCESS".into()));
        assert!(statuses.contains(&"DONE".into()));
        assert!(statuses.contains(&"IDLE".into()));
    }
}
