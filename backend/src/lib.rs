//! # Todo Service Backend
//!
//! HTTP service managing todo records.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (validation, TodoService)
//!     ↓
//! Storage Layer (sqlx pool, TodoRepository)
//! ```
//!
//! `initialize_backend` wires the layers together from an `AppConfig`;
//! `create_router` builds the axum router around the resulting `AppState`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, CorsConfig};
use crate::domain::TodoService;
use crate::storage::{DbConnection, TodoRepository, TodoStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub todo_service: TodoService,
}

impl AppState {
    pub fn new(todo_repository: Arc<dyn TodoStorage>) -> Self {
        Self {
            todo_service: TodoService::new(todo_repository),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::init(&config.database).await?;

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(TodoRepository::new(db_conn))))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors: &CorsConfig) -> Result<Router> {
    let allow_origin = match &cors.allowed_origin {
        Some(origin) => AllowOrigin::exact(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {origin}"))?,
        ),
        None => AllowOrigin::from(Any),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let router = Router::new()
        .route("/todos", get(io::list_todos).post(io::create_todo))
        .route(
            "/todos/:id",
            get(io::get_todo).put(io::update_todo).delete(io::delete_todo),
        )
        .route("/health", get(io::health_check))
        .route("/api-docs/openapi.json", get(io::openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(router)
}
