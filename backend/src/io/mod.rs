//! # IO Module
//!
//! Interfaces that expose the domain to the outside world. Currently only
//! the REST API.

pub mod rest;

pub use rest::error::ApiError;
pub use rest::health_apis::health_check;
pub use rest::openapi::{openapi_json, ApiDoc};
pub use rest::todo_apis::{create_todo, delete_todo, get_todo, list_todos, update_todo};
