//! # REST API Interface Layer
//!
//! HTTP endpoints for the todo service. This layer only translates:
//! - request bodies, query strings and path segments into domain calls
//! - domain errors into status codes and the `{status, error}` body
//! - domain models into the shared wire DTOs
//!
//! No business rules live here.

pub mod error;
pub mod health_apis;
pub mod mappers;
pub mod openapi;
pub mod payload;
pub mod todo_apis;
