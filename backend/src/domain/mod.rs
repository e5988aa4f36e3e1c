//! # Domain Module
//!
//! Business rules for todo records: validation of incoming payloads, the
//! todo model and its update semantics, and `TodoService`, which coordinates
//! validation with storage.

pub mod commands;
pub mod error;
pub mod models;
pub mod todo_service;
pub mod validation;

pub use error::TodoError;
pub use todo_service::TodoService;
pub use validation::ValidationError;
