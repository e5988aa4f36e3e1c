//! # Storage Module
//!
//! Handles persistence of todo records in a relational database.
//!
//! - **connection**: owns the sqlx pool and creates the schema at startup
//! - **traits**: the `TodoStorage` abstraction the domain layer depends on
//! - **todo_repository**: SQL implementation of `TodoStorage`
//!
//! The pool is built once and passed explicitly; there is no process-wide
//! database handle. The same SQL runs on SQLite and PostgreSQL through the
//! sqlx `Any` driver.

pub mod connection;
pub mod todo_repository;
pub mod traits;

pub use connection::DbConnection;
pub use todo_repository::TodoRepository;
pub use traits::TodoStorage;
