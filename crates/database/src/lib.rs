//! # Todo API Database Crate
//!
//! This crate is the application-specific interface to the PostgreSQL
//! database. It owns the persisted schema and every unit of work that
//! touches it.
//!
//! ## Architectural Principles
//!
//! - **Explicit lifecycle:** The `Database` handle is constructed once at
//!   startup and injected into whatever needs it. There is no ambient
//!   global pool; teardown is an explicit `shutdown` call.
//! - **Scoped sessions:** Request code never manages transactions by
//!   hand. A `Session` commits on success, rolls back on fault or drop,
//!   and always returns its connection to the pool.
//! - **Schema as data:** The persisted shape is declared once as a
//!   `TableSpec` value and rendered to DDL for the development bootstrap;
//!   production schema changes go through the versioned migrations under
//!   `./migrations`.
//!
//! ## Public API
//!
//! - `Database`: pool owner; `connect`, `session`, `with_session`,
//!   `initialize_schema`, `shutdown`.
//! - `TodoRepository`: the storage-layer lifecycle of a todo record.
//! - `run_migrations` / `revert_last_migration`: the versioned schema path.
//! - `DbError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;
pub mod session;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{DatabaseSettings, MIGRATOR, revert_last_migration, run_migrations};
pub use error::DbError;
pub use repository::TodoRepository;
pub use session::{Database, Session};
