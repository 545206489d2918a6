pub mod error;
pub mod todo;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use todo::{NewTodo, Todo};
