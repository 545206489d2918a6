use chrono::{DateTime, Utc};
use core_types::{NewTodo, Todo};

use crate::error::DbError;
use crate::session::Database;

/// Storage-layer lifecycle of a todo record.
///
/// Every write runs inside a scoped session (committed on success,
/// rolled back on fault); single-statement reads go straight to the
/// pool. The generated `is_completed` column is never named in a write:
/// the database derives it from `completed_at`.
#[derive(Debug, Clone)]
pub struct TodoRepository {
    db: Database,
}

impl TodoRepository {
    /// Creates a new `TodoRepository` over a shared database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a new record. The database stamps `created_at`; the new
    /// record starts with `completed_at` NULL and `is_completed` false.
    pub async fn create(&self, new_todo: NewTodo) -> Result<Todo, DbError> {
        self.db
            .with_session(move |session| {
                Box::pin(async move {
                    let todo = sqlx::query_as::<_, Todo>(
                        "INSERT INTO todos (title, content) VALUES ($1, $2) \
                         RETURNING id, title, content, created_at, completed_at, is_completed",
                    )
                    .bind(new_todo.title())
                    .bind(new_todo.content())
                    .fetch_one(session.conn())
                    .await?;
                    Ok(todo)
                })
            })
            .await
    }

    /// Fetches a single record by its identifier.
    pub async fn get(&self, id: i64) -> Result<Option<Todo>, DbError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, content, created_at, completed_at, is_completed \
             FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(todo)
    }

    /// Lists all records, newest first. Served by the created_at index.
    pub async fn list_recent(&self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, content, created_at, completed_at, is_completed \
             FROM todos ORDER BY created_at DESC",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(todos)
    }

    /// Lists records filtered by completion status, newest first. Served
    /// by the is_completed index.
    pub async fn list_by_status(&self, completed: bool) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, content, created_at, completed_at, is_completed \
             FROM todos WHERE is_completed = $1 ORDER BY created_at DESC",
        )
        .bind(completed)
        .fetch_all(self.db.pool())
        .await?;
        Ok(todos)
    }

    /// Replaces a record's title and content. The title goes through the
    /// same validation as on create. Returns `None` for an unknown id.
    pub async fn update_text(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<Todo>, DbError> {
        let input = NewTodo::new(title, content)?;
        self.db
            .with_session(move |session| {
                Box::pin(async move {
                    let todo = sqlx::query_as::<_, Todo>(
                        "UPDATE todos SET title = $2, content = $3 WHERE id = $1 \
                         RETURNING id, title, content, created_at, completed_at, is_completed",
                    )
                    .bind(id)
                    .bind(input.title())
                    .bind(input.content())
                    .fetch_optional(session.conn())
                    .await?;
                    Ok(todo)
                })
            })
            .await
    }

    /// Sets or clears the completion timestamp. This is the only way the
    /// completion state changes; `is_completed` follows mechanically on
    /// the next read. Returns `None` for an unknown id.
    pub async fn set_completed_at(
        &self,
        id: i64,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Todo>, DbError> {
        self.db
            .with_session(move |session| {
                Box::pin(async move {
                    let todo = sqlx::query_as::<_, Todo>(
                        "UPDATE todos SET completed_at = $2 WHERE id = $1 \
                         RETURNING id, title, content, created_at, completed_at, is_completed",
                    )
                    .bind(id)
                    .bind(completed_at)
                    .fetch_optional(session.conn())
                    .await?;
                    Ok(todo)
                })
            })
            .await
    }

    /// Deletes a record. Returns whether anything was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        self.db
            .with_session(move |session| {
                Box::pin(async move {
                    let result = sqlx::query("DELETE FROM todos WHERE id = $1")
                        .bind(id)
                        .execute(session.conn())
                        .await?;
                    Ok(result.rows_affected() > 0)
                })
            })
            .await
    }
}
