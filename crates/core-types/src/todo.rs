use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::CoreError;

/// Maximum length of a todo title, mirrored by the VARCHAR(200) column.
pub const MAX_TITLE_LEN: usize = 200;

/// A todo record as persisted in the `todos` table.
///
/// `is_completed` is a stored generated column: the database derives it
/// from `completed_at` on every write, so the two can never disagree.
/// Application code reads it but never sets it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

impl Todo {
    /// Whether this record has been marked done.
    ///
    /// Equivalent to `self.is_completed`; kept as a method so callers can
    /// express intent without reaching into the derived column.
    pub fn is_done(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Validated input for creating a todo record.
///
/// Construction is the storage boundary for the title invariant: a title
/// that is empty after trimming whitespace is rejected before any SQL
/// runs. The title is stored exactly as given; only the emptiness check
/// trims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    title: String,
    content: String,
}

impl NewTodo {
    /// Creates a validated todo input. Pass an empty `content` for a todo
    /// with no body text, matching the column's `DEFAULT ''`.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, CoreError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CoreError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(CoreError::TitleTooLong {
                max: MAX_TITLE_LEN,
                got: title.chars().count(),
            });
        }
        Ok(Self {
            title,
            content: content.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_plain_title() {
        let new = NewTodo::new("Buy milk", "").unwrap();
        assert_eq!(new.title(), "Buy milk");
        assert_eq!(new.content(), "");
    }

    #[test]
    fn keeps_surrounding_whitespace_on_valid_titles() {
        // Only the emptiness check trims; the stored value is untouched.
        let new = NewTodo::new("  padded  ", "notes").unwrap();
        assert_eq!(new.title(), "  padded  ");
    }

    #[test]
    fn rejects_an_empty_title() {
        assert!(matches!(
            NewTodo::new("", ""),
            Err(CoreError::EmptyTitle)
        ));
    }

    #[test]
    fn rejects_a_whitespace_only_title() {
        assert!(matches!(
            NewTodo::new(" \t\n ", "body"),
            Err(CoreError::EmptyTitle)
        ));
    }

    #[test]
    fn rejects_a_title_over_the_column_limit() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            NewTodo::new(long, ""),
            Err(CoreError::TitleTooLong { max: 200, got: 201 })
        ));
    }

    #[test]
    fn accepts_a_title_at_the_column_limit() {
        let exact = "x".repeat(MAX_TITLE_LEN);
        assert!(NewTodo::new(exact, "").is_ok());
    }

    #[test]
    fn todo_serializes_with_snake_case_fields() {
        let todo = Todo {
            id: 1,
            title: "Write report".to_string(),
            content: String::new(),
            created_at: Utc::now(),
            completed_at: None,
            is_completed: false,
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["title"], "Write report");
        assert_eq!(value["is_completed"], false);
        assert!(value["completed_at"].is_null());
    }
}
