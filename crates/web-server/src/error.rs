use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Configuration error: {0}")]
    Config(#[from] configuration::error::ConfigError),

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Faults bubble to this boundary unmodified; the cause is logged here
/// and the client sees a generic server error.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_fault) => {
                tracing::error!(error = %db_fault, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Config(config_fault) => {
                tracing::error!(error = %config_fault, "Configuration error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A server configuration error occurred".to_string(),
                )
            }
            AppError::InvalidOrigin(origin) => {
                tracing::error!(%origin, "Invalid CORS origin.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A server configuration error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
