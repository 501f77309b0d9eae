use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Event is full")]
    EventFull,
    #[error("Registrations are closed for this event")]
    EventClosed,
    #[error("Already registered for this event")]
    DuplicateRegistration,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Partial failure: {0}")]
    PartialFailure(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::EventFull => (StatusCode::BAD_REQUEST, "Event is full".to_string()),
            AppError::EventClosed => (
                StatusCode::BAD_REQUEST,
                "Registrations are closed for this event".to_string(),
            ),
            AppError::DuplicateRegistration => (
                StatusCode::BAD_REQUEST,
                "Already registered for this event".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PartialFailure(msg) => {
                // Counter and registration store may disagree until reconciled.
                error!("Partial failure requiring reconciliation: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Registration state requires reconciliation".to_string(),
                )
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// 2067 = SQLite Unique Constraint
// 23505 = PostgreSQL Unique Violation
pub fn map_unique_violation(e: sqlx::Error, conflict: AppError) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        let code = db_err.code().unwrap_or_default();
        if code == "2067" || code == "23505" {
            return conflict;
        }
    }
    AppError::Database(e)
}
