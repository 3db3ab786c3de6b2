use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::flow::FlowError;
use crate::schema::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Unreadable request bodies (bad JSON, wrong content type) are reported as
/// validation failures on the document root.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationError::new("$", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Validation(e) | AppError::Flow(FlowError::InputValidation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.message)
            }
            AppError::Flow(FlowError::ExternalCall(e)) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "The advisory service could not be reached. Please retry.".to_string(),
                )
            }
            AppError::Flow(FlowError::OutputValidation(e)) => {
                tracing::error!("Model output rejected at {}: {}", e.field, e.message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OUTPUT_VALIDATION_ERROR",
                    "The advisory service returned an unusable answer. Please retry.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Error fetching crops".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
