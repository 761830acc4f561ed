use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Delete refused because content is still attached to the category.
    /// Carries enough detail for an administrator to decide on `force=true`.
    #[error("Category has {affected_count} associated content items")]
    DeleteBlocked {
        affected_count: i64,
        sample_titles: Vec<String>,
    },

    /// Post-mutation verification failed. Not retryable; the store state
    /// contradicts what a reported-successful statement implies.
    #[error("Data integrity failure: {0}")]
    Integrity(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The blocked-delete refusal has its own body shape so the admin UI
        // can show the affected count and sample titles.
        if let AppError::DeleteBlocked {
            affected_count,
            ref sample_titles,
        } = self
        {
            let body = Json(serde_json::json!({
                "success": false,
                "error": "Category has associated content items. Retry with force=true to reassign them to the fallback category.",
                "has_associations": true,
                "affected_count": affected_count,
                "sample_titles": sample_titles,
            }));
            return (StatusCode::CONFLICT, body).into_response();
        }

        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Integrity(ref msg) => {
                tracing::error!("Integrity failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::DeleteBlocked { .. } => unreachable!("handled above"),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
