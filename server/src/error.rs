use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::types::MSG_NOT_FOUND;
use todo_core::{ErrorResponse, FieldErrors, MessageResponse, StoreError};
use tracing::{error, warn};

const MSG_INTERNAL: &str = "An internal server error occurred.";

/// Everything a handler can fail with.
///
/// Validation failures and missing rows both answer 400; only storage faults
/// surface as 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("item not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                warn!(%errors, "rejected todo form");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message: errors })).into_response()
            }
            AppError::NotFound => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: MSG_NOT_FOUND.to_string(),
                }),
            )
                .into_response(),
            AppError::Store(err) => {
                error!(error = %err, "todo store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse {
                        message: MSG_INTERNAL.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
