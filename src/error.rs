use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    MissingRecipient(String),

    #[error("{0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Failed to send email: {0}")]
    DeliveryFailed(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MissingRecipient(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Record store error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::DeliveryFailed(e) => {
                tracing::error!(error = %e, "Email delivery error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
