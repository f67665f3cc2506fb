use std::fmt::Display;

use averager_core::error::{UnknownCategoryError, WindowError};
use axum::{extract::rejection::PathRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{debug, error};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError {
    pub error_code: &'static str,
    pub message: String,
    pub http_status_code: StatusCode,
}

impl ApiError {
    pub fn new(error_code: &'static str, message: String, http_status_code: StatusCode) -> Self {
        ApiError {
            error_code,
            message,
            http_status_code,
        }
    }

    pub fn not_found() -> Self {
        ApiError::new("NOT_FOUND", "Not found".to_string(), StatusCode::NOT_FOUND)
    }

    /// Logs `err` and hides it behind a generic message.
    pub fn internal(err: &dyn Display) -> Self {
        error!(%err, "Request failed with internal error");
        ApiError::new(
            "INTERNAL_SERVER_ERROR",
            INTERNAL_ERROR_MESSAGE.to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}

impl From<UnknownCategoryError> for ApiError {
    fn from(err: UnknownCategoryError) -> Self {
        ApiError::new("INVALID_CATEGORY", err.to_string(), StatusCode::BAD_REQUEST)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            "INVALID_CATEGORY",
            rejection.body_text(),
            StatusCode::BAD_REQUEST,
        )
    }
}

impl From<WindowError> for ApiError {
    fn from(err: WindowError) -> Self {
        ApiError::internal(&err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        if self.http_status_code.is_client_error() {
            debug!(error_code = self.error_code, message = %self.message, "Rejected request");
        }

        let body = axum::Json(ErrorResponse {
            error: self.message,
        });
        (self.http_status_code, body).into_response()
    }
}
