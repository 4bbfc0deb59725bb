//! HTTP mapping for `AppError`.
//!
//! Validation → 400 with the offending field list, NotFound → 404,
//! Storage → generic 500 (details stay in the server log).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use elaka_core::error::AppError;
use serde_json::json;

pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid post data", "fields": fields }),
            ),
            AppError::NotFound(kind, id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{kind} not found with ID {id}") }),
            ),
            AppError::Storage(detail) => {
                tracing::error!(detail = %detail, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
