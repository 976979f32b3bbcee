//! Mapping from pipeline errors to HTTP responses.
//!
//! Only validation errors and guardrail rejections become structured 400
//! bodies with their own message. Everything else is an internal fault: the
//! detail is logged server-side and the caller gets a generic 500.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askdocs_core::AppError;
use serde_json::json;
use std::fmt;

/// HTTP-facing wrapper around `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.0.is_client_error() {
            // Client-safe by construction; the guardrail variant displays
            // only its fixed message.
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "Request failed");
            "Internal server error".to_string()
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
