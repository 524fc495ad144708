//! Error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::envelope::ErrorEnvelope;
use crate::error::ApiError;

/// An [`ApiError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct Failure {
    error: ApiError,
    expose_detail: bool,
}

impl Failure {
    pub fn new(error: ApiError, expose_detail: bool) -> Self {
        Self {
            error,
            expose_detail,
        }
    }

    pub fn error(&self) -> &ApiError {
        &self.error
    }

    pub fn method_not_allowed(method: Method, allowed: &'static [&'static str]) -> Self {
        Self::new(
            ApiError::MethodNotAllowed {
                method: method.to_string(),
                allowed: allowed.to_vec(),
            },
            false,
        )
    }

    /// Malformed query string, including unknown keys.
    pub fn bad_query(rejection: QueryRejection) -> Self {
        Self::new(
            ApiError::Validation(format!("Invalid query parameters: {}", rejection.body_text())),
            false,
        )
    }

    /// Malformed, mistyped or non-JSON body.
    pub fn bad_json(rejection: JsonRejection) -> Self {
        Self::new(
            ApiError::Validation(format!("Invalid request body: {}", rejection.body_text())),
            false,
        )
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.error.chain(), "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.error, "request rejected");
        }

        let body = ErrorEnvelope::from_error(&self.error, self.expose_detail);
        let mut response = (status, Json(body)).into_response();

        if let ApiError::MethodNotAllowed { allowed, .. } = &self.error {
            if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
