//! API error taxonomy.
//!
//! Every fault raised by the content service is an [`ApiError`]. The variant
//! decides the HTTP status; the `Display` text is what clients see in the
//! `error` field of the envelope (except for 5xx, which are masked).

use thiserror::Error;

use crate::model::ModelError;
use crate::query::QueryError;

/// Error type for content service operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The route exists but not for this method.
    #[error("Method {method} Not Allowed")]
    MethodNotAllowed {
        method: String,
        allowed: Vec<&'static str>,
    },
    /// Uniqueness or optimistic-version conflict.
    #[error("{0}")]
    Conflict(String),
    /// Backend failure.
    #[error("store failure")]
    Store(#[source] ModelError),
    /// Anything else unexpected.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    /// `"<Kind> with ID <id> not found"`.
    pub fn not_found(kind: &str, id: &str) -> Self {
        ApiError::NotFound(format!("{kind} with ID {id} not found"))
    }

    /// `"Missing required fields: a, b"`.
    pub fn missing_fields(fields: &[&str]) -> Self {
        ApiError::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed { .. } => 405,
            ApiError::Conflict(_) => 409,
            ApiError::Store(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Full error chain, `outer: inner: ...`.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { collection, id } => {
                ApiError::NotFound(format!("{} with ID {} not found", kind_of(&collection), id))
            }
            ModelError::AlreadyExists { collection, id } => ApiError::Conflict(format!(
                "{} with ID {} already exists",
                kind_of(&collection),
                id
            )),
            ModelError::ConcurrencyConflict { collection, id, .. } => ApiError::Conflict(format!(
                "{} with ID {} was modified concurrently",
                kind_of(&collection),
                id
            )),
            err @ (ModelError::Serde(_) | ModelError::Storage(_)) => ApiError::Store(err),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Human name for a collection, used in messages.
fn kind_of(collection: &str) -> &str {
    match collection {
        "articles" => "Article",
        "categories" => "Category",
        "prices" => "Price entry",
        "settings" => "Settings",
        other => other,
    }
}
