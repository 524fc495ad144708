//! Response envelopes.
//!
//! Every response body is one of these shapes. They are plain serde types so
//! the service can build them without knowing about the transport.

use serde::Serialize;

use crate::error::ApiError;
use crate::query::{Pagination, QueryResult};

/// `{success, count, total, data, pagination}` for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<QueryResult<T>> for ListEnvelope<T> {
    fn from(result: QueryResult<T>) -> Self {
        Self {
            success: true,
            count: result.count(),
            total: result.total(),
            data: result.items,
            pagination: result.pagination,
        }
    }
}

/// `{success, message?, data}` for single-record responses.
#[derive(Debug, Clone, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// `{success, message}` for deletes.
#[derive(Debug, Clone, Serialize)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{success, data, meta}` for the price ticker.
#[derive(Debug, Clone, Serialize)]
pub struct MetaEnvelope<T, M> {
    pub success: bool,
    pub data: T,
    pub meta: M,
}

impl<T, M> MetaEnvelope<T, M> {
    pub fn new(data: T, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}

/// `{success: false, error, detail?}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    /// Render an error. Server errors are masked as `"Internal server error"`;
    /// with `expose_detail` the full error chain goes in `detail`.
    pub fn from_error(err: &ApiError, expose_detail: bool) -> Self {
        if err.is_server_error() {
            Self {
                success: false,
                error: "Internal server error".to_string(),
                detail: expose_detail.then(|| err.chain()),
            }
        } else {
            Self {
                success: false,
                error: err.to_string(),
                detail: None,
            }
        }
    }
}
