//! Content API for a cryptocurrency news site.
//!
//! Articles, categories, site settings, a price ticker and AI-assisted
//! drafts, all served from typed collections through one query pipeline
//! (filter, sort, paginate) and a small set of JSON envelopes.
//!
//! - [`model`]: collections and storage backends (in-memory, SQLite)
//! - [`query`]: the shared filter / sort / paginate pipeline
//! - [`content`]: records and request shapes
//! - [`service`]: one method per API operation
//! - [`http`]: the axum transport (feature `http`)

pub mod config;
pub mod content;
pub mod envelope;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;

pub use error::ApiError;
pub use model::{InMemoryModelStore, Model, ModelError, ModelStore, ModelsExt};
#[cfg(feature = "sqlite")]
pub use model::SqliteModelStore;
pub use service::{Limits, Service};
