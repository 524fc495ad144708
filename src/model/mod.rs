//! Models - typed records kept in named collections.
//!
//! Every collection the API serves (articles, categories, prices, settings)
//! is a `Model`. Storage goes through the `ModelStore` trait so the service
//! never touches a concrete backend.
//!
//! ## Example
//!
//! ```ignore
//! use coindaily::model::{InMemoryModelStore, ModelsExt};
//!
//! let store = InMemoryModelStore::new();
//! store.models::<Category>().insert(&category)?;
//! let loaded = store.models::<Category>().get("1")?;
//! ```

mod in_memory;
mod model_repository;
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g. "articles", "categories").
    /// Maps to a key prefix in the in-memory store and a column in SQLite.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A model with this id is already stored.
    AlreadyExists { collection: String, id: String },
    /// Optimistic concurrency conflict.
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Model not found.
    NotFound { collection: String, id: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::AlreadyExists { collection, id } => {
                write!(f, "model already exists: {}:{}", collection, id)
            }
            ModelError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            ModelError::Serde(msg) => write!(f, "model serialization error: {}", msg),
            ModelError::Storage(msg) => write!(f, "model storage error: {}", msg),
            ModelError::NotFound { collection, id } => {
                write!(f, "model not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serde(err.to_string())
    }
}

pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteModelStore;
pub use store::ModelStore;
