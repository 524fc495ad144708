//! ModelStore - Abstract CRUD storage for models.

use super::{Model, ModelError, Versioned};

/// Abstract CRUD storage for models.
///
/// Collections are ordered: `find_models` and `list_models` return records in
/// first-insertion order. Re-saving a record keeps its position.
pub trait ModelStore: Send + Sync {
    /// Get a model by ID. Returns None if not found.
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError>;

    /// Upsert a model (insert or update, no version check).
    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Insert a new model. Fails with `AlreadyExists` if the id is taken.
    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Update an existing model with optimistic concurrency control.
    fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError>;

    /// Delete a model by ID. Returns true if it existed.
    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError>;

    /// Find models matching a predicate, in collection order.
    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError>;

    /// Number of models stored in the collection.
    fn count_models<M: Model>(&self) -> Result<usize, ModelError>;

    /// All models of the collection, in collection order.
    fn list_models<M: Model>(&self) -> Result<Vec<Versioned<M>>, ModelError> {
        self.find_models(&|_: &M| true)
    }
}
