//! InMemoryModelStore - HashMap-backed model store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Model, ModelError, ModelStore, Versioned};

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
    /// Insertion sequence; keeps collection order stable across updates.
    seq: u64,
}

#[derive(Default)]
struct Storage {
    models: HashMap<String, StoredModel>,
    next_seq: u64,
}

impl Storage {
    fn put(&mut self, key: String, bytes: Vec<u8>, version: u64) {
        let seq = match self.models.get(&key) {
            Some(existing) => existing.seq,
            None => {
                self.next_seq += 1;
                self.next_seq
            }
        };
        self.models.insert(
            key,
            StoredModel {
                bytes,
                version,
                seq,
            },
        );
    }
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc. Contents are
/// lost when the last clone is dropped.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, ModelError> {
        self.storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, ModelError> {
        self.storage
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.models.get(&key) {
            Some(stored) => {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let new_version = storage.models.get(&key).map(|s| s.version + 1).unwrap_or(1);
        storage.put(key, bytes, new_version);

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        if storage.models.contains_key(&key) {
            return Err(ModelError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        storage.put(key, bytes, 1);

        Ok(Versioned {
            data: model.clone(),
            version: 1,
        })
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let actual_version = storage
            .models
            .get(&key)
            .map(|s| s.version)
            .ok_or_else(|| ModelError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            })?;

        if actual_version != expected_version {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        storage.put(key, bytes, new_version);

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;
        Ok(storage.models.remove(&key).is_some())
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let storage = self.read()?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.models.iter() {
            if key.starts_with(&prefix) {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                if predicate(&data) {
                    results.push((
                        stored.seq,
                        Versioned {
                            data,
                            version: stored.version,
                        },
                    ));
                }
            }
        }

        results.sort_by_key(|(seq, _)| *seq);
        Ok(results.into_iter().map(|(_, model)| model).collect())
    }

    fn count_models<M: Model>(&self) -> Result<usize, ModelError> {
        let storage = self.read()?;
        let prefix = format!("{}:", M::COLLECTION);
        Ok(storage
            .models
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count())
    }
}
