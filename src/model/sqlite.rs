//! SqliteModelStore - durable model store on a single SQLite table.
//!
//! Models are stored as JSON text keyed by `(collection, id)`. The
//! autoincrement `seq` column preserves first-insertion order.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::{Model, ModelError, ModelStore, Versioned};

const SCHEMA: &str = "
    PRAGMA foreign_keys=ON;

    CREATE TABLE IF NOT EXISTS models (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        version INTEGER NOT NULL,
        body TEXT NOT NULL,
        UNIQUE (collection, id)
    );

    CREATE INDEX IF NOT EXISTS idx_models_collection ON models(collection, seq);
";

impl From<rusqlite::Error> for ModelError {
    fn from(err: rusqlite::Error) -> Self {
        ModelError::Storage(err.to_string())
    }
}

/// SQLite-backed model store. The connection is serialized behind a mutex.
pub struct SqliteModelStore {
    conn: Mutex<Connection>,
}

impl SqliteModelStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, ModelError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, ModelError> {
        self.conn
            .lock()
            .map_err(|_| ModelError::Storage("connection lock poisoned".into()))
    }

    fn current_version(
        conn: &Connection,
        collection: &str,
        id: &str,
    ) -> Result<Option<u64>, ModelError> {
        let version: Option<i64> = conn
            .query_row(
                "SELECT version FROM models WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version.map(|v| v as u64))
    }

    fn write_body(
        conn: &Connection,
        collection: &str,
        id: &str,
        body: &str,
        version: u64,
    ) -> Result<(), ModelError> {
        if version == 1 {
            conn.execute(
                "INSERT INTO models (collection, id, version, body) VALUES (?1, ?2, 1, ?3)",
                params![collection, id, body],
            )?;
        } else {
            conn.execute(
                "UPDATE models SET version = ?3, body = ?4 WHERE collection = ?1 AND id = ?2",
                params![collection, id, version as i64, body],
            )?;
        }
        Ok(())
    }
}

impl ModelStore for SqliteModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let conn = self.conn()?;
        let row: Option<(i64, String)> = conn
            .query_row(
                "SELECT version, body FROM models WHERE collection = ?1 AND id = ?2",
                params![M::COLLECTION, id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((version, body)) => Ok(Some(Versioned {
                data: serde_json::from_str(&body)?,
                version: version as u64,
            })),
            None => Ok(None),
        }
    }

    fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let body = serde_json::to_string(model)?;
        let conn = self.conn()?;
        let version = Self::current_version(&conn, M::COLLECTION, model.id())?
            .map(|v| v + 1)
            .unwrap_or(1);
        Self::write_body(&conn, M::COLLECTION, model.id(), &body, version)?;

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let body = serde_json::to_string(model)?;
        let conn = self.conn()?;
        if Self::current_version(&conn, M::COLLECTION, model.id())?.is_some() {
            return Err(ModelError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        Self::write_body(&conn, M::COLLECTION, model.id(), &body, 1)?;

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
        let body = serde_json::to_string(model)?;
        let conn = self.conn()?;
        let actual_version = Self::current_version(&conn, M::COLLECTION, model.id())?
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
        Self::write_body(&conn, M::COLLECTION, model.id(), &body, new_version)?;

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }

    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM models WHERE collection = ?1 AND id = ?2",
            params![M::COLLECTION, id],
        )?;
        Ok(removed > 0)
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT version, body FROM models WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![M::COLLECTION], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (version, body) = row?;
            let data: M = serde_json::from_str(&body)?;
            if predicate(&data) {
                results.push(Versioned {
                    data,
                    version: version as u64,
                });
            }
        }
        Ok(results)
    }

    fn count_models<M: Model>(&self) -> Result<usize, ModelError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM models WHERE collection = ?1",
            params![M::COLLECTION],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
