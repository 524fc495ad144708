//! Content service - the operations behind every endpoint.
//!
//! `Service<S>` owns a [`ModelStore`] and exposes one method per API
//! operation. Reads run the shared query pipeline over a snapshot of the
//! collection; writes validate, check uniqueness and store under a single
//! write lock, so a check and the write that depends on it never interleave
//! with another writer.
//!
//! ## Example
//!
//! ```ignore
//! use coindaily::model::InMemoryModelStore;
//! use coindaily::service::Service;
//!
//! let service = Service::new(InMemoryModelStore::new());
//! service.seed_if_empty()?;
//! let page = service.list_articles(&Default::default())?;
//! ```

mod articles;
mod categories;
mod drafts;
mod prices;
mod settings;

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::content::{seed, Article, Category, PriceEntry, SiteSettings};
use crate::error::ApiError;
use crate::model::{Model, ModelStore, ModelsExt};
use crate::query::{Page, DEFAULT_LIMIT, DEFAULT_MAX_LIMIT};

/// Page size bounds for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Content operations over a model store.
pub struct Service<S> {
    store: S,
    limits: Limits,
    write_lock: Mutex<()>,
}

impl<S: ModelStore> Service<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: Limits::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Load the initial content into a store that has never held any.
    /// Once any collection has records nothing is written, so content a
    /// user deleted stays deleted across restarts. Returns true if the
    /// store was seeded.
    pub fn seed_if_empty(&self) -> Result<bool, ApiError> {
        let _guard = self.write_guard();
        let used = self.store.models::<SiteSettings>().count()?
            + self.store.models::<Category>().count()?
            + self.store.models::<Article>().count()?
            + self.store.models::<PriceEntry>().count()?;
        if used > 0 {
            return Ok(false);
        }
        self.seed_collection(seed::categories())?;
        self.seed_collection(seed::articles())?;
        self.seed_collection(seed::prices())?;
        self.seed_collection(vec![seed::settings()])?;
        Ok(true)
    }

    fn seed_collection<M: Model>(&self, records: Vec<M>) -> Result<(), ApiError> {
        let repo = self.store.models::<M>();
        for record in &records {
            repo.insert(record)?;
        }
        tracing::info!(collection = M::COLLECTION, count = records.len(), "seeded collection");
        Ok(())
    }

    /// Serialize writers. A poisoned lock only means an earlier writer
    /// panicked; the store itself is still consistent.
    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn page(&self, offset: Option<usize>, limit: Option<usize>) -> Result<Page, ApiError> {
        Ok(Page::bounded(
            offset.unwrap_or(0),
            limit.unwrap_or(self.limits.default_limit),
            self.limits.max_limit,
        )?)
    }

    fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, ApiError> {
        Ok(self
            .store
            .models::<Category>()
            .find(&|c: &Category| c.slug == slug)?
            .into_iter()
            .next()
            .map(|v| v.into_inner()))
    }

    fn require_category_slug(&self, slug: &str) -> Result<(), ApiError> {
        match self.category_by_slug(slug)? {
            Some(_) => Ok(()),
            None => Err(ApiError::validation(format!("Category '{slug}' does not exist"))),
        }
    }

    fn article_slug_taken(&self, slug: &str, except_id: Option<&str>) -> Result<bool, ApiError> {
        Ok(self
            .store
            .models::<Article>()
            .exists(&|a: &Article| a.slug == slug && Some(a.id.as_str()) != except_id)?)
    }

    fn settings_doc(&self) -> Result<crate::model::Versioned<SiteSettings>, ApiError> {
        Ok(self
            .store
            .models::<SiteSettings>()
            .require(crate::content::settings::SETTINGS_ID)?)
    }

    fn price_entries(&self) -> Result<Vec<PriceEntry>, ApiError> {
        Ok(self.store.models::<PriceEntry>().all()?)
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Collect the names of required fields that are absent or blank.
fn missing<'a>(fields: &[(&'a str, &Option<String>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// A present field must not be blank.
fn not_blank(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ApiError::validation(format!(
            "Field '{field}' cannot be empty"
        ))),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

/// Body ids are optional on updates but must agree with the path.
fn check_body_id(kind: &str, path_id: &str, body_id: Option<&str>) -> Result<(), ApiError> {
    match body_id {
        Some(id) if id != path_id => Err(ApiError::validation(format!(
            "{kind} ID in body ({id}) does not match URL ({path_id})"
        ))),
        _ => Ok(()),
    }
}

fn check_slug(slug: &str) -> Result<(), ApiError> {
    if crate::content::slug::is_valid(slug) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Invalid slug '{slug}': use lowercase letters, digits and single hyphens"
        )))
    }
}
