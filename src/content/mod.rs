//! Content domain: the records the API serves and the request shapes that
//! create, change and query them.
//!
//! Request types are strict: unknown keys are rejected when deserializing,
//! so a mistyped filter or field never passes silently.

pub mod article;
pub mod category;
pub mod draft;
pub mod price;
pub mod seed;
pub mod settings;
pub mod slug;

use serde::{Deserialize, Deserializer};

pub use article::{
    Article, ArticleListParams, ArticlePatch, ArticleSortKey, ArticleStatus, NewArticle,
};
pub use category::{
    Category, CategoryDetail, CategoryGetParams, CategoryListParams, CategoryPatch,
    CategorySortKey, NewCategory,
};
pub use draft::{Draft, DraftRequest, DraftSource, SourceRef};
pub use price::{
    HistoryPoint, HistoryRequest, PriceEntry, PriceHistory, PriceMeta, PriceParams,
    PriceSortKey, PriceSummary, PriceView,
};
pub use settings::{SettingsParams, SettingsSection, SiteSettings};

/// Distinguish an absent key from an explicit `null` in a patch body.
///
/// Used as `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: absent stays `None`, `null` becomes `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treat empty or whitespace-only strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim, drop blanks and duplicates, keep first-seen order.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
