//! Articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_some;
use crate::model::Model;
use crate::query::{FieldValue, Record, SortOrder};

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }
}

/// A news article. `category` holds the slug of an existing category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub category: String,
    pub author: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model for Article {
    const COLLECTION: &'static str = "articles";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Article {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Text(&self.id),
            "title" => FieldValue::Text(&self.title),
            "slug" => FieldValue::Text(&self.slug),
            "content" => FieldValue::Text(&self.content),
            "excerpt" => FieldValue::opt_text(self.excerpt.as_deref()),
            "category" => FieldValue::Text(&self.category),
            "author" => FieldValue::Text(&self.author),
            "publishedAt" => FieldValue::opt_time(self.published_at),
            "featuredImage" => FieldValue::opt_text(self.featured_image.as_deref()),
            "tags" => FieldValue::List(&self.tags),
            "status" => FieldValue::Text(self.status.as_str()),
            "metaDescription" => FieldValue::opt_text(self.meta_description.as_deref()),
            "createdAt" => FieldValue::Time(self.created_at),
            "updatedAt" => FieldValue::Time(self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Article {
    /// Move to `status`, stamping `publishedAt` the first time the article
    /// is published.
    pub fn set_status(&mut self, status: ArticleStatus, now: DateTime<Utc>) {
        if status == ArticleStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.status = status;
    }
}

/// Body of `POST /api/articles`.
///
/// Required fields are optional here so that every missing one can be
/// reported at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<ArticleStatus>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub meta_description: Option<String>,
}

/// Body of `PUT /api/articles/{id}`. Absent keys keep their value; `null`
/// clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticlePatch {
    /// Must match the path id when present.
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub excerpt: Option<Option<String>>,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub featured_image: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ArticleStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub meta_description: Option<Option<String>>,
}

/// Sortable article fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArticleSortKey {
    #[default]
    PublishedAt,
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
    Category,
    Status,
    Slug,
}

impl ArticleSortKey {
    pub fn field(&self) -> &'static str {
        match self {
            ArticleSortKey::PublishedAt => "publishedAt",
            ArticleSortKey::CreatedAt => "createdAt",
            ArticleSortKey::UpdatedAt => "updatedAt",
            ArticleSortKey::Title => "title",
            ArticleSortKey::Author => "author",
            ArticleSortKey::Category => "category",
            ArticleSortKey::Status => "status",
            ArticleSortKey::Slug => "slug",
        }
    }
}

/// Query string of `GET /api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticleListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<ArticleStatus>,
    pub author: Option<String>,
    /// Free-text search over title, excerpt, content and tags.
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Option<ArticleSortKey>,
    pub order: Option<SortOrder>,
}
