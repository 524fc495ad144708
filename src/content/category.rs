//! Categories form a tree through `parentId`.

use serde::{Deserialize, Serialize};

use super::deserialize_some;
use crate::model::Model;
use crate::query::{FieldValue, Record, SortOrder};

pub const DEFAULT_COLOR: &str = "#607D8B";
pub const DEFAULT_ICON: &str = "category";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub color: String,
    pub icon_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub display_order: u32,
}

impl Model for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "slug" => FieldValue::Text(&self.slug),
            "description" => FieldValue::Text(&self.description),
            "color" => FieldValue::Text(&self.color),
            "iconName" => FieldValue::Text(&self.icon_name),
            "featuredImage" => FieldValue::opt_text(self.featured_image.as_deref()),
            "parentId" => FieldValue::opt_text(self.parent_id.as_deref()),
            "displayOrder" => FieldValue::Number(f64::from(self.display_order)),
            _ => FieldValue::Missing,
        }
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_valid_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// A category with its direct children, for `includeChildren=true`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Category>>,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon_name: Option<String>,
    pub featured_image: Option<String>,
    pub parent_id: Option<String>,
    pub display_order: Option<u32>,
}

/// Body of `PUT /api/categories/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub featured_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub parent_id: Option<Option<String>>,
    pub display_order: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategorySortKey {
    #[default]
    DisplayOrder,
    Name,
    Slug,
}

impl CategorySortKey {
    pub fn field(&self) -> &'static str {
        match self {
            CategorySortKey::DisplayOrder => "displayOrder",
            CategorySortKey::Name => "name",
            CategorySortKey::Slug => "slug",
        }
    }
}

/// Query string of `GET /api/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryListParams {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Option<CategorySortKey>,
    pub order: Option<SortOrder>,
}

/// Query string of `GET /api/categories/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryGetParams {
    #[serde(default)]
    pub include_children: bool,
}
