use std::collections::HashSet;

use crate::content::category::{is_valid_color, DEFAULT_COLOR, DEFAULT_ICON};
use crate::content::{
    non_blank, Article, Category, CategoryDetail, CategoryListParams, CategoryPatch, NewCategory,
};
use crate::error::ApiError;
use crate::model::{ModelStore, ModelsExt};
use crate::query::{Filter, Page, Query, QueryResult, Sort, SortOrder};

use super::{check_body_id, check_slug, missing, new_id, not_blank, now, Service};

impl<S: ModelStore> Service<S> {
    /// `GET /api/categories`
    ///
    /// Without `sort` or `order` the list comes in display order; naming
    /// either one falls back to the usual descending default for the other.
    pub fn list_categories(&self, params: &CategoryListParams) -> Result<QueryResult<Category>, ApiError> {
        let sort = match (params.sort, params.order) {
            (None, None) => Sort::asc("displayOrder"),
            (key, order) => Sort::new(key.unwrap_or_default().field(), order.unwrap_or_default()),
        };
        let query = Query::new(self.page(params.offset, params.limit)?)
            .filter_opt(non_blank(params.name.clone()), |v| Filter::contains_text("name", v))
            .filter_opt(non_blank(params.slug.clone()), |v| Filter::eq("slug", v))
            .filter_opt(non_blank(params.parent_id.clone()), |v| Filter::eq("parentId", v))
            .sort(sort);

        let result = query.run(self.store.models::<Category>().all()?);
        tracing::debug!(total = result.total(), count = result.count(), "listed categories");
        Ok(result)
    }

    /// `GET /api/categories/{id}`
    pub fn get_category(&self, id: &str, include_children: bool) -> Result<CategoryDetail, ApiError> {
        let category = self.require_category(id)?;
        let children = if include_children {
            Some(self.children_of(id)?)
        } else {
            None
        };
        Ok(CategoryDetail { category, children })
    }

    /// `POST /api/categories`
    pub fn create_category(&self, input: NewCategory) -> Result<Category, ApiError> {
        let absent = missing(&[
            ("name", &input.name),
            ("slug", &input.slug),
            ("description", &input.description),
        ]);
        if !absent.is_empty() {
            return Err(ApiError::missing_fields(&absent));
        }
        let slug = input.slug.unwrap_or_default().trim().to_string();
        check_slug(&slug)?;
        let color = non_blank(input.color).unwrap_or_else(|| DEFAULT_COLOR.to_string());
        check_color(&color)?;

        let _guard = self.write_guard();
        let repo = self.store.models::<Category>();

        if self.category_by_slug(&slug)?.is_some() {
            return Err(ApiError::conflict(format!(
                "Category with slug '{slug}' already exists"
            )));
        }
        let parent_id = non_blank(input.parent_id);
        if let Some(parent) = &parent_id {
            if repo.get(parent)?.is_none() {
                return Err(ApiError::validation(format!(
                    "Parent category {parent} does not exist"
                )));
            }
        }
        let display_order = match input.display_order {
            Some(order) => order,
            None => u32::try_from(repo.count()? + 1).unwrap_or(u32::MAX),
        };

        let category = Category {
            id: new_id(),
            name: input.name.unwrap_or_default().trim().to_string(),
            slug,
            description: input.description.unwrap_or_default().trim().to_string(),
            color,
            icon_name: non_blank(input.icon_name).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            featured_image: non_blank(input.featured_image),
            parent_id,
            display_order,
        };
        repo.insert(&category)?;
        tracing::info!(id = %category.id, slug = %category.slug, "category created");
        Ok(category)
    }

    /// `PUT /api/categories/{id}`
    ///
    /// Renaming the slug carries the articles filed under the old slug over
    /// to the new one.
    pub fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Category, ApiError> {
        check_body_id("Category", id, patch.id.as_deref())?;

        let _guard = self.write_guard();
        let repo = self.store.models::<Category>();
        let current = repo.get(id)?.ok_or_else(|| ApiError::not_found("Category", id))?;
        let version = current.version;
        let mut category = current.into_inner();
        let old_slug = category.slug.clone();

        if let Some(name) = not_blank("name", patch.name)? {
            category.name = name;
        }
        if let Some(description) = not_blank("description", patch.description)? {
            category.description = description;
        }
        if let Some(color) = not_blank("color", patch.color)? {
            check_color(&color)?;
            category.color = color;
        }
        if let Some(icon) = not_blank("iconName", patch.icon_name)? {
            category.icon_name = icon;
        }
        if let Some(image) = patch.featured_image {
            category.featured_image = non_blank(image);
        }
        if let Some(order) = patch.display_order {
            category.display_order = order;
        }
        if let Some(slug) = not_blank("slug", patch.slug)? {
            check_slug(&slug)?;
            if slug != old_slug && self.category_by_slug(&slug)?.is_some() {
                return Err(ApiError::conflict(format!(
                    "Category with slug '{slug}' already exists"
                )));
            }
            category.slug = slug;
        }
        if let Some(parent) = patch.parent_id {
            let parent = non_blank(parent);
            if let Some(parent) = &parent {
                self.check_parent(id, parent)?;
            }
            category.parent_id = parent;
        }

        // articles move first so a failed write never leaves them under a
        // slug no category carries
        let moved = if category.slug != old_slug {
            self.refile_articles(&old_slug, &category.slug)?
        } else {
            Vec::new()
        };
        if let Err(err) = repo.update(&category, version) {
            self.restore_articles(&moved);
            return Err(err.into());
        }
        tracing::info!(id, slug = %category.slug, "category updated");
        Ok(category)
    }

    /// `DELETE /api/categories/{id}`
    pub fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        let _guard = self.write_guard();
        let category = self.require_category(id)?;

        if !self.children_of(id)?.is_empty() {
            return Err(ApiError::validation(
                "Cannot delete a category that has child categories",
            ));
        }
        let filed = self
            .store
            .models::<Article>()
            .exists(&|a: &Article| a.category == category.slug)?;
        if filed {
            return Err(ApiError::validation(format!(
                "Cannot delete category '{}' while articles are filed under it",
                category.slug
            )));
        }

        if !self.store.models::<Category>().delete(id)? {
            return Err(ApiError::not_found("Category", id));
        }
        tracing::info!(id, slug = %category.slug, "category deleted");
        Ok(())
    }

    fn require_category(&self, id: &str) -> Result<Category, ApiError> {
        self.store
            .models::<Category>()
            .get(id)?
            .map(|v| v.into_inner())
            .ok_or_else(|| ApiError::not_found("Category", id))
    }

    /// Direct children in display order.
    fn children_of(&self, id: &str) -> Result<Vec<Category>, ApiError> {
        let children = self
            .store
            .models::<Category>()
            .find(&|c: &Category| c.parent_id.as_deref() == Some(id))?
            .into_iter()
            .map(|v| v.into_inner())
            .collect();
        Ok(Query::new(Page::everything())
            .sort(Sort::new("displayOrder", SortOrder::Asc))
            .run(children)
            .items)
    }

    /// `parent` must exist, differ from `id` and not descend from it.
    fn check_parent(&self, id: &str, parent: &str) -> Result<(), ApiError> {
        if parent == id {
            return Err(ApiError::validation("A category cannot be its own parent"));
        }
        let repo = self.store.models::<Category>();
        let mut seen = HashSet::new();
        let mut cursor = Some(parent.to_string());
        while let Some(current) = cursor {
            if current == id {
                return Err(ApiError::validation(format!(
                    "Category {parent} is a descendant of {id}; parent links cannot form a cycle"
                )));
            }
            if !seen.insert(current.clone()) {
                break;
            }
            let node = repo.get(&current)?.ok_or_else(|| {
                ApiError::validation(format!("Parent category {current} does not exist"))
            })?;
            cursor = node.into_inner().parent_id;
        }
        Ok(())
    }

    /// Move every article filed under `from` to `to`. Returns the articles
    /// as they were before the move. On failure the ones already moved are
    /// put back.
    fn refile_articles(&self, from: &str, to: &str) -> Result<Vec<Article>, ApiError> {
        let repo = self.store.models::<Article>();
        let filed = repo.find(&|a: &Article| a.category == from)?;
        let now = now();
        let mut moved = Vec::with_capacity(filed.len());
        for versioned in filed {
            let version = versioned.version;
            let original = versioned.into_inner();
            let mut article = original.clone();
            article.category = to.to_string();
            article.updated_at = now;
            if let Err(err) = repo.update(&article, version) {
                self.restore_articles(&moved);
                return Err(err.into());
            }
            moved.push(original);
        }
        if !moved.is_empty() {
            tracing::info!(from, to, count = moved.len(), "refiled articles under renamed category");
        }
        Ok(moved)
    }

    /// Write back articles captured before a refile.
    fn restore_articles(&self, originals: &[Article]) {
        let repo = self.store.models::<Article>();
        for article in originals {
            if let Err(err) = repo.save(article) {
                tracing::error!(id = %article.id, error = %err, "failed to restore article category");
            }
        }
    }
}

fn check_color(color: &str) -> Result<(), ApiError> {
    if is_valid_color(color) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Invalid color '{color}': expected #rgb or #rrggbb"
        )))
    }
}
