use crate::content::{
    non_blank, normalize_tags, slug, Article, ArticleListParams, ArticlePatch, ArticleStatus,
    NewArticle,
};
use crate::error::ApiError;
use crate::model::{ModelStore, ModelsExt};
use crate::query::{Filter, Query, QueryResult, Sort};

use super::{check_body_id, check_slug, missing, new_id, not_blank, now, Service};

/// Fields searched by `q`.
const SEARCH_FIELDS: &[&str] = &["title", "excerpt", "content", "tags"];

impl<S: ModelStore> Service<S> {
    /// `GET /api/articles`
    pub fn list_articles(&self, params: &ArticleListParams) -> Result<QueryResult<Article>, ApiError> {
        let sort_key = params.sort.unwrap_or_default();
        let query = Query::new(self.page(params.offset, params.limit)?)
            .filter_opt(non_blank(params.category.clone()), |v| Filter::eq("category", v))
            .filter_opt(non_blank(params.tag.clone()), |v| Filter::has_member("tags", v))
            .filter_opt(params.status, |v| Filter::eq("status", v.as_str()))
            .filter_opt(non_blank(params.author.clone()), |v| Filter::eq("author", v))
            .filter_opt(non_blank(params.q.clone()), |v| Filter::search(SEARCH_FIELDS, v))
            .sort(Sort::new(sort_key.field(), params.order.unwrap_or_default()));

        let articles = self.store.models::<Article>().all()?;
        let result = query.run(articles);
        tracing::debug!(total = result.total(), count = result.count(), "listed articles");
        Ok(result)
    }

    /// `GET /api/articles/{id}`
    pub fn get_article(&self, id: &str) -> Result<Article, ApiError> {
        self.store
            .models::<Article>()
            .get(id)?
            .map(|v| v.into_inner())
            .ok_or_else(|| ApiError::not_found("Article", id))
    }

    /// `POST /api/articles`
    pub fn create_article(&self, input: NewArticle) -> Result<Article, ApiError> {
        let absent = missing(&[
            ("title", &input.title),
            ("content", &input.content),
            ("category", &input.category),
            ("author", &input.author),
        ]);
        if !absent.is_empty() {
            return Err(ApiError::missing_fields(&absent));
        }
        // all four are present and non-blank past this point
        let title = input.title.unwrap_or_default().trim().to_string();
        let content = input.content.unwrap_or_default();
        let category = input.category.unwrap_or_default().trim().to_string();
        let author = input.author.unwrap_or_default().trim().to_string();

        let _guard = self.write_guard();

        let slug = match non_blank(input.slug) {
            Some(slug) => {
                check_slug(&slug)?;
                slug
            }
            None => slug::slugify(&title).ok_or_else(|| {
                ApiError::validation("Cannot derive a slug from the title; provide one")
            })?,
        };
        if self.article_slug_taken(&slug, None)? {
            return Err(ApiError::conflict(format!(
                "Article with slug '{slug}' already exists"
            )));
        }
        self.require_category_slug(&category)?;

        let now = now();
        let mut article = Article {
            id: new_id(),
            title,
            slug,
            content,
            excerpt: non_blank(input.excerpt),
            category,
            author,
            published_at: None,
            featured_image: non_blank(input.featured_image),
            tags: normalize_tags(input.tags.unwrap_or_default()),
            status: ArticleStatus::Draft,
            meta_description: non_blank(input.meta_description),
            created_at: now,
            updated_at: now,
        };
        article.set_status(input.status.unwrap_or_default(), now);

        self.store.models::<Article>().insert(&article)?;
        tracing::info!(id = %article.id, slug = %article.slug, status = article.status.as_str(), "article created");
        Ok(article)
    }

    /// `PUT /api/articles/{id}`
    pub fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Article, ApiError> {
        check_body_id("Article", id, patch.id.as_deref())?;

        let _guard = self.write_guard();
        let repo = self.store.models::<Article>();
        let current = repo.get(id)?.ok_or_else(|| ApiError::not_found("Article", id))?;
        let version = current.version;
        let mut article = current.into_inner();

        if let Some(title) = not_blank("title", patch.title)? {
            article.title = title;
        }
        if let Some(content) = not_blank("content", patch.content)? {
            article.content = content;
        }
        if let Some(author) = not_blank("author", patch.author)? {
            article.author = author;
        }
        if let Some(slug) = not_blank("slug", patch.slug)? {
            check_slug(&slug)?;
            if slug != article.slug && self.article_slug_taken(&slug, Some(id))? {
                return Err(ApiError::conflict(format!(
                    "Article with slug '{slug}' already exists"
                )));
            }
            article.slug = slug;
        }
        if let Some(category) = not_blank("category", patch.category)? {
            self.require_category_slug(&category)?;
            article.category = category;
        }
        if let Some(excerpt) = patch.excerpt {
            article.excerpt = non_blank(excerpt);
        }
        if let Some(image) = patch.featured_image {
            article.featured_image = non_blank(image);
        }
        if let Some(meta) = patch.meta_description {
            article.meta_description = non_blank(meta);
        }
        if let Some(tags) = patch.tags {
            article.tags = normalize_tags(tags);
        }

        let now = now();
        if let Some(status) = patch.status {
            article.set_status(status, now);
        }
        article.updated_at = now;

        repo.update(&article, version)?;
        tracing::info!(id, status = article.status.as_str(), "article updated");
        Ok(article)
    }

    /// `DELETE /api/articles/{id}`
    pub fn delete_article(&self, id: &str) -> Result<(), ApiError> {
        let _guard = self.write_guard();
        if !self.store.models::<Article>().delete(id)? {
            return Err(ApiError::not_found("Article", id));
        }
        tracing::info!(id, "article deleted");
        Ok(())
    }
}
