use crate::content::draft::{compose, DRAFT_AUTHOR};
use crate::content::{non_blank, slug, Article, ArticleStatus, Draft, DraftRequest};
use crate::error::ApiError;
use crate::model::{ModelStore, ModelsExt};

use super::{new_id, now, Service};

impl<S: ModelStore> Service<S> {
    /// `POST /api/ai-article/drafts`: compose a draft and file it as a
    /// `draft` article. The slug gets a numeric suffix if already taken.
    pub fn create_draft(&self, request: DraftRequest) -> Result<Draft, ApiError> {
        request.source.validate()?;
        let category = non_blank(request.category.clone())
            .unwrap_or_else(|| request.source.default_category().to_string());

        let now = now();
        let composition = compose(&request, now);
        let base = slug::slugify(&composition.title)
            .ok_or_else(|| ApiError::validation("Cannot derive a slug from the draft title"))?;

        let _guard = self.write_guard();
        self.require_category_slug(&category)?;

        let taken = self
            .store
            .models::<Article>()
            .all()?
            .into_iter()
            .map(|a| a.slug)
            .collect::<Vec<_>>();
        let slug = slug::unique(&base, |candidate| taken.iter().any(|s| s == candidate));

        let article = Article {
            id: new_id(),
            title: composition.title,
            slug,
            content: composition.content,
            excerpt: Some(composition.excerpt),
            category,
            author: DRAFT_AUTHOR.to_string(),
            published_at: None,
            featured_image: None,
            tags: composition.tags,
            status: ArticleStatus::Draft,
            meta_description: Some(composition.meta_description),
            created_at: now,
            updated_at: now,
        };
        self.store.models::<Article>().insert(&article)?;
        tracing::info!(
            id = %article.id,
            slug = %article.slug,
            kind = request.source.kind(),
            "draft article created"
        );

        Ok(Draft {
            article,
            content_score: composition.content_score,
            sources: composition.sources,
            input_type: request.source.kind(),
        })
    }
}
