use std::future::{ready, Ready};

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::content::{
    ArticleListParams, ArticlePatch, CategoryGetParams, CategoryListParams, CategoryPatch,
    DraftRequest, HistoryRequest, NewArticle, NewCategory, PriceParams, SettingsParams,
};
use crate::envelope::{DataEnvelope, ListEnvelope, MessageEnvelope, MetaEnvelope};
use crate::error::ApiError;
use crate::model::ModelStore;

use super::{AppState, Failure};

type Reply = Result<axum::response::Response, Failure>;

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }))
}

pub(super) async fn not_found(method: Method, uri: axum::http::Uri) -> Failure {
    Failure::new(
        ApiError::NotFound(format!("No route for {method} {}", uri.path())),
        false,
    )
}

/// Per-route fallback answering 405 with the route's `Allow` list.
pub(super) fn not_allowed(
    allowed: &'static [&'static str],
) -> impl Fn(Method) -> Ready<Failure> + Clone + Send + Sync + 'static {
    move |method: Method| ready(Failure::method_not_allowed(method, allowed))
}

// ---- articles

pub(super) async fn list_articles<S: ModelStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<ArticleListParams>, QueryRejection>,
) -> Reply {
    let Query(params) = query.map_err(Failure::bad_query)?;
    let result = state.service.list_articles(&params).map_err(|e| state.fail(e))?;
    Ok(Json(ListEnvelope::from(result)).into_response())
}

pub(super) async fn get_article<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Reply {
    let article = state.service.get_article(&id).map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::new(article)).into_response())
}

pub(super) async fn create_article<S: ModelStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Reply {
    let Json(input) = payload.map_err(Failure::bad_json)?;
    let article = state.service.create_article(input).map_err(|e| state.fail(e))?;
    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::with_message("Article created successfully", article)),
    )
        .into_response())
}

pub(super) async fn update_article<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<ArticlePatch>, JsonRejection>,
) -> Reply {
    let Json(patch) = payload.map_err(Failure::bad_json)?;
    let article = state
        .service
        .update_article(&id, patch)
        .map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::with_message("Article updated successfully", article)).into_response())
}

pub(super) async fn delete_article<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Reply {
    state.service.delete_article(&id).map_err(|e| state.fail(e))?;
    Ok(Json(MessageEnvelope::new(format!(
        "Article with ID {id} deleted successfully"
    )))
    .into_response())
}

// ---- categories

pub(super) async fn list_categories<S: ModelStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<CategoryListParams>, QueryRejection>,
) -> Reply {
    let Query(params) = query.map_err(Failure::bad_query)?;
    let result = state
        .service
        .list_categories(&params)
        .map_err(|e| state.fail(e))?;
    Ok(Json(ListEnvelope::from(result)).into_response())
}

pub(super) async fn get_category<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    query: Result<Query<CategoryGetParams>, QueryRejection>,
) -> Reply {
    let Query(params) = query.map_err(Failure::bad_query)?;
    let detail = state
        .service
        .get_category(&id, params.include_children)
        .map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::new(detail)).into_response())
}

pub(super) async fn create_category<S: ModelStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Reply {
    let Json(input) = payload.map_err(Failure::bad_json)?;
    let category = state
        .service
        .create_category(input)
        .map_err(|e| state.fail(e))?;
    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::with_message("Category created successfully", category)),
    )
        .into_response())
}

pub(super) async fn update_category<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryPatch>, JsonRejection>,
) -> Reply {
    let Json(patch) = payload.map_err(Failure::bad_json)?;
    let category = state
        .service
        .update_category(&id, patch)
        .map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::with_message("Category updated successfully", category)).into_response())
}

pub(super) async fn delete_category<S: ModelStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Reply {
    state.service.delete_category(&id).map_err(|e| state.fail(e))?;
    Ok(Json(MessageEnvelope::new(format!(
        "Category with ID {id} deleted successfully"
    )))
    .into_response())
}

// ---- settings

pub(super) async fn get_settings<S: ModelStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<SettingsParams>, QueryRejection>,
) -> Reply {
    let Query(params) = query.map_err(Failure::bad_query)?;
    let settings = state
        .service
        .settings(params.section)
        .map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::new(settings)).into_response())
}

pub(super) async fn update_settings<S: ModelStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Reply {
    let Json(patch) = payload.map_err(Failure::bad_json)?;
    let settings = state
        .service
        .update_settings(patch)
        .map_err(|e| state.fail(e))?;
    Ok(Json(DataEnvelope::with_message("Settings updated successfully", settings)).into_response())
}

// ---- price ticker

pub(super) async fn get_prices<S: ModelStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<PriceParams>, QueryRejection>,
) -> Reply {
    let Query(params) = query.map_err(Failure::bad_query)?;
    let (data, meta) = state.service.prices(&params).map_err(|e| state.fail(e))?;
    Ok(Json(MetaEnvelope::new(data, meta)).into_response())
}

pub(super) async fn price_history<S: ModelStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = payload.map_err(Failure::bad_json)?;
    let history = state
        .service
        .price_history(request)
        .map_err(|e| state.fail(e))?;
    Ok(Json(history).into_response())
}

// ---- drafts

pub(super) async fn create_draft<S: ModelStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Reply {
    let Json(request) = payload.map_err(Failure::bad_json)?;
    if !state.draft_delay.is_zero() {
        tokio::time::sleep(state.draft_delay).await;
    }
    let draft = state.service.create_draft(request).map_err(|e| state.fail(e))?;
    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::with_message("Draft created successfully", draft)),
    )
        .into_response())
}
