//! HTTP transport - maps REST routes onto the content service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health`
//! - `GET|POST /api/articles`, `GET|PUT|DELETE /api/articles/:id`
//! - `GET|POST /api/categories`, `GET|PUT|DELETE /api/categories/:id`
//! - `GET|PUT /api/settings`
//! - `GET|POST /api/price-ticker`
//! - `POST /api/ai-article/drafts`
//!
//! Any other method on a known path answers 405 with an `Allow` header;
//! unknown paths answer 404. Both use the standard error envelope.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coindaily::{http, model::InMemoryModelStore, service::Service};
//!
//! let service = Arc::new(Service::new(InMemoryModelStore::new()));
//! let app = http::router(http::AppState::new(service.clone()));
//! // or
//! http::serve(http::AppState::new(service), "127.0.0.1:3000").await?;
//! ```

mod failure;
mod handlers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::error::ApiError;
use crate::model::ModelStore;
use crate::service::Service;

pub use failure::Failure;

/// Shared state for every handler.
pub struct AppState<S> {
    pub service: Arc<Service<S>>,
    /// Put the error chain of 5xx responses in `detail`.
    pub expose_detail: bool,
    /// Artificial latency of the drafting endpoint.
    pub draft_delay: Duration,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            expose_detail: self.expose_detail,
            draft_delay: self.draft_delay,
        }
    }
}

impl<S: ModelStore> AppState<S> {
    pub fn new(service: Arc<Service<S>>) -> Self {
        Self {
            service,
            expose_detail: false,
            draft_delay: Duration::ZERO,
        }
    }

    pub fn expose_detail(mut self, expose: bool) -> Self {
        self.expose_detail = expose;
        self
    }

    pub fn draft_delay(mut self, delay: Duration) -> Self {
        self.draft_delay = delay;
        self
    }

    fn fail(&self, error: impl Into<ApiError>) -> Failure {
        Failure::new(error.into(), self.expose_detail)
    }
}

/// Build an axum `Router` serving the content API.
pub fn router<S: ModelStore + 'static>(state: AppState<S>) -> Router {
    use handlers::*;

    Router::new()
        .route("/health", get(health).fallback(not_allowed(&["GET"])))
        .route(
            "/api/articles",
            get(list_articles::<S>)
                .post(create_article::<S>)
                .fallback(not_allowed(&["GET", "POST"])),
        )
        .route(
            "/api/articles/:id",
            get(get_article::<S>)
                .put(update_article::<S>)
                .delete(delete_article::<S>)
                .fallback(not_allowed(&["GET", "PUT", "DELETE"])),
        )
        .route(
            "/api/categories",
            get(list_categories::<S>)
                .post(create_category::<S>)
                .fallback(not_allowed(&["GET", "POST"])),
        )
        .route(
            "/api/categories/:id",
            get(get_category::<S>)
                .put(update_category::<S>)
                .delete(delete_category::<S>)
                .fallback(not_allowed(&["GET", "PUT", "DELETE"])),
        )
        .route(
            "/api/settings",
            get(get_settings::<S>)
                .put(update_settings::<S>)
                .fallback(not_allowed(&["GET", "PUT"])),
        )
        .route(
            "/api/price-ticker",
            get(get_prices::<S>)
                .post(price_history::<S>)
                .fallback(not_allowed(&["GET", "POST"])),
        )
        .route(
            "/api/ai-article/drafts",
            post(create_draft::<S>).fallback(not_allowed(&["POST"])),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(track))
        .with_state(state)
}

/// Serve the API at `addr` (e.g. `"127.0.0.1:3000"`) until Ctrl-C.
pub async fn serve<S: ModelStore + 'static>(
    state: AppState<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Disable caching on every response and log one line per request.
async fn track(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, max-age=0"),
    );

    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}
