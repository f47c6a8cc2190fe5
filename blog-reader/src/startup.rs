use axum::{middleware::from_fn, routing::get, Router};
use blog_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, request_span},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    about::about,
    app::{health_check, index},
    articles::{article, home},
    categories::{categories, category},
    metrics::metrics,
    sitemap::sitemap,
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/sitemap.xml", get(sitemap))
        .route("/:locale", get(home))
        .route("/:locale/article/:slug", get(article))
        .route("/:locale/categories", get(categories))
        .route("/:locale/categories/:slug", get(category))
        .route("/:locale/about", get(about))
        .route_layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
