use axum::response::IntoResponse;

pub async fn metrics() -> impl IntoResponse {
    blog_core::observability::render_metrics()
}
