use crate::AppState;
use axum::{extract::State, response::Redirect};

/// GET /
pub async fn index(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.reader.default_locale))
}

pub async fn health_check() -> &'static str {
    "OK"
}
