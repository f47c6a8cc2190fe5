use crate::editor::{apply_markup, Edit, Markup};
use crate::models::AuthUser;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub markup: Markup,
}

/// Toolbar action of the markdown editor.
///
/// POST /admin/editor/format
pub async fn format_handler(_user: AuthUser, Json(request): Json<FormatRequest>) -> Json<Edit> {
    Json(apply_markup(
        &request.text,
        request.start,
        request.end,
        request.markup,
    ))
}
