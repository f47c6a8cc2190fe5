use super::{parse_locale, Chrome};
use crate::markdown;
use crate::models::AboutContent;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

const ABOUT_PAGE_ID: &str = "about";

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub chrome: Chrome,
    pub about: AboutContent,
    pub body: String,
}

/// GET /:locale/about
pub async fn about(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
    let locale = match parse_locale(&locale, state.reader.default_locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };

    let page = state.api.page(ABOUT_PAGE_ID).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load about page, using built-in copy");
        None
    });
    let about = AboutContent::from_page(page.as_ref(), locale);
    let body = markdown::render(&about.content).html;

    AboutTemplate {
        chrome: Chrome::new(locale, "about", "/about"),
        about,
        body,
    }
    .into_response()
}
