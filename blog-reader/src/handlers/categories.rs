use super::{message_page, parse_locale, Chrome};
use crate::models::{ArticleCard, Category};
use crate::i18n::Labels;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub struct CategoryView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub count: String,
}

impl CategoryView {
    fn new(category: &Category, labels: &Labels) -> Self {
        Self {
            slug: category.slug().to_string(),
            name: category.name.clone(),
            description: category
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| labels.no_description.to_string()),
            count: labels.article_count(category.article_count.unwrap_or(0)),
        }
    }
}

#[derive(Template)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub chrome: Chrome,
    pub categories: Vec<CategoryView>,
    pub error: Option<&'static str>,
}

/// GET /:locale/categories
pub async fn categories(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
    let locale = match parse_locale(&locale, state.reader.default_locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let chrome = Chrome::new(locale, "categories", "/categories");

    let (categories, error) = match state.api.categories().await {
        Ok(categories) => (
            categories
                .iter()
                .map(|c| CategoryView::new(c, chrome.labels))
                .collect(),
            None,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            (Vec::new(), Some(chrome.labels.load_failed))
        }
    };

    CategoriesTemplate {
        chrome,
        categories,
        error,
    }
    .into_response()
}

#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub chrome: Chrome,
    pub category: CategoryView,
    pub cards: Vec<ArticleCard>,
    pub error: Option<&'static str>,
}

/// Articles of one category.
///
/// GET /:locale/categories/:slug
pub async fn category(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    let locale = match parse_locale(&locale, state.reader.default_locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let chrome = Chrome::new(locale, "categories", &format!("/categories/{}", slug));

    let found = match state.api.categories().await {
        Ok(categories) => categories.into_iter().find(|c| c.slug() == slug),
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to load categories");
            let message = chrome.labels.load_failed;
            return message_page(StatusCode::BAD_GATEWAY, chrome, message);
        }
    };
    let Some(found) = found else {
        let message = chrome.labels.category_not_found;
        return message_page(StatusCode::NOT_FOUND, chrome, message);
    };

    let (cards, error) = match state
        .api
        .articles_in_category(found.slug(), state.reader.category_page_size)
        .await
    {
        Ok(articles) => (articles.iter().map(|a| a.card(locale)).collect(), None),
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to load category articles");
            (Vec::new(), Some(chrome.labels.load_failed))
        }
    };

    CategoryTemplate {
        category: CategoryView::new(&found, chrome.labels),
        chrome,
        cards,
        error,
    }
    .into_response()
}
