use super::{message_page, parse_locale, Chrome};
use crate::markdown::{self, TocEntry};
use crate::models::ArticleCard;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    /// Zero-based listing page.
    #[serde(default)]
    pub page: u32,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub cards: Vec<ArticleCard>,
    pub newer_href: Option<String>,
    pub older_href: Option<String>,
    pub error: Option<&'static str>,
}

/// Latest articles, newest first.
///
/// GET /:locale
pub async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(params): Query<HomeParams>,
) -> Response {
    let locale = match parse_locale(&locale, state.reader.default_locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let chrome = Chrome::new(locale, "home", "");

    let mut template = HomeTemplate {
        newer_href: (params.page > 0).then(|| chrome.href(&format!("?page={}", params.page - 1))),
        older_href: None,
        cards: Vec::new(),
        error: None,
        chrome,
    };

    match state.api.articles(params.page, state.reader.page_size).await {
        Ok(page) => {
            template.cards = page.content.iter().map(|a| a.card(locale)).collect();
            if page.has_more() {
                template.older_href = Some(template.chrome.href(&format!("?page={}", params.page + 1)));
            }
        }
        Err(e) => {
            tracing::error!(page = params.page, error = %e, "Failed to load article list");
            template.error = Some(template.chrome.labels.load_failed);
        }
    }

    template.into_response()
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub chrome: Chrome,
    pub card: ArticleCard,
    pub body: String,
    pub toc: Vec<TocEntry>,
    pub related: Vec<ArticleCard>,
}

/// One article with its table of contents and related reading.
///
/// GET /:locale/article/:slug
pub async fn article(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    let locale = match parse_locale(&locale, state.reader.default_locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let chrome = Chrome::new(locale, "home", &format!("/article/{}", slug));

    let (article, related) = tokio::join!(
        state.api.article(&slug),
        state.api.related(&slug, state.reader.related_limit)
    );

    let article = match article {
        Ok(Some(article)) => article,
        Ok(None) => {
            let message = chrome.labels.article_not_found;
            return message_page(StatusCode::NOT_FOUND, chrome, message);
        }
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to load article");
            let message = chrome.labels.load_failed;
            return message_page(StatusCode::BAD_GATEWAY, chrome, message);
        }
    };

    let related = related.unwrap_or_else(|e| {
        tracing::warn!(slug = %slug, error = %e, "Failed to load related articles");
        Vec::new()
    });

    let content = article.content.as_deref().unwrap_or_default();
    let rendered = markdown::render(content);

    ArticleTemplate {
        card: article.card(locale),
        body: rendered.html,
        toc: rendered.toc,
        related: related
            .iter()
            .filter(|r| r.slug() != article.slug())
            .map(|r| r.card(locale))
            .collect(),
        chrome,
    }
    .into_response()
}
