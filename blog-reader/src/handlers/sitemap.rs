use crate::i18n::Locale;
use crate::models::{parse_date, Article, Category};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};

/// Upper bound on articles listed; the backend caps page size anyway.
const SITEMAP_ARTICLE_LIMIT: u32 = 1000;

const LOCALES: [Locale; 2] = [Locale::Zh, Locale::En];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub entries: Vec<SitemapEntry>,
}

/// Every public URL: home and about per locale, then each article and
/// category in both locales.
pub fn sitemap_entries(
    site_url: &str,
    articles: &[Article],
    categories: &[Category],
    today: NaiveDate,
) -> Vec<SitemapEntry> {
    let site_url = site_url.trim_end_matches('/');
    let today = today.format("%Y-%m-%d").to_string();
    let entry = |rest: String, lastmod: String, changefreq: &'static str, priority: &'static str| SitemapEntry {
        loc: format!("{}{}", site_url, rest),
        lastmod,
        changefreq,
        priority,
    };

    let mut entries = vec![entry(String::new(), today.clone(), "daily", "1.0")];
    entries.extend(LOCALES.iter().map(|l| entry(format!("/{}", l), today.clone(), "daily", "1.0")));
    entries.extend(LOCALES.iter().map(|l| entry(format!("/{}/about", l), today.clone(), "monthly", "0.5")));

    for locale in LOCALES {
        for article in articles {
            let lastmod = article
                .update_time
                .as_deref()
                .or(article.published_at.as_deref())
                .and_then(parse_date)
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| today.clone());
            entries.push(entry(
                format!("/{}/article/{}", locale, article.slug()),
                lastmod,
                "weekly",
                "0.8",
            ));
        }
    }

    for category in categories {
        for locale in LOCALES {
            entries.push(entry(
                format!("/{}/categories/{}", locale, category.slug()),
                today.clone(),
                "weekly",
                "0.6",
            ));
        }
    }

    entries
}

/// Search-engine sitemap. A failing backend call drops that section only.
///
/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let articles = match state.api.articles(0, SITEMAP_ARTICLE_LIMIT).await {
        Ok(page) => page.content,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load articles for sitemap");
            Vec::new()
        }
    };
    let categories = match state.api.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories for sitemap");
            Vec::new()
        }
    };

    let entries = sitemap_entries(
        &state.reader.site_url,
        &articles,
        &categories,
        Utc::now().date_naive(),
    );
    match (SitemapTemplate { entries }).render() {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render sitemap");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn static_pages_come_first() {
        let entries = sitemap_entries("https://blog.example.com/", &[], &[], today());
        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://blog.example.com",
                "https://blog.example.com/zh",
                "https://blog.example.com/en",
                "https://blog.example.com/zh/about",
                "https://blog.example.com/en/about",
            ]
        );
        assert_eq!(entries[3].changefreq, "monthly");
        assert!(entries.iter().all(|e| e.lastmod == "2025-01-15"));
    }

    #[test]
    fn articles_use_their_last_update() {
        let articles: Vec<Article> = serde_json::from_value(json!([
            {"id": "1", "articleId": "rust-bff", "title": "A", "updateTime": "2024-06-01T08:00:00"},
            {"id": "2", "title": "B"}
        ]))
        .unwrap();

        let entries = sitemap_entries("https://blog.example.com", &articles, &[], today());
        let articles: Vec<_> = entries.iter().filter(|e| e.priority == "0.8").collect();

        assert_eq!(articles.len(), 4);
        assert_eq!(articles[0].loc, "https://blog.example.com/zh/article/rust-bff");
        assert_eq!(articles[0].lastmod, "2024-06-01");
        assert_eq!(articles[1].loc, "https://blog.example.com/zh/article/2");
        assert_eq!(articles[1].lastmod, "2025-01-15");
        assert_eq!(articles[2].loc, "https://blog.example.com/en/article/rust-bff");
    }

    #[test]
    fn categories_are_listed_in_both_locales() {
        let categories: Vec<Category> = serde_json::from_value(json!([
            {"id": "c1", "categoryId": "eng", "name": "Engineering"}
        ]))
        .unwrap();

        let entries = sitemap_entries("https://blog.example.com", &[], &categories, today());
        let tail: Vec<&str> = entries[5..].iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            tail,
            vec![
                "https://blog.example.com/zh/categories/eng",
                "https://blog.example.com/en/categories/eng",
            ]
        );
    }
}
