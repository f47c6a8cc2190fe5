use crate::models::{Article, ArticlePage, Category, Page};
use blog_core::config::BackendSettings;
use blog_core::observability::TracedClientExt;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ReaderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReaderError::Status(404))
    }
}

/// Read-only client for the public parts of the blog backend.
#[derive(Clone)]
pub struct ReaderClient {
    client: Client,
    base_url: String,
}

impl ReaderClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, ReaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ReaderError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .traced_get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %e, "Backend request failed");
                ReaderError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                tracing::warn!(path = %path, status = status.as_u16(), "Backend rejected request");
            }
            return Err(ReaderError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Failed to decode backend response");
            ReaderError::Decode(e.to_string())
        })
    }

    /// Newest first.
    pub async fn articles(&self, page: u32, size: u32) -> Result<ArticlePage, ReaderError> {
        self.get(
            "/api/articles",
            &[
                ("page", page.to_string()),
                ("size", size.to_string()),
                ("sort", "createTime,desc".to_string()),
            ],
        )
        .await
    }

    pub async fn articles_in_category(&self, category_id: &str, size: u32) -> Result<Vec<Article>, ReaderError> {
        let page: ArticlePage = self
            .get(
                "/api/articles",
                &[("categoryId", category_id.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(page.content)
    }

    /// `None` when no article has this slug.
    pub async fn article(&self, slug: &str) -> Result<Option<Article>, ReaderError> {
        match self
            .get(&format!("/api/articles/by-article-id/{}", slug), &())
            .await
        {
            Ok(article) => Ok(Some(article)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn related(&self, slug: &str, limit: u32) -> Result<Vec<Article>, ReaderError> {
        self.get(
            &format!("/api/articles/by-article-id/{}/related", slug),
            &[("limit", limit)],
        )
        .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ReaderError> {
        self.get("/api/categories", &()).await
    }

    /// `None` when the page does not exist.
    pub async fn page(&self, page_id: &str) -> Result<Option<Page>, ReaderError> {
        match self.get(&format!("/api/pages/{}", page_id), &()).await {
            Ok(page) => Ok(Some(page)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
