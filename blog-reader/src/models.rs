//! Backend records the reader consumes, and the card/page views built from them.

use crate::i18n::{Labels, Locale};
use crate::markdown::excerpt;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default)]
    pub category_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub article_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub tags: Option<Vec<TagRef>>,
}

impl Article {
    /// Public URL segment: the article slug, else the internal id.
    pub fn slug(&self) -> &str {
        self.article_id
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .flatten()
            .map(|tag| tag.name.clone())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Category name, else the first tag, else the "uncategorized" label.
    pub fn topic(&self, labels: &Labels) -> String {
        self.category
            .as_ref()
            .map(|category| category.name.clone())
            .or_else(|| self.tag_names().into_iter().next())
            .unwrap_or_else(|| labels.uncategorized.to_string())
    }

    /// The summary when present, else the start of the body.
    pub fn excerpt(&self, labels: &Labels) -> String {
        let summary = self.summary.as_deref().map(str::trim).unwrap_or_default();
        if !summary.is_empty() {
            return summary.to_string();
        }
        let preview = excerpt(self.content.as_deref().unwrap_or_default(), EXCERPT_CHARS);
        if preview.is_empty() {
            labels.no_description.to_string()
        } else {
            preview
        }
    }

    pub fn read_time_label(&self, labels: &Labels) -> String {
        self.read_time
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(labels.read_time_pending)
            .to_string()
    }

    pub fn card(&self, locale: Locale) -> ArticleCard {
        let labels = locale.labels();
        ArticleCard {
            slug: self.slug().to_string(),
            title: self.title.clone(),
            excerpt: self.excerpt(labels),
            topic: self.topic(labels),
            tags: self.tag_names(),
            date: format_date(self.published_at.as_deref(), labels),
            read_time: self.read_time_label(labels),
            cover_image: self.cover_image.clone().filter(|url| !url.is_empty()),
        }
    }
}

/// One entry of an article listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub date: String,
    pub read_time: String,
    pub cover_image: Option<String>,
}

/// `YYYY-MM-DD`, or a label when unpublished or unparseable.
pub fn format_date(value: Option<&str>, labels: &Labels) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return labels.date_pending.to_string();
    };

    match parse_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => labels.date_unknown.to_string(),
    }
}

/// Calendar date of a backend timestamp: RFC 3339, offset-less ISO or a bare date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// A page of the article listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    #[serde(default)]
    pub content: Vec<Article>,
    #[serde(default)]
    pub number: u32,
    /// Absent means "no more pages".
    #[serde(default)]
    pub last: Option<bool>,
}

impl ArticlePage {
    pub fn has_more(&self) -> bool {
        self.last == Some(false)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub article_count: Option<u64>,
}

impl Category {
    /// Public URL segment: the category slug, else the internal id.
    pub fn slug(&self) -> &str {
        if self.category_id.is_empty() {
            &self.id
        } else {
            &self.category_id
        }
    }
}

/// A static page (`about`), with optional English variants of each text field.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub subtitle_en: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// The about page as shown in one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub email: String,
    pub github: String,
    pub website: String,
}

impl AboutContent {
    /// Built-in copy used when the backend has no about page.
    pub fn fallback(locale: Locale) -> Self {
        let (title, subtitle, content) = match locale {
            Locale::En => (
                "About DeepVeir",
                "Explore, build and think",
                "## Hello!\n\nWelcome to the **DeepVeir Blog**, a place for technical writing and deep thinking.\n\n### What you will find here\n\n- **Architecture**: system design, microservices, cloud native\n- **AI applications**: large models and intelligent products\n- **Frontend**: modern web development\n- **Product design**: user experience and design systems\n",
            ),
            Locale::Zh => (
                "关于 DeepVeir",
                "探索、构建与思考",
                "## 你好！\n\n欢迎来到 **DeepVeir Blog**，这是一个专注于技术分享与深度思考的个人博客。\n\n### 博客定位\n\n- **技术架构**：系统设计、微服务、云原生等\n- **AI 应用**：大模型、机器学习、智能应用开发\n- **前端开发**：现代前端技术\n- **产品设计**：用户体验、产品思维、设计系统\n",
            ),
        };
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            content: content.to_string(),
            email: "contact@deepveir.com".to_string(),
            github: "https://github.com/DeepVeir".to_string(),
            website: "https://www.deepveir.com".to_string(),
        }
    }

    /// Localize `page`, filling any missing field from the built-in copy.
    ///
    /// A page without body content is treated as absent.
    pub fn from_page(page: Option<&Page>, locale: Locale) -> Self {
        let fallback = Self::fallback(locale);
        let Some(page) = page else {
            return fallback;
        };
        let Some(content) = locale.pick(page.content.as_deref(), page.content_en.as_deref()) else {
            return fallback;
        };

        Self {
            title: or_fallback(
                locale.pick(page.title.as_deref(), page.title_en.as_deref()),
                fallback.title,
            ),
            subtitle: or_fallback(
                locale.pick(page.subtitle.as_deref(), page.subtitle_en.as_deref()),
                fallback.subtitle,
            ),
            content: content.to_string(),
            email: or_fallback(non_blank(&page.email), fallback.email),
            github: or_fallback(non_blank(&page.github), fallback.github),
            website: or_fallback(non_blank(&page.website), fallback.website),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn or_fallback(value: Option<&str>, fallback: String) -> String {
    value.map(str::to_string).unwrap_or(fallback)
}
