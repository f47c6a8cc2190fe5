//! Blog content: categories, tags, static pages and articles.

use super::{form_number, non_blank, null_as_default, trim_in_place, FormField, Resource, ResourceForm, SelectOption};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    pub category_id: String,
    #[validate(length(min = 1, message = "Category name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "form_number")]
    pub sort_order: i32,
}

impl ResourceForm for CategoryForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.category_id);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({
            "categoryId": self.category_id,
            "name": self.name,
            "description": self.description,
            "sortOrder": self.sort_order,
        })
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("category_id", "Category ID", "text", self.category_id.clone()).readonly(editing),
            FormField::new("name", "Name", "text", self.name.clone()).required(),
            FormField::new("description", "Description", "textarea", self.description.clone()),
            FormField::new("sort_order", "Sort order", "number", self.sort_order.to_string()),
        ]
    }
}

impl Resource for Category {
    type Form = CategoryForm;

    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> CategoryForm {
        CategoryForm {
            category_id: self.category_id.clone(),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            sort_order: self.sort_order,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Category ID", "Description", "Order"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category_id.clone(),
            self.description.clone().unwrap_or_default(),
            self.sort_order.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub tag_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default)]
    pub tag_id: String,
    #[validate(length(min = 1, message = "Tag name is required"))]
    #[serde(default)]
    pub name: String,
}

impl ResourceForm for TagForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.tag_id);
        trim_in_place(&mut self.name);
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({ "tagId": self.tag_id, "name": self.name })
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("tag_id", "Tag ID", "text", self.tag_id.clone()).readonly(editing),
            FormField::new("name", "Name", "text", self.name.clone()).required(),
        ]
    }
}

impl Resource for Tag {
    type Form = TagForm;

    const COLLECTION: &'static str = "tags";
    const LABEL: &'static str = "Tag";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> TagForm {
        TagForm {
            tag_id: self.tag_id.clone(),
            name: self.name.clone(),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Tag ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.tag_id.clone()]
    }
}

/// A static page such as `about`, bilingual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub page_id: String,
    pub title: String,
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
    #[serde(default)]
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageForm {
    #[validate(length(min = 1, message = "Page ID is required"))]
    #[serde(default)]
    pub page_id: String,
    #[validate(length(min = 1, message = "Page title is required"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub subtitle_en: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_en: String,
    #[validate(email(message = "Email address is invalid"))]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub website: String,
    #[serde(default = "enabled", deserialize_with = "form_number")]
    pub status: i32,
}

fn enabled() -> i32 {
    1
}

impl Default for PageForm {
    fn default() -> Self {
        Self {
            page_id: String::new(),
            title: String::new(),
            title_en: String::new(),
            subtitle: String::new(),
            subtitle_en: String::new(),
            content: String::new(),
            content_en: String::new(),
            email: None,
            github: String::new(),
            website: String::new(),
            status: 1,
        }
    }
}

impl ResourceForm for PageForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.page_id);
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.title_en);
        trim_in_place(&mut self.subtitle);
        trim_in_place(&mut self.subtitle_en);
        trim_in_place(&mut self.github);
        trim_in_place(&mut self.website);
        self.email = self.email.as_deref().and_then(non_blank);
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({
            "pageId": self.page_id,
            "title": self.title,
            "titleEn": non_blank(&self.title_en),
            "subtitle": non_blank(&self.subtitle),
            "subtitleEn": non_blank(&self.subtitle_en),
            "content": self.content,
            "contentEn": non_blank(&self.content_en),
            "email": self.email,
            "github": non_blank(&self.github),
            "website": non_blank(&self.website),
            "status": self.status,
        })
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("page_id", "Page ID", "text", self.page_id.clone())
                .required()
                .readonly(editing),
            FormField::new("title", "Title", "text", self.title.clone()).required(),
            FormField::new("title_en", "Title (English)", "text", self.title_en.clone()),
            FormField::new("subtitle", "Subtitle", "text", self.subtitle.clone()),
            FormField::new("subtitle_en", "Subtitle (English)", "text", self.subtitle_en.clone()),
            FormField::new("content", "Content", "markdown", self.content.clone()),
            FormField::new("content_en", "Content (English)", "markdown", self.content_en.clone()),
            FormField::new("email", "Email", "email", self.email.clone().unwrap_or_default()),
            FormField::new("github", "GitHub", "text", self.github.clone()),
            FormField::new("website", "Website", "text", self.website.clone()),
        ]
    }
}

impl Resource for Page {
    type Form = PageForm;

    const COLLECTION: &'static str = "pages";
    const LABEL: &'static str = "Page";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn to_form(&self) -> PageForm {
        PageForm {
            page_id: self.page_id.clone(),
            title: self.title.clone(),
            title_en: self.title_en.clone().unwrap_or_default(),
            subtitle: self.subtitle.clone().unwrap_or_default(),
            subtitle_en: self.subtitle_en.clone().unwrap_or_default(),
            content: self.content.clone().unwrap_or_default(),
            content_en: self.content_en.clone().unwrap_or_default(),
            email: self.email.clone(),
            github: self.github.clone().unwrap_or_default(),
            website: self.website.clone().unwrap_or_default(),
            status: self.status.unwrap_or(1),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Page ID", "Subtitle"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.page_id.clone(),
            self.subtitle.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAuthor {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub article_id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<ArticleAuthor>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Article {
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("draft")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ArticleForm {
    #[serde(default)]
    pub article_id: String,
    #[validate(length(min = 1, message = "Article title is required"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default = "draft")]
    pub status: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub category_id: String,
    /// Comma-separated tag slugs.
    #[serde(default)]
    pub tag_ids: String,
}

fn draft() -> String {
    "draft".to_string()
}

impl Default for ArticleForm {
    fn default() -> Self {
        Self {
            article_id: String::new(),
            title: String::new(),
            summary: String::new(),
            content: String::new(),
            cover_image: String::new(),
            status: draft(),
            read_time: String::new(),
            published_at: String::new(),
            author_id: String::new(),
            category_id: String::new(),
            tag_ids: String::new(),
        }
    }
}

impl ArticleForm {
    pub fn tag_list(&self) -> Vec<String> {
        self.tag_ids
            .split(',')
            .filter_map(non_blank)
            .collect()
    }
}

impl ResourceForm for ArticleForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.article_id);
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.summary);
        trim_in_place(&mut self.cover_image);
        trim_in_place(&mut self.read_time);
        trim_in_place(&mut self.published_at);
        trim_in_place(&mut self.author_id);
        trim_in_place(&mut self.category_id);
        if self.status != "published" {
            self.status = draft();
        }
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({
            "articleId": non_blank(&self.article_id),
            "title": self.title,
            "summary": self.summary,
            "content": self.content,
            "coverImage": non_blank(&self.cover_image),
            "status": self.status,
            "readTime": non_blank(&self.read_time),
            "publishedAt": non_blank(&self.published_at),
            "authorId": non_blank(&self.author_id),
            "categoryId": non_blank(&self.category_id),
            "tagIds": self.tag_list(),
        })
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        let statuses = vec![
            SelectOption::new("draft", "Draft", &self.status),
            SelectOption::new("published", "Published", &self.status),
        ];
        vec![
            FormField::new("article_id", "Article ID", "text", self.article_id.clone()).readonly(editing),
            FormField::new("title", "Title", "text", self.title.clone()).required(),
            FormField::new("summary", "Summary", "textarea", self.summary.clone()),
            FormField::new("content", "Content", "markdown", self.content.clone()),
            FormField::new("cover_image", "Cover image URL", "text", self.cover_image.clone()),
            FormField::new("status", "Status", "select", self.status.clone()).options(statuses),
            FormField::new("read_time", "Read time", "text", self.read_time.clone()),
            FormField::new("published_at", "Published at", "datetime-local", self.published_at.clone()),
            FormField::new("author_id", "Author user ID", "text", self.author_id.clone()),
            FormField::new("category_id", "Category ID", "text", self.category_id.clone()),
            FormField::new("tag_ids", "Tag IDs (comma separated)", "text", self.tag_ids.clone()),
        ]
    }
}

impl Resource for Article {
    type Form = ArticleForm;

    const COLLECTION: &'static str = "articles";
    const LABEL: &'static str = "Article";
    const PAGE_SIZE: Option<u32> = Some(10);

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn to_form(&self) -> ArticleForm {
        ArticleForm {
            article_id: self.article_id.clone(),
            title: self.title.clone(),
            summary: self.summary.clone().unwrap_or_default(),
            content: self.content.clone().unwrap_or_default(),
            cover_image: self.cover_image.clone().unwrap_or_default(),
            status: self.status().to_string(),
            read_time: self.read_time.clone().unwrap_or_default(),
            published_at: self.published_at.clone().unwrap_or_default(),
            author_id: self
                .author
                .as_ref()
                .map(|a| a.user_id.clone())
                .unwrap_or_default(),
            category_id: self
                .category
                .as_ref()
                .map(|c| c.category_id.clone())
                .unwrap_or_default(),
            tag_ids: self
                .tags
                .iter()
                .map(|t| t.tag_id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Category", "Status", "Author", "Published"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            self.status().to_string(),
            self.author.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            self.published_at.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_form_splits_tag_ids() {
        let form = ArticleForm {
            title: "Hello".into(),
            tag_ids: " rust, ,web ,".into(),
            ..Default::default()
        };
        assert_eq!(form.tag_list(), vec!["rust", "web"]);
        assert_eq!(form.payload(false)["tagIds"], json!(["rust", "web"]));
    }

    #[test]
    fn unknown_status_normalizes_to_draft() {
        let mut form = ArticleForm {
            title: "Hello".into(),
            status: "archived".into(),
            ..Default::default()
        };
        form.normalize();
        assert_eq!(form.status, "draft");
    }

    #[test]
    fn article_round_trips_into_form_slugs() {
        let article: Article = serde_json::from_str(
            r#"{"id":"a1","articleId":"hello","title":"Hello","status":"published",
                "author":{"userId":"u-1","name":"Ann"},
                "category":{"id":"c1","categoryId":"tech","name":"Tech","sortOrder":null},
                "tags":[{"id":"t1","tagId":"rust","name":"Rust"},{"id":"t2","tagId":"web","name":"Web"}]}"#,
        )
        .unwrap();

        let form = article.to_form();
        assert_eq!(form.author_id, "u-1");
        assert_eq!(form.category_id, "tech");
        assert_eq!(form.tag_ids, "rust, web");
        assert_eq!(article.cells()[1], "Tech");
    }

    #[test]
    fn page_form_rejects_malformed_email() {
        let form = PageForm {
            page_id: "about".into(),
            title: "About".into(),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(form.check(false).is_err());
    }

    #[test]
    fn page_form_requires_title() {
        let mut form = PageForm {
            page_id: "about".into(),
            title: " ".into(),
            ..Default::default()
        };
        form.normalize();
        let errors = form.check(false).unwrap_err();
        assert_eq!(super::super::first_validation_message(&errors), "Page title is required");
    }
}
