//! Backend resources managed by the console and the forms that edit them.
pub mod content;
pub mod icon;
pub mod menu;
pub mod organization;
pub mod role;
pub mod session;
pub mod user;

pub use content::{Article, ArticleForm, Category, CategoryForm, Page, PageForm, Tag, TagForm};
pub use icon::MenuIcon;
pub use menu::{Menu, MenuForm, MenuKind};
pub use organization::{Organization, OrganizationForm};
pub use role::{Role, RoleForm};
pub use session::{AdminSession, AuthUser};
pub use user::{User, UserForm};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;
use validator::{Validate, ValidationErrors};

/// A backend collection with the uniform list/create/update/delete contract.
pub trait Resource: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static {
    type Form: ResourceForm;

    /// Path segment under `/api/` (and `/admin/`), e.g. `categories`.
    const COLLECTION: &'static str;
    /// Singular human label, e.g. `Category`.
    const LABEL: &'static str;
    /// Page size for collections the backend pages; `None` lists everything.
    const PAGE_SIZE: Option<u32> = None;

    /// Backend path that lists the whole collection flat.
    fn list_path() -> String {
        format!("/api/{}", Self::COLLECTION)
    }

    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn to_form(&self) -> Self::Form;

    /// Column headers of the list table.
    fn columns() -> &'static [&'static str];
    /// Cell values matching [`Resource::columns`].
    fn cells(&self) -> Vec<String>;
}

/// The editable projection of a resource.
pub trait ResourceForm:
    Validate + DeserializeOwned + Serialize + Default + Clone + Debug + Send + Sync + 'static
{
    /// Trim text input and turn blank optional fields into empties.
    fn normalize(&mut self);

    /// Client-side gate run before any request is sent.
    fn check(&self, _editing: bool) -> Result<(), ValidationErrors> {
        self.validate()
    }

    /// JSON body for `POST` (create) or `PUT` (update).
    fn payload(&self, editing: bool) -> serde_json::Value;

    /// Inputs rendered in the edit modal.
    fn fields(&self, editing: bool) -> Vec<FormField>;
}

/// One input of an edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// `text`, `textarea`, `markdown`, `number`, `password`, `email`, `checkbox` or `select`.
    pub kind: &'static str,
    pub required: bool,
    pub readonly: bool,
    pub options: Vec<SelectOption>,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            value: value.into(),
            kind,
            required: false,
            readonly: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.value == "true"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// List bodies come either as a bare array or as a paged envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Paged(PagedBody<T>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedBody<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Paged(page) => page.content,
        }
    }
}

/// Java-side boxed integers and booleans may arrive as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric form input. Browsers post cleared number inputs as empty strings;
/// blank or unparseable text reads as zero. Numbers stored in the session as
/// JSON are taken as they are.
pub(crate) fn form_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => i32::try_from(n).unwrap_or_default(),
        Raw::Text(text) => text.trim().parse().unwrap_or_default(),
    })
}

/// `Some(trimmed)` for non-blank input, `None` otherwise.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// First message of the first failing field, in field-name order.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please check the highlighted fields".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_accepts_bare_arrays_and_pages() {
        let bare: Listing<Tag> = serde_json::from_str(r#"[{"id":"1","name":"rust"}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let paged: Listing<Tag> = serde_json::from_str(
            r#"{"content":[{"id":"1","name":"rust"},{"id":"2","name":"go"}],"totalPages":1,"number":0}"#,
        )
        .unwrap();
        assert_eq!(paged.into_items().len(), 2);
    }

    #[derive(Debug, Deserialize)]
    struct NumberForm {
        #[serde(default, deserialize_with = "form_number")]
        sort_order: i32,
    }

    #[test]
    fn cleared_number_inputs_read_as_zero() {
        let parse = |body: &str| serde_urlencoded::from_str::<NumberForm>(body).unwrap().sort_order;
        assert_eq!(parse("sort_order=7"), 7);
        assert_eq!(parse("sort_order=+3+"), 3);
        assert_eq!(parse("sort_order="), 0);
        assert_eq!(parse("sort_order=abc"), 0);
        assert_eq!(parse(""), 0);

        let stored: NumberForm = serde_json::from_str(r#"{"sort_order": 12}"#).unwrap();
        assert_eq!(stored.sort_order, 12);
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  x "), Some("x".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}
