//! Generic list + modal form + delete confirmation workflow shared by every
//! resource screen.

use crate::models::{first_validation_message, Resource, ResourceForm};
use crate::services::{ApiError, BackendClient};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Success messages disappear this long after being shown.
pub const SUCCESS_FLASH_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A transient status banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
    /// Errors stay until replaced.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self::success_at(message, Utc::now())
    }

    pub fn success_at(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
            expires_at: Some(now + Duration::seconds(SUCCESS_FLASH_TTL_SECS)),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| now >= at).unwrap_or(false)
    }
}

/// The create/edit modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Modal<F: ResourceForm> {
    /// Internal id of the record being edited; `None` when creating.
    pub editing: Option<String>,
    pub form: F,
}

impl<F: ResourceForm> Modal<F> {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// Screen state for one resource collection.
///
/// Only the interaction state (modal, pending delete, flash, page) is kept
/// between requests; records are refetched on every [`CrudScreen::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CrudScreen<R: Resource> {
    #[serde(skip)]
    pub records: Vec<R>,
    pub modal: Option<Modal<R::Form>>,
    pub pending_delete: Option<R>,
    pub flash: Option<Flash>,
    pub page: u32,
    #[serde(skip)]
    pub total_pages: u32,
}

impl<R: Resource> Default for CrudScreen<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            modal: None,
            pending_delete: None,
            flash: None,
            page: 0,
            total_pages: 1,
        }
    }
}

impl<R: Resource> CrudScreen<R> {
    /// Session key the screen state lives under.
    pub fn session_key() -> String {
        format!("screen.{}", R::COLLECTION)
    }

    /// Refetch the collection. A failed fetch leaves an empty list and an error flash.
    pub async fn list(&mut self, api: &BackendClient) {
        let result = match R::PAGE_SIZE {
            Some(size) => api.list_page::<R>(self.page, size).await.map(|page| {
                self.total_pages = page.total_pages.max(1);
                page.content
            }),
            None => api.list::<R>().await,
        };

        match result {
            Ok(records) => self.records = records,
            Err(e) => {
                self.records.clear();
                self.flash = Some(Flash::error(
                    e.user_message(&format!("Failed to load {}", R::COLLECTION)),
                ));
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn open_create(&mut self) {
        self.open_create_with(R::Form::default());
    }

    pub fn open_create_with(&mut self, form: R::Form) {
        self.modal = Some(Modal {
            editing: None,
            form,
        });
    }

    pub fn open_edit(&mut self, record: &R) {
        self.modal = Some(Modal {
            editing: Some(record.id().to_string()),
            form: record.to_form(),
        });
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Validate and send the form. Returns `true` when the backend accepted it.
    ///
    /// The submitted form is kept in the modal on any failure so the
    /// administrator can correct it.
    pub async fn submit(&mut self, api: &BackendClient, mut form: R::Form) -> bool {
        let editing = self.modal.as_ref().and_then(|modal| modal.editing.clone());
        form.normalize();

        if let Err(errors) = form.check(editing.is_some()) {
            let err = ApiError::Validation(first_validation_message(&errors));
            self.flash = Some(Flash::error(err.user_message("")));
            self.modal = Some(Modal { editing, form });
            return false;
        }

        let body = form.payload(editing.is_some());
        let result = match &editing {
            Some(id) => api.update::<R>(id, &body).await,
            None => api.create::<R>(&body).await,
        };

        match result {
            Ok(()) => {
                let verb = if editing.is_some() { "updated" } else { "created" };
                tracing::info!(collection = R::COLLECTION, id = ?editing, "{} {}", R::LABEL, verb);
                self.modal = None;
                self.flash = Some(Flash::success(format!("{} {}", R::LABEL, verb)));
                self.list(api).await;
                true
            }
            Err(e) => {
                self.flash = Some(Flash::error(
                    e.user_message(&format!("Failed to save {}", R::LABEL.to_lowercase())),
                ));
                self.modal = Some(Modal { editing, form });
                false
            }
        }
    }

    pub fn confirm_delete(&mut self, record: R) {
        self.pending_delete = Some(record);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation, then refetch.
    pub async fn delete_confirmed(&mut self, api: &BackendClient) -> bool {
        let Some(record) = self.pending_delete.take() else {
            return false;
        };

        let deleted = match api.remove::<R>(record.id()).await {
            Ok(()) => {
                tracing::info!(collection = R::COLLECTION, id = %record.id(), "{} deleted", R::LABEL);
                self.flash = Some(Flash::success(format!(
                    "{} \"{}\" deleted",
                    R::LABEL,
                    record.display_name()
                )));
                true
            }
            Err(e) => {
                self.flash = Some(Flash::error(
                    e.user_message(&format!("Failed to delete {}", R::LABEL.to_lowercase())),
                ));
                false
            }
        };
        self.list(api).await;
        deleted
    }

    /// Drop a success banner once its display time has passed.
    pub fn expire_flash(&mut self, now: DateTime<Utc>) {
        if self.flash.as_ref().is_some_and(|flash| flash.is_expired_at(now)) {
            self.flash = None;
        }
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryForm, Tag, TagForm};
    use blog_core::config::BackendSettings;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendSettings {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = CrudScreen::<Category>::default();
        screen.open_create();
        let accepted = screen
            .submit(
                &client(&server),
                CategoryForm {
                    name: "   ".into(),
                    ..Default::default()
                },
            )
            .await;

        assert!(!accepted);
        let flash = screen.flash.as_ref().unwrap();
        assert!(flash.is_error());
        assert!(!flash.message.is_empty());
        assert!(screen.modal.is_some());
    }

    #[tokio::test]
    async fn successful_create_closes_modal_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tags"))
            .and(body_partial_json(json!({"name": "rust"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "tagId": "rust", "name": "rust"}
            ])))
            .mount(&server)
            .await;

        let mut screen = CrudScreen::<Tag>::default();
        screen.open_create();
        let accepted = screen
            .submit(
                &client(&server),
                TagForm {
                    name: " rust ".into(),
                    ..Default::default()
                },
            )
            .await;

        assert!(accepted);
        assert!(screen.modal.is_none());
        assert_eq!(screen.records.len(), 1);
        assert_eq!(screen.flash.as_ref().unwrap().kind, FlashKind::Success);
    }

    #[tokio::test]
    async fn edit_sends_put_and_server_error_keeps_modal_open() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tags/1"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Name taken"})))
            .expect(1)
            .mount(&server)
            .await;

        let tag = Tag {
            id: "1".into(),
            tag_id: "rust".into(),
            name: "rust".into(),
        };
        let mut screen = CrudScreen::<Tag>::default();
        screen.open_edit(&tag);
        let accepted = screen
            .submit(
                &client(&server),
                TagForm {
                    tag_id: "rust".into(),
                    name: "go".into(),
                },
            )
            .await;

        assert!(!accepted);
        assert_eq!(screen.flash.as_ref().unwrap().message, "Name taken");
        let modal = screen.modal.as_ref().unwrap();
        assert_eq!(modal.editing.as_deref(), Some("1"));
        assert_eq!(modal.form.name, "go");
    }

    #[tokio::test]
    async fn cancelled_delete_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = CrudScreen::<Tag>::default();
        screen.confirm_delete(Tag {
            id: "1".into(),
            tag_id: "rust".into(),
            name: "rust".into(),
        });
        screen.cancel_delete();
        assert!(!screen.delete_confirmed(&client(&server)).await);
    }

    #[test]
    fn success_flash_expires_but_errors_persist() {
        let now = Utc::now();
        let mut screen = CrudScreen::<Tag>::default();

        screen.flash = Some(Flash::success_at("Saved", now));
        screen.expire_flash(now + Duration::seconds(2));
        assert!(screen.flash.is_some());
        screen.expire_flash(now + Duration::seconds(3));
        assert!(screen.flash.is_none());

        screen.flash = Some(Flash::error("Failed"));
        screen.expire_flash(now + Duration::days(1));
        assert!(screen.flash.is_some());
    }

    #[test]
    fn interaction_state_survives_serialization_but_records_do_not() {
        let mut screen = CrudScreen::<Tag>::default();
        screen.records.push(Tag {
            id: "1".into(),
            tag_id: "t".into(),
            name: "t".into(),
        });
        screen.open_create();

        let restored: CrudScreen<Tag> =
            serde_json::from_value(serde_json::to_value(&screen).unwrap()).unwrap();
        assert!(restored.records.is_empty());
        assert!(restored.modal.is_some());
    }
}
