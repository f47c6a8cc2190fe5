//! Generic list/create/edit/delete pages, instantiated once per resource.

use super::app::Layout;
use crate::editor::Markup;
use crate::models::{AdminSession, AuthUser, FormField, Resource, ResourceForm};
use crate::screens::{CrudScreen, Flash, PermissionRow, PermissionSession};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use blog_core::error::AppError;
use chrono::Utc;
use serde::Deserialize;

pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

pub struct ModalView {
    pub title: String,
    pub editing: bool,
    pub fields: Vec<FormField>,
}

impl ModalView {
    pub fn has_markdown(&self) -> bool {
        self.fields.iter().any(|field| field.kind == "markdown")
    }
}

pub struct PermissionDialog {
    pub role_name: String,
    pub load_error: Option<String>,
    pub save_error: Option<String>,
    pub rows: Vec<PermissionRowView>,
}

pub struct PermissionRowView {
    pub slug: String,
    pub name: String,
    pub kind: &'static str,
    pub indent: usize,
    pub checked: bool,
}

impl PermissionDialog {
    pub fn from_session(session: &PermissionSession) -> Self {
        Self {
            role_name: session.role_name.clone(),
            load_error: session.load_error.clone(),
            save_error: session.save_error.clone(),
            rows: session
                .rows()
                .into_iter()
                .map(|PermissionRow { menu, depth, checked }| PermissionRowView {
                    slug: menu.menu_id.clone(),
                    name: menu.name.clone(),
                    kind: menu.kind.as_str(),
                    indent: depth * 20,
                    checked,
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "resources.html")]
pub struct ResourcesTemplate {
    pub layout: Layout,
    pub collection: &'static str,
    pub label: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<TableRow>,
    pub flash: Option<Flash>,
    pub modal: Option<ModalView>,
    pub pending_delete: Option<String>,
    pub paged: bool,
    pub page: u32,
    pub total_pages: u32,
    /// Keyword box, shown on screens that support search.
    pub search: Option<String>,
    /// Extra per-row action, e.g. role permissions.
    pub row_action: Option<(&'static str, &'static str)>,
    pub permissions: Option<PermissionDialog>,
    pub markups: &'static [Markup],
}

impl ResourcesTemplate {
    pub fn new<R: Resource>(layout: Layout, screen: &CrudScreen<R>) -> Self {
        Self {
            layout,
            collection: R::COLLECTION,
            label: R::LABEL,
            columns: R::columns(),
            rows: screen
                .records
                .iter()
                .map(|record| TableRow {
                    id: record.id().to_string(),
                    cells: record.cells(),
                })
                .collect(),
            flash: screen.flash.clone(),
            modal: modal_view::<R>(screen),
            pending_delete: screen
                .pending_delete
                .as_ref()
                .map(|record| record.display_name().to_string()),
            paged: R::PAGE_SIZE.is_some(),
            page: screen.page,
            total_pages: screen.total_pages.max(1),
            search: None,
            row_action: None,
            permissions: None,
            markups: &Markup::ALL,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

pub fn modal_view<R: Resource>(screen: &CrudScreen<R>) -> Option<ModalView> {
    screen.modal.as_ref().map(|modal| {
        let editing = modal.is_editing();
        ModalView {
            title: format!("{} {}", if editing { "Edit" } else { "New" }, R::LABEL),
            editing,
            fields: modal.form.fields(editing),
        }
    })
}

pub async fn load_screen<R: Resource>(session: &AdminSession) -> Result<CrudScreen<R>, AppError> {
    session.load(&CrudScreen::<R>::session_key()).await
}

pub async fn store_screen<R: Resource>(
    session: &AdminSession,
    screen: &CrudScreen<R>,
) -> Result<(), AppError> {
    session.store(&CrudScreen::<R>::session_key(), screen).await
}

pub fn back_to<R: Resource>() -> Redirect {
    Redirect::to(&format!("/admin/{}", R::COLLECTION))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub q: Option<String>,
}

/// GET /admin/{collection}
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<R>(&session).await?;
    screen.expire_flash(Utc::now());
    if let Some(page) = params.page {
        screen.go_to_page(page);
    }
    screen.list(&api).await;
    store_screen(&session, &screen).await?;

    let layout = Layout::load(&api, &user, &format!("/admin/{}", R::COLLECTION)).await;
    Ok(ResourcesTemplate::new(layout, &screen).into_response())
}

/// GET /admin/{collection}/new
pub async fn open_create<R: Resource>(
    _user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    let mut screen = load_screen::<R>(&session).await?;
    screen.open_create();
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// GET /admin/{collection}/:id/edit
pub async fn open_edit<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<R>(&session).await?;
    screen.list(&api).await;
    match screen.find(&id).cloned() {
        Some(record) => screen.open_edit(&record),
        None => screen.flash = Some(Flash::error(format!("{} not found", R::LABEL))),
    }
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// POST /admin/{collection}/save
pub async fn submit<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Form(form): Form<R::Form>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<R>(&session).await?;
    screen.submit(&api, form).await;
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// POST /admin/{collection}/close
pub async fn close_modal<R: Resource>(
    _user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    let mut screen = load_screen::<R>(&session).await?;
    screen.close_modal();
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// GET /admin/{collection}/:id/delete
pub async fn confirm_delete<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<R>(&session).await?;
    screen.list(&api).await;
    match screen.find(&id).cloned() {
        Some(record) => screen.confirm_delete(record),
        None => screen.flash = Some(Flash::error(format!("{} not found", R::LABEL))),
    }
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// POST /admin/{collection}/delete
pub async fn delete_confirmed<R: Resource>(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<R>(&session).await?;
    screen.delete_confirmed(&api).await;
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}

/// POST /admin/{collection}/delete/cancel
pub async fn cancel_delete<R: Resource>(
    _user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    let mut screen = load_screen::<R>(&session).await?;
    screen.cancel_delete();
    store_screen(&session, &screen).await?;
    Ok(back_to::<R>())
}
