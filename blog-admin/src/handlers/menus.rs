use super::app::Layout;
use super::resources::{back_to, load_screen, modal_view, store_screen, ModalView};
use crate::editor::Markup;
use crate::models::{AdminSession, AuthUser, Menu, Resource};
use crate::screens::menus::VIEW_SESSION_KEY;
use crate::screens::{Flash, MenuScreen};
use crate::tree::{Direction, DisplayRow, TreeRecord, TreeView};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use blog_core::error::AppError;
use chrono::Utc;
use serde::Deserialize;

/// One indented row of a tree table.
pub struct TreeRowView {
    pub id: String,
    pub slug: String,
    pub indent: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub can_add_child: bool,
    pub icon_class: &'static str,
    pub cells: Vec<String>,
}

impl TreeRowView {
    pub fn from_row<T: Resource + TreeRecord>(
        row: &DisplayRow<'_, T>,
        can_add_child: bool,
        icon_class: &'static str,
    ) -> Self {
        Self {
            id: row.item().id().to_string(),
            slug: row.item().slug().to_string(),
            indent: row.depth * 24,
            has_children: row.has_children(),
            expanded: row.expanded,
            is_first: row.is_first(),
            is_last: row.is_last(),
            can_add_child,
            icon_class,
            cells: row.item().cells(),
        }
    }
}

#[derive(Template)]
#[template(path = "tree.html")]
pub struct TreeTemplate {
    pub layout: Layout,
    pub collection: &'static str,
    pub label: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<TreeRowView>,
    pub flash: Option<Flash>,
    pub error: Option<String>,
    pub modal: Option<ModalView>,
    pub pending_delete: Option<String>,
    /// Show move up/down controls.
    pub sortable: bool,
    pub markups: &'static [Markup],
}

/// Menu tree with expand/collapse, reordering and the edit dialog.
///
/// GET /admin/menus
pub async fn menus_page(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);
    let mut crud = load_screen::<Menu>(&session).await?;
    crud.expire_flash(Utc::now());

    let screen = MenuScreen::load(&api).await;
    let mut view: TreeView = session.load(VIEW_SESSION_KEY).await?;
    if screen.error.is_none() {
        view.sync(&screen.tree);
    }
    session.store(VIEW_SESSION_KEY, &view).await?;
    store_screen(&session, &crud).await?;

    let rows = screen
        .rows(&view)
        .map(|row| {
            let can_add_child = row.item().kind.can_parent();
            TreeRowView::from_row(&row, can_add_child, row.item().icon().css_class())
        })
        .collect();

    let mut modal = modal_view::<Menu>(&crud);
    if let (Some(view), Some(state)) = (modal.as_mut(), crud.modal.as_ref()) {
        let parents = screen.available_parents(state.editing.as_deref());
        view.fields.push(state.form.parent_field(&parents));
    }

    Ok(TreeTemplate {
        layout: Layout::load(&api, &user, "/admin/menus").await,
        collection: Menu::COLLECTION,
        label: Menu::LABEL,
        columns: Menu::columns(),
        rows,
        flash: crud.flash.clone(),
        error: screen.error.clone(),
        modal,
        pending_delete: crud.pending_delete.as_ref().map(|m| m.name.clone()),
        sortable: true,
        markups: &Markup::ALL,
    }
    .into_response())
}

#[derive(Debug, Deserialize, Default)]
pub struct NewMenuParams {
    pub parent: Option<String>,
}

/// Create dialog with the next sort key, optionally under `parent`.
///
/// GET /admin/menus/new
pub async fn open_create_menu(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Query(params): Query<NewMenuParams>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let screen = MenuScreen::load(&api).await;
    let mut crud = load_screen::<Menu>(&session).await?;
    crud.open_create_with(screen.create_form(params.parent.as_deref()));
    store_screen(&session, &crud).await?;
    Ok(back_to::<Menu>())
}

/// POST /admin/menus/:id/toggle
pub async fn toggle_menu(
    _user: AuthUser,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut view: TreeView = session.load(VIEW_SESSION_KEY).await?;
    view.toggle(&id);
    session.store(VIEW_SESSION_KEY, &view).await?;
    Ok(back_to::<Menu>())
}

/// Swap a menu with its neighbour, then show the refetched tree.
///
/// POST /admin/menus/:id/move/:direction
pub async fn move_menu(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Path((id, direction)): Path<(String, Direction)>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let screen = MenuScreen::load(&api).await;

    if let Err(e) = screen.move_menu(&api, &id, direction).await {
        let mut crud = load_screen::<Menu>(&session).await?;
        crud.flash = Some(Flash::error(e.user_message("Failed to reorder menu")));
        store_screen(&session, &crud).await?;
    }
    Ok(back_to::<Menu>())
}
