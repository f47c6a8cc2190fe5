use super::app::Layout;
use super::menus::{TreeRowView, TreeTemplate};
use super::resources::{back_to, load_screen, modal_view, store_screen};
use crate::editor::Markup;
use crate::models::{AdminSession, AuthUser, FormField, Organization, Resource, SelectOption};
use crate::screens::organizations::{child_form, organization_options, organization_tree, VIEW_SESSION_KEY};
use crate::tree::TreeView;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use blog_core::error::AppError;
use chrono::Utc;
use serde::Deserialize;

/// GET /admin/organizations
pub async fn organizations_page(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);
    let mut crud = load_screen::<Organization>(&session).await?;
    crud.expire_flash(Utc::now());
    crud.list(&api).await;

    let forest = organization_tree(crud.records.clone());
    let mut view: TreeView = session.load(VIEW_SESSION_KEY).await?;
    view.sync(&forest);
    session.store(VIEW_SESSION_KEY, &view).await?;
    store_screen(&session, &crud).await?;

    let rows = view
        .rows(&forest)
        .map(|row| TreeRowView::from_row(&row, true, "icon-building-2"))
        .collect();

    let mut modal = modal_view::<Organization>(&crud);
    if let (Some(view), Some(state)) = (modal.as_mut(), crud.modal.as_ref()) {
        let current = state.form.parent_org_id.as_str();
        let mut options = vec![SelectOption::new("", "(top level)", current)];
        options.extend(organization_options(&forest, current, state.editing.as_deref()));
        view.fields.push(
            FormField::new("parent_org_id", "Parent organization", "select", current).options(options),
        );
    }

    Ok(TreeTemplate {
        layout: Layout::load(&api, &user, "/admin/organizations").await,
        collection: Organization::COLLECTION,
        label: Organization::LABEL,
        columns: Organization::columns(),
        rows,
        flash: crud.flash.clone(),
        error: None,
        modal,
        pending_delete: crud.pending_delete.as_ref().map(|org| org.name.clone()),
        sortable: false,
        markups: &Markup::ALL,
    }
    .into_response())
}

#[derive(Debug, Deserialize, Default)]
pub struct NewOrganizationParams {
    pub parent: Option<String>,
}

/// Create dialog, optionally under `parent`.
///
/// GET /admin/organizations/new
pub async fn open_create_organization(
    _user: AuthUser,
    session: AdminSession,
    Query(params): Query<NewOrganizationParams>,
) -> Result<Redirect, AppError> {
    let mut crud = load_screen::<Organization>(&session).await?;
    match params.parent.as_deref().filter(|slug| !slug.is_empty()) {
        Some(parent) => crud.open_create_with(child_form(parent)),
        None => crud.open_create(),
    }
    store_screen(&session, &crud).await?;
    Ok(back_to::<Organization>())
}

/// POST /admin/organizations/:id/toggle
pub async fn toggle_organization(
    _user: AuthUser,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut view: TreeView = session.load(VIEW_SESSION_KEY).await?;
    view.toggle(&id);
    session.store(VIEW_SESSION_KEY, &view).await?;
    Ok(back_to::<Organization>())
}
