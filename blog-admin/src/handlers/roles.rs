use super::app::Layout;
use super::resources::{
    back_to, load_screen, store_screen, ListParams, PermissionDialog, ResourcesTemplate,
};
use crate::models::{AdminSession, AuthUser, Role};
use crate::screens::permissions::SESSION_KEY;
use crate::screens::{Flash, PermissionSession};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use blog_core::error::AppError;
use chrono::Utc;

/// Role list, with the permission dialog on top when one is open.
///
/// GET /admin/roles
pub async fn roles_page(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<Role>(&session).await?;
    screen.expire_flash(Utc::now());
    if let Some(page) = params.page {
        screen.go_to_page(page);
    }
    screen.list(&api).await;
    store_screen(&session, &screen).await?;

    let permissions: Option<PermissionSession> = session.get(SESSION_KEY).await?;

    let layout = Layout::load(&api, &user, "/admin/roles").await;
    let mut page = ResourcesTemplate::new(layout, &screen);
    page.row_action = Some(("permissions", "Permissions"));
    page.permissions = permissions.as_ref().map(PermissionDialog::from_session);
    Ok(page.into_response())
}

/// Open the permission dialog for one role.
///
/// GET /admin/roles/:id/permissions
pub async fn open_permissions(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<Role>(&session).await?;
    screen.list(&api).await;

    match screen.find(&id).cloned() {
        Some(role) => {
            let permissions = PermissionSession::open(&api, &role).await;
            session.store(SESSION_KEY, &permissions).await?;
        }
        None => {
            screen.flash = Some(Flash::error("Role not found"));
            store_screen(&session, &screen).await?;
        }
    }
    Ok(back_to::<Role>())
}

/// POST /admin/roles/permissions/toggle/:slug
pub async fn toggle_permission(
    _user: AuthUser,
    session: AdminSession,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    if let Some(mut permissions) = session.get::<PermissionSession>(SESSION_KEY).await? {
        if permissions.toggle(&slug) {
            session.store(SESSION_KEY, &permissions).await?;
        }
    }
    Ok(back_to::<Role>())
}

/// Replace the role's grants with the checked set.
///
/// On success the dialog closes with a success message; on failure it stays
/// open showing the error.
///
/// POST /admin/roles/permissions/save
pub async fn save_permissions(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    let Some(mut permissions) = session.get::<PermissionSession>(SESSION_KEY).await? else {
        return Ok(back_to::<Role>());
    };

    let api = state.api.authorized(&user);
    match permissions.save(&api).await {
        Ok(()) => {
            session.remove(SESSION_KEY).await?;
            let mut screen = load_screen::<Role>(&session).await?;
            screen.flash = Some(Flash::success(format!(
                "Permissions updated for {}",
                permissions.role_name
            )));
            store_screen(&session, &screen).await?;
        }
        Err(e) => {
            tracing::error!(role_id = %permissions.role_id, error = %e, "Failed to save role permissions");
            session.store(SESSION_KEY, &permissions).await?;
        }
    }
    Ok(back_to::<Role>())
}

/// POST /admin/roles/permissions/cancel
pub async fn cancel_permissions(
    _user: AuthUser,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    if let Some(permissions) = session.get::<PermissionSession>(SESSION_KEY).await? {
        permissions.cancel();
    }
    session.remove(SESSION_KEY).await?;
    Ok(back_to::<Role>())
}
