use super::app::Layout;
use super::resources::{load_screen, store_screen, ListParams, ResourcesTemplate};
use crate::models::{AdminSession, AuthUser, User};
use crate::screens::{users::search, UserChoices};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use blog_core::error::AppError;
use chrono::Utc;

/// User list with keyword search; the edit dialog offers role and
/// organization pickers.
///
/// GET /admin/users
pub async fn users_page(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);
    let mut screen = load_screen::<User>(&session).await?;
    screen.expire_flash(Utc::now());

    let keyword = params.q.unwrap_or_default();
    if keyword.trim().is_empty() {
        screen.list(&api).await;
    } else {
        search(&mut screen, &api, keyword.trim()).await;
    }
    store_screen(&session, &screen).await?;

    let layout = Layout::load(&api, &user, "/admin/users").await;
    let mut page = ResourcesTemplate::new(layout, &screen);
    page.search = Some(keyword);
    if let Some(modal) = page.modal.as_mut() {
        UserChoices::load(&api).await.apply(&mut modal.fields);
    }
    Ok(page.into_response())
}
