use super::app::Layout;
use crate::models::{AdminSession, AuthUser};
use crate::screens::account::{load_profile, save_profile, AccountError, AccountForm, FLASH_SESSION_KEY};
use crate::screens::Flash;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use blog_core::error::AppError;
use chrono::Utc;

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub layout: Layout,
    pub name: String,
    pub email: String,
    pub flash: Option<Flash>,
    pub load_error: Option<String>,
}

/// Profile form for the signed-in administrator. The password is never echoed.
///
/// GET /admin/settings
pub async fn settings_page(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
) -> Result<Response, AppError> {
    let api = state.api.authorized(&user);

    let mut flash: Option<Flash> = session.get(FLASH_SESSION_KEY).await?;
    if flash.as_ref().is_some_and(|f| f.is_expired_at(Utc::now())) {
        session.remove(FLASH_SESSION_KEY).await?;
        flash = None;
    }

    let (name, email, load_error) = match load_profile(&api, &user).await {
        Ok(profile) => (profile.name, profile.email, None),
        Err(e) => {
            tracing::warn!(user_id = %user.user_id, error = %e, "Failed to load profile");
            let message = match e {
                AccountError::Api(e) => e.user_message("Failed to load your profile"),
                other => other.user_message(),
            };
            (String::new(), user.email.clone(), Some(message))
        }
    };

    Ok(SettingsTemplate {
        layout: Layout::load(&api, &user, "/admin/settings").await,
        name,
        email,
        flash,
        load_error,
    }
    .into_response())
}

/// POST /admin/settings
pub async fn save_settings(
    State(state): State<AppState>,
    user: AuthUser,
    session: AdminSession,
    Form(form): Form<AccountForm>,
) -> Result<Redirect, AppError> {
    let api = state.api.authorized(&user);

    let flash = match save_profile(&api, &user, &form).await {
        Ok(update) => {
            tracing::info!(user_id = %user.user_id, "Profile updated");
            if let Some(email) = update.email.filter(|email| *email != user.email) {
                session.refresh_user(&AuthUser { email, ..user }).await?;
            }
            Flash::success("Profile updated")
        }
        Err(e) => {
            tracing::warn!(user_id = %user.user_id, error = %e, "Profile update failed");
            Flash::error(e.user_message())
        }
    };

    session.store(FLASH_SESSION_KEY, &flash).await?;
    Ok(Redirect::to("/admin/settings"))
}
