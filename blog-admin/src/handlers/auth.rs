use crate::models::{AdminSession, AuthUser};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use blog_core::error::AppError;
use serde::Deserialize;

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

/// Authenticate against the backend and start a console session.
///
/// POST /login
pub async fn login_handler(
    State(state): State<AppState>,
    session: AdminSession,
    Form(payload): Form<LoginRequest>,
) -> Result<Response, AppError> {
    let email = payload.email.trim().to_string();
    if email.is_empty() || payload.password.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginTemplate {
                email,
                error: Some("Email and password are required".to_string()),
            },
        )
            .into_response());
    }

    match state.api.login(&email, &payload.password).await {
        Ok(user) => {
            session.establish(&user).await?;
            tracing::info!(user_id = %user.user_id, email = %user.email, "Administrator logged in");
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Login rejected");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                LoginTemplate {
                    email,
                    error: Some(e.user_message("Invalid email or password")),
                },
            )
                .into_response())
        }
    }
}

/// Revoke the backend token (best effort) and clear the session.
///
/// POST /logout
pub async fn logout_handler(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Redirect, AppError> {
    if let Some(user) = session.user().await? {
        if let Err(e) = state.api.authorized(&user).logout().await {
            tracing::error!("Failed to revoke token during logout: {}", e);
        } else {
            tracing::info!(user_id = %user.user_id, "Administrator logged out");
        }
    }

    session.invalidate().await?;
    Ok(Redirect::to("/login"))
}

/// Logged-in visitors skip the login form.
///
/// GET /
pub async fn index(user: Option<AuthUser>) -> Redirect {
    match user {
        Some(_) => Redirect::to("/admin"),
        None => Redirect::to("/login"),
    }
}
