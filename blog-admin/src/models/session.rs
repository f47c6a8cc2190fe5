use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use blog_core::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const USER_KEY: &str = "admin.user";

/// Authenticated administrator, as returned by `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or("admin")
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .chars()
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = AdminSession::from_request_parts(parts, state).await?;
        match session.user().await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// Typed view over the per-browser session: the logged-in user plus screen state
/// (expand sets, open permission session, modal and flash state).
#[derive(Clone)]
pub struct AdminSession {
    session: Session,
}

impl AdminSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Start a fresh session for `user`, rotating the session id.
    pub async fn establish(&self, user: &AuthUser) -> Result<(), AppError> {
        self.session.cycle_id().await.map_err(store_error)?;
        self.session.insert(USER_KEY, user).await.map_err(store_error)
    }

    /// Drop the user and every piece of screen state.
    pub async fn invalidate(&self) -> Result<(), AppError> {
        self.session.flush().await.map_err(store_error)
    }

    /// Replace the stored user within the current session.
    pub async fn refresh_user(&self, user: &AuthUser) -> Result<(), AppError> {
        self.session.insert(USER_KEY, user).await.map_err(store_error)
    }

    pub async fn user(&self) -> Result<Option<AuthUser>, AppError> {
        self.session.get(USER_KEY).await.map_err(store_error)
    }

    /// Screen state stored under `key`, or its default when absent.
    pub async fn load<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let value: Option<T> = self.session.get(key).await.map_err(store_error)?;
        Ok(value.unwrap_or_default())
    }

    /// Screen state stored under `key`, `None` when absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        self.session.get(key).await.map_err(store_error)
    }

    pub async fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        self.session.insert(key, value).await.map_err(store_error)
    }

    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.session
            .remove::<serde_json::Value>(key)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}

fn store_error(err: tower_sessions::session::Error) -> AppError {
    tracing::error!(error = %err, "Session store failure");
    AppError::InternalError(anyhow::anyhow!("Session store error: {}", err))
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;
        Ok(Self::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> AdminSession {
        AdminSession::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    fn user() -> AuthUser {
        AuthUser {
            user_id: "u-1".into(),
            email: "jane@example.com".into(),
            token: "t".into(),
        }
    }

    #[tokio::test]
    async fn establish_then_invalidate() {
        let session = session();
        assert_eq!(session.user().await.unwrap(), None);

        session.establish(&user()).await.unwrap();
        assert_eq!(session.user().await.unwrap(), Some(user()));

        session.store("menus.view", &vec!["a".to_string()]).await.unwrap();
        session.invalidate().await.unwrap();
        assert_eq!(session.user().await.unwrap(), None);
        let view: Vec<String> = session.load("menus.view").await.unwrap();
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn refresh_keeps_screen_state() {
        let session = session();
        session.establish(&user()).await.unwrap();
        session.store("menus.view", &vec!["a".to_string()]).await.unwrap();

        let renamed = AuthUser {
            email: "june@example.com".into(),
            ..user()
        };
        session.refresh_user(&renamed).await.unwrap();

        assert_eq!(session.user().await.unwrap(), Some(renamed));
        let view: Vec<String> = session.load("menus.view").await.unwrap();
        assert_eq!(view, vec!["a".to_string()]);
    }

    #[test]
    fn initials_come_from_the_mailbox_name() {
        assert_eq!(user().display_name(), "jane");
        assert_eq!(user().initials(), "JA");
    }
}
