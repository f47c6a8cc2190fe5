//! The signed-in administrator's own profile.
use crate::models::{first_validation_message, non_blank, AuthUser, User};
use crate::services::{ApiError, BackendClient};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

pub const FLASH_SESSION_KEY: &str = "screen.settings.flash";

pub const ACCOUNT_MISSING: &str = "Unable to find your account, please sign in again";

/// The settings form as posted. Blank fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /api/users/:id`; only the fields the administrator filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AccountForm {
    pub fn update(&self) -> Result<ProfileUpdate, AccountError> {
        let update = ProfileUpdate {
            name: non_blank(&self.name),
            email: non_blank(&self.email),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        };
        update
            .validate()
            .map_err(|errors| AccountError::Invalid(first_validation_message(&errors)))?;
        Ok(update)
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(String),
    #[error("no backend user for the session")]
    Missing,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AccountError {
    pub fn user_message(&self) -> String {
        match self {
            AccountError::Invalid(message) => message.clone(),
            AccountError::Missing => ACCOUNT_MISSING.to_string(),
            AccountError::Api(e) => e.user_message("Failed to update profile"),
        }
    }
}

/// The backend record behind the session user.
pub async fn load_profile(api: &BackendClient, user: &AuthUser) -> Result<User, AccountError> {
    api.user_by_user_id(&user.user_id)
        .await?
        .ok_or(AccountError::Missing)
}

/// Validate, resolve the session user's record and write the filled-in fields.
pub async fn save_profile(
    api: &BackendClient,
    user: &AuthUser,
    form: &AccountForm,
) -> Result<ProfileUpdate, AccountError> {
    let update = form.update()?;
    let profile = load_profile(api, user).await?;
    api.update_user(&profile.id, &update).await?;
    Ok(update)
}
