pub mod config;
pub mod editor;
pub mod handlers;
pub mod models;
pub mod screens;
pub mod services;
pub mod startup;
pub mod tree;

use blog_core::error::AppError;
use secrecy::{ExposeSecret, Secret};
use services::BackendClient;
use std::sync::Arc;
use tower_sessions::cookie::Key;

/// Shared application state: the backend client and the cookie signing key.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<BackendClient>,
    pub session_key: Key,
}

impl AppState {
    /// `session_secret` must be at least 64 bytes.
    pub fn new(api: BackendClient, session_secret: &Secret<String>) -> Result<Self, AppError> {
        let session_key = Key::try_from(session_secret.expose_secret().as_bytes()).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("session_secret is unusable: {}", e))
        })?;

        Ok(Self {
            api: Arc::new(api),
            session_key,
        })
    }
}
