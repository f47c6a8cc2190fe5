use blog_core::config::{load_settings, BackendSettings, ServerSettings, TelemetrySettings};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Signs the session cookie; at least 64 bytes.
    pub secret: Secret<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    load_settings("blog-admin")
}
