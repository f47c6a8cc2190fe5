//! Layered configuration shared by the blog services.
//!
//! Each service keeps a `config/base.yaml` next to its `Cargo.toml`; values can be
//! overridden with `APP_`-prefixed environment variables using `__` as the nesting
//! separator (for example `APP_BACKEND__BASE_URL`).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the blog REST backend.
#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint. Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve `<service>/config` whether we run from the workspace root or the crate dir.
pub fn configuration_directory(service_dir: &str) -> std::io::Result<PathBuf> {
    let base_path = std::env::current_dir()?;
    if base_path.ends_with(service_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(service_dir).join("config"))
    }
}

/// Load `base.yaml` for the given service and apply `APP_` environment overrides.
pub fn load_settings<T: DeserializeOwned>(service_dir: &str) -> Result<T, config::ConfigError> {
    dotenvy::dotenv().ok();

    let directory = configuration_directory(service_dir)
        .map_err(|e| config::ConfigError::Message(format!("cannot resolve config dir: {}", e)))?;

    let settings = config::Config::builder()
        .add_source(config::File::from(directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<T>()
}
