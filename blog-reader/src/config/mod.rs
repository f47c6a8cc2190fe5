use crate::i18n::Locale;
use blog_core::config::{load_settings, BackendSettings, ServerSettings, TelemetrySettings};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub reader: ReaderSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// What the reader shows and how much of it.
#[derive(Deserialize, Clone, Debug)]
pub struct ReaderSettings {
    #[serde(default)]
    pub default_locale: Locale,
    /// Articles per page on the home listing.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_related_limit")]
    pub related_limit: u32,
    #[serde(default = "default_category_page_size")]
    pub category_page_size: u32,
    /// Public origin used for absolute links in the sitemap.
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            page_size: default_page_size(),
            related_limit: default_related_limit(),
            category_page_size: default_category_page_size(),
            site_url: default_site_url(),
        }
    }
}

fn default_page_size() -> u32 {
    6
}

fn default_related_limit() -> u32 {
    4
}

fn default_category_page_size() -> u32 {
    50
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    load_settings("blog-reader")
}
