pub mod about;
pub mod app;
pub mod articles;
pub mod categories;
pub mod metrics;
pub mod sitemap;

use crate::i18n::{Labels, Locale};
use askama::Template;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Header and navigation shared by every reader page.
pub struct Chrome {
    pub locale: Locale,
    pub labels: &'static Labels,
    /// Top navigation entry to highlight: `home`, `categories` or `about`.
    pub section: &'static str,
    /// Same page in the other locale.
    pub switch_href: String,
}

impl Chrome {
    /// `rest` is the path after the locale segment, e.g. `/categories`.
    pub fn new(locale: Locale, section: &'static str, rest: &str) -> Self {
        Self {
            locale,
            labels: locale.labels(),
            section,
            switch_href: format!("/{}{}", locale.alternate(), rest),
        }
    }

    pub fn href(&self, rest: &str) -> String {
        format!("/{}{}", self.locale, rest)
    }
}

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub chrome: Chrome,
    pub message: &'static str,
}

/// A full page with a single message, served with `status`.
pub fn message_page(status: StatusCode, chrome: Chrome, message: &'static str) -> Response {
    (status, MessageTemplate { chrome, message }).into_response()
}

/// Parse the leading path segment. Anything but a supported locale is a 404.
pub fn parse_locale(raw: &str, default: Locale) -> Result<Locale, Response> {
    raw.parse::<Locale>().map_err(|e| {
        tracing::debug!(error = %e, "Unknown locale in path");
        let chrome = Chrome::new(default, "", "");
        message_page(StatusCode::NOT_FOUND, chrome, default.labels().page_not_found)
    })
}
