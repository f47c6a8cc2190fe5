pub mod config;
pub mod handlers;
pub mod i18n;
pub mod markdown;
pub mod models;
pub mod services;
pub mod startup;

use config::ReaderSettings;
use services::ReaderClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ReaderClient>,
    pub reader: ReaderSettings,
}

impl AppState {
    pub fn new(api: ReaderClient, reader: ReaderSettings) -> Self {
        Self {
            api: Arc::new(api),
            reader,
        }
    }
}
