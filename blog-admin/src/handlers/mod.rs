pub mod app;
pub mod auth;
pub mod editor;
pub mod menus;
pub mod metrics;
pub mod organizations;
pub mod resources;
pub mod roles;
pub mod settings;
pub mod users;
