use crate::models::AuthUser;
use crate::screens::{sidebar, NavItem};
use crate::services::BackendClient;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};

/// Chrome shared by every console page: who is logged in and the sidebar.
pub struct Layout {
    pub user_name: String,
    pub initials: String,
    pub nav: Vec<NavItem>,
    pub current_path: String,
}

impl Layout {
    pub async fn load(api: &BackendClient, user: &AuthUser, current_path: &str) -> Self {
        Self {
            user_name: user.display_name().to_string(),
            initials: user.initials(),
            nav: sidebar(api, user).await,
            current_path: current_path.to_string(),
        }
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        item.is_active(&self.current_path)
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub email: String,
}

/// Console landing page.
///
/// GET /admin
pub async fn dashboard(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let api = state.api.authorized(&user);
    DashboardTemplate {
        layout: Layout::load(&api, &user, "/admin").await,
        email: user.email,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
