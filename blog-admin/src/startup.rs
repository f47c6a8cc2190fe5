use axum::{
    middleware::from_fn,
    routing::{get, post, MethodRouter},
    Router,
};
use blog_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, request_span},
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{dashboard, health_check},
    auth::{index, login_handler, login_page, logout_handler},
    editor::format_handler,
    menus::{menus_page, move_menu, open_create_menu, toggle_menu},
    metrics::metrics,
    organizations::{open_create_organization, organizations_page, toggle_organization},
    resources,
    roles::{cancel_permissions, open_permissions, roles_page, save_permissions, toggle_permission},
    settings::{save_settings, settings_page},
    users::users_page,
};
use crate::models::{Article, Category, Menu, Organization, Page, Resource, Role, Tag, User};
use crate::AppState;

/// Dialog and delete routes shared by every resource screen.
///
/// `page` renders `/admin/{collection}`; `new` opens the create dialog.
fn resource_routes<R: Resource>(
    page: MethodRouter<AppState>,
    new: MethodRouter<AppState>,
) -> Router<AppState> {
    let base = format!("/admin/{}", R::COLLECTION);
    Router::new()
        .route(&base, page)
        .route(&format!("{}/new", base), new)
        .route(&format!("{}/:id/edit", base), get(resources::open_edit::<R>))
        .route(&format!("{}/save", base), post(resources::submit::<R>))
        .route(&format!("{}/close", base), post(resources::close_modal::<R>))
        .route(&format!("{}/:id/delete", base), get(resources::confirm_delete::<R>))
        .route(&format!("{}/delete", base), post(resources::delete_confirmed::<R>))
        .route(
            &format!("{}/delete/cancel", base),
            post(resources::cancel_delete::<R>),
        )
}

/// Plain table screen: generic list and create handlers.
fn table_routes<R: Resource>() -> Router<AppState> {
    resource_routes::<R>(get(resources::list::<R>), get(resources::open_create::<R>))
}

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)))
        .with_signed(state.session_key.clone());

    let admin = Router::new()
        .merge(resource_routes::<Menu>(get(menus_page), get(open_create_menu)))
        .route("/admin/menus/:id/toggle", post(toggle_menu))
        .route("/admin/menus/:id/move/:direction", post(move_menu))
        .merge(resource_routes::<Organization>(
            get(organizations_page),
            get(open_create_organization),
        ))
        .route("/admin/organizations/:id/toggle", post(toggle_organization))
        .merge(resource_routes::<Role>(
            get(roles_page),
            get(resources::open_create::<Role>),
        ))
        .route("/admin/roles/:id/permissions", get(open_permissions))
        .route(
            "/admin/roles/permissions/toggle/:slug",
            post(toggle_permission),
        )
        .route("/admin/roles/permissions/save", post(save_permissions))
        .route("/admin/roles/permissions/cancel", post(cancel_permissions))
        .merge(resource_routes::<User>(
            get(users_page),
            get(resources::open_create::<User>),
        ))
        .merge(table_routes::<Category>())
        .merge(table_routes::<Tag>())
        .merge(table_routes::<Page>())
        .merge(table_routes::<Article>())
        .route("/admin/editor/format", post(format_handler));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/admin", get(dashboard))
        .route("/admin/settings", get(settings_page).post(save_settings))
        .merge(admin)
        .route_layer(from_fn(metrics_middleware))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
