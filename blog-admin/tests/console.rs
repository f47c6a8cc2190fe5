mod common;

use common::{spawn_app, spawn_app_with, BackendState};
use std::collections::HashMap;

#[tokio::test]
async fn login_with_bad_credentials_shows_backend_message() {
    let app = spawn_app().await;

    let response = app
        .post_form("/login", &[("email", common::ADMIN_EMAIL), ("password", "nope")])
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
async fn login_lands_on_dashboard_and_logout_ends_session() {
    let app = spawn_app().await;

    let response = app.login().await;
    assert!(response.status().is_success());
    assert!(response.url().path().ends_with("/admin"));
    let body = response.text().await.unwrap();
    assert!(body.contains(common::ADMIN_EMAIL));

    let response = app.post("/logout").await;
    assert!(response.url().path().ends_with("/login"));

    let response = app.get("/admin").await;
    assert!(response.url().path().ends_with("/login"));
}

#[tokio::test]
async fn category_create_edit_delete_round_trip() {
    let app = spawn_app().await;
    app.login().await;

    app.get("/admin/categories/new").await;
    let response = app
        .post_form(
            "/admin/categories/save",
            &[
                ("category_id", "news"),
                ("name", "  News  "),
                ("description", "Announcements"),
                ("sort_order", "1"),
            ],
        )
        .await;
    let body = response.text().await.unwrap();
    assert!(body.contains("Category created"));
    assert!(body.contains("News"));

    let id = {
        let backend = app.backend.lock().unwrap();
        assert_eq!(backend.categories.len(), 1);
        assert_eq!(backend.categories[0]["name"], "News");
        backend.categories[0]["id"].as_str().unwrap().to_string()
    };

    app.get(&format!("/admin/categories/{}/edit", id)).await;
    let body = app
        .post_form(
            "/admin/categories/save",
            &[
                ("category_id", "news"),
                ("name", "Company News"),
                ("description", "Announcements"),
                ("sort_order", "1"),
            ],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Category updated"));
    assert!(body.contains("Company News"));

    let body = app
        .get(&format!("/admin/categories/{}/delete", id))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Delete \"Company News\"?"));

    let body = app
        .post("/admin/categories/delete")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("deleted"));
    assert!(app.backend.lock().unwrap().categories.is_empty());
}

#[tokio::test]
async fn invalid_category_is_never_sent_to_backend() {
    let app = spawn_app().await;
    app.login().await;

    app.get("/admin/categories/new").await;
    let body = app
        .post_form("/admin/categories/save", &[("name", "   ")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Category name is required"));
    assert!(app.backend.lock().unwrap().categories.is_empty());
}

#[tokio::test]
async fn cleared_sort_order_saves_as_zero() {
    let app = spawn_app().await;
    app.login().await;

    app.get("/admin/categories/new").await;
    let response = app
        .post_form(
            "/admin/categories/save",
            &[("category_id", "misc"), ("name", "Misc"), ("sort_order", "")],
        )
        .await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Category created"));
    let backend = app.backend.lock().unwrap();
    assert_eq!(backend.categories.len(), 1);
    assert_eq!(backend.categories[0]["sortOrder"], 0);
}

#[tokio::test]
async fn saving_permissions_replaces_grants_with_checked_set() {
    let app = spawn_app_with(BackendState {
        role_menus: HashMap::from([(
            "r-1".to_string(),
            vec!["a".to_string(), "b".to_string()],
        )]),
        ..BackendState::default()
    })
    .await;
    app.login().await;

    let body = app
        .get("/admin/roles/r-1/permissions")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Permissions for Editor"));

    app.post("/admin/roles/permissions/toggle/b").await;
    app.post("/admin/roles/permissions/toggle/c").await;
    // Not part of the tree: ignored.
    app.post("/admin/roles/permissions/toggle/zzz").await;

    let body = app
        .post("/admin/roles/permissions/save")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Permissions updated for Editor"));
    assert!(!body.contains("Permissions for Editor"));

    let backend = app.backend.lock().unwrap();
    assert_eq!(backend.grant_writes, vec![serde_json::json!(["a", "c"])]);
    assert_eq!(backend.role_menus["r-1"], vec!["a", "c"]);
}

#[tokio::test]
async fn cancelled_permission_dialog_writes_nothing() {
    let app = spawn_app().await;
    app.login().await;

    app.get("/admin/roles/r-1/permissions").await;
    app.post("/admin/roles/permissions/toggle/a").await;
    let body = app
        .post("/admin/roles/permissions/cancel")
        .await
        .text()
        .await
        .unwrap();

    assert!(!body.contains("Permissions for Editor"));
    assert!(app.backend.lock().unwrap().grant_writes.is_empty());
}

#[tokio::test]
async fn menu_tree_collapses_and_expands() {
    let app = spawn_app().await;
    app.login().await;

    let body = app.get("/admin/menus").await.text().await.unwrap();
    assert!(body.contains(">B<") || body.contains("> B"));

    let body = app.post("/admin/menus/m-a/toggle").await.text().await.unwrap();
    assert!(body.contains("aria-expanded=\"false\""));
    assert!(!body.contains("/admin/menus/m-b/edit"));

    let body = app.post("/admin/menus/m-a/toggle").await.text().await.unwrap();
    assert!(body.contains("/admin/menus/m-b/edit"));
}

#[tokio::test]
async fn settings_page_shows_the_signed_in_account() {
    let app = spawn_app_with(BackendState {
        users: vec![common::admin_account()],
        ..BackendState::default()
    })
    .await;
    app.login().await;

    let body = app.get("/admin/settings").await.text().await.unwrap();
    assert!(body.contains("value=\"Site Admin\""));
    assert!(body.contains(&format!("value=\"{}\"", common::ADMIN_EMAIL)));
}

#[tokio::test]
async fn settings_save_sends_only_filled_fields_and_refreshes_header() {
    let app = spawn_app_with(BackendState {
        users: vec![common::admin_account()],
        ..BackendState::default()
    })
    .await;
    app.login().await;

    let response = app
        .post_form(
            "/admin/settings",
            &[("name", ""), ("email", "root@example.com"), ("password", "n3w-secret")],
        )
        .await;
    assert!(response.url().path().ends_with("/admin/settings"));
    let body = response.text().await.unwrap();
    assert!(body.contains("Profile updated"));
    assert!(body.contains("root@example.com"));
    assert!(!body.contains("n3w-secret"));
    assert!(body.contains(">root<"));

    let backend = app.backend.lock().unwrap();
    assert_eq!(
        backend.user_writes,
        vec![serde_json::json!({"email": "root@example.com", "password": "n3w-secret"})]
    );
}

#[tokio::test]
async fn settings_reject_a_malformed_email_without_writing() {
    let app = spawn_app_with(BackendState {
        users: vec![common::admin_account()],
        ..BackendState::default()
    })
    .await;
    app.login().await;

    let body = app
        .post_form("/admin/settings", &[("name", "Root"), ("email", "not-an-email")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Email address is invalid"));
    assert!(app.backend.lock().unwrap().user_writes.is_empty());
}

#[tokio::test]
async fn settings_without_a_backend_account_asks_to_sign_in_again() {
    let app = spawn_app().await;
    app.login().await;

    let body = app
        .post_form("/admin/settings", &[("name", "Root")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Unable to find your account, please sign in again"));
    assert!(app.backend.lock().unwrap().user_writes.is_empty());
}
