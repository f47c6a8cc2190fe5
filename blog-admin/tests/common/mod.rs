//! In-process blog backend plus a console wired to it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use blog_admin::services::BackendClient;
use blog_admin::startup::build_router;
use blog_admin::AppState;
use blog_core::config::BackendSettings;
use secrecy::Secret;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";

#[derive(Default)]
pub struct BackendState {
    pub categories: Vec<Value>,
    pub role_menus: HashMap<String, Vec<String>>,
    /// Bodies received on `PUT /api/roles/:id/menus`, in order.
    pub grant_writes: Vec<Value>,
    pub users: Vec<Value>,
    /// Bodies received on `PUT /api/users/:id`, in order.
    pub user_writes: Vec<Value>,
    pub next_id: u32,
}

/// Backend record for the account `login` signs in as.
pub fn admin_account() -> Value {
    json!({"id": "db-1", "userId": "u-1", "email": ADMIN_EMAIL, "name": "Site Admin", "status": 1})
}

pub type SharedBackend = Arc<Mutex<BackendState>>;

fn menu(id: &str, slug: &str, parent: Option<&str>, order: i32) -> Value {
    json!({
        "id": id,
        "menuId": slug,
        "parentId": parent,
        "name": slug.to_uppercase(),
        "path": format!("/{}", slug),
        "sortOrder": order,
        "type": "MENU",
        "visible": true,
        "status": 1
    })
}

fn flat_menus() -> Value {
    json!([
        menu("m-a", "a", None, 1),
        menu("m-b", "b", Some("a"), 1),
        menu("m-c", "c", None, 2)
    ])
}

fn menu_tree() -> Value {
    let mut a = menu("m-a", "a", None, 1);
    a["children"] = json!([menu("m-b", "b", Some("a"), 1)]);
    json!([a, menu("m-c", "c", None, 2)])
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({"token": "test-token", "email": ADMIN_EMAIL, "userId": "u-1"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid email or password"})),
        )
    }
}

async fn list_categories(State(state): State<SharedBackend>) -> Json<Value> {
    let state = state.lock().unwrap();
    Json(Value::Array(state.categories.clone()))
}

async fn create_category(
    State(state): State<SharedBackend>,
    Json(mut body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    body["id"] = json!(format!("cat-{}", state.next_id));
    state.categories.push(body);
    StatusCode::CREATED
}

async fn update_category(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    match state.categories.iter_mut().find(|c| c["id"] == id.as_str()) {
        Some(existing) => {
            body["id"] = json!(id);
            *existing = body;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_category(State(state): State<SharedBackend>, Path(id): Path<String>) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.categories.retain(|c| c["id"] != id.as_str());
    StatusCode::NO_CONTENT
}

async fn role_menus(State(state): State<SharedBackend>, Path(id): Path<String>) -> Json<Value> {
    let state = state.lock().unwrap();
    Json(json!(state.role_menus.get(&id).cloned().unwrap_or_default()))
}

async fn set_role_menus(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Vec<String>>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.grant_writes.push(json!(body));
    state.role_menus.insert(id, body);
    StatusCode::OK
}

async fn user_by_user_id(
    State(state): State<SharedBackend>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let state = state.lock().unwrap();
    state
        .users
        .iter()
        .find(|u| u["userId"] == user_id.as_str())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.user_writes.push(body.clone());
    match state.users.iter_mut().find(|u| u["id"] == id.as_str()) {
        Some(existing) => {
            if let (Some(record), Some(changes)) = (existing.as_object_mut(), body.as_object()) {
                for (key, value) in changes {
                    record.insert(key.clone(), value.clone());
                }
            }
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

fn backend_router(state: SharedBackend) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(|| async { StatusCode::OK }))
        .route("/api/menus", get(|| async { Json(menu_tree()) }))
        .route("/api/menus/list", get(|| async { Json(flat_menus()) }))
        .route("/api/menus/user/:id", get(|| async { Json(menu_tree()) }))
        .route(
            "/api/roles",
            get(|| async { Json(json!([{"id": "r-1", "roleId": "editor", "name": "Editor"}])) }),
        )
        .route("/api/roles/:id/menus", get(role_menus).put(set_role_menus))
        .route("/api/users/by-user-id/:user_id", get(user_by_user_id))
        .route("/api/users/:id", put(update_user))
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            put(update_category).delete(delete_category),
        )
        .with_state(state)
}

pub struct TestApp {
    pub address: String,
    pub backend: SharedBackend,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self) -> reqwest::Response {
        self.post_form("/login", &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
            .await
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(BackendState::default()).await
}

pub async fn spawn_app_with(state: BackendState) -> TestApp {
    let backend: SharedBackend = Arc::new(Mutex::new(state));
    let backend_url = serve(backend_router(backend.clone())).await;

    let api = BackendClient::new(&BackendSettings {
        base_url: backend_url,
        timeout_secs: 5,
    })
    .expect("Failed to build backend client");
    let secret = Secret::new("x".repeat(64));
    let state = AppState::new(api, &secret).expect("Failed to build app state");
    let address = serve(build_router(state)).await;

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address,
        backend,
        client,
    }
}
