use crate::models::{AuthUser, Listing, Menu, PagedBody, Resource, User};
use crate::tree::{SortUpdate, TreeNode};
use blog_core::config::BackendSettings;
use blog_core::observability::{TracedClientExt, TracedRequest};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const GENERIC_FAILURE: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}")]
    Server { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Message to show the administrator. Server `error` text is shown verbatim.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Validation(message) => message.clone(),
            _ if fallback.is_empty() => GENERIC_FAILURE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Failure body. `error` is the backend's own field; `message` is what the
/// framework's default error handler writes.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let usable = |m: &String| !m.trim().is_empty();
        self.error.filter(usable).or(self.message.filter(usable))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    token: String,
    email: String,
    user_id: String,
}

/// HTTP client for the blog REST backend.
///
/// Every call carries trace context; calls made through [`BackendClient::authorized`]
/// also carry the administrator's bearer token.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// A copy of this client that authenticates as `user`.
    pub fn authorized(&self, user: &AuthUser) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(user.token.clone()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, request: TracedRequest) -> TracedRequest {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(&self, request: TracedRequest, path: &str) -> Result<reqwest::Response, ApiError> {
        let response = self.with_auth(request).send().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Backend request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.into_message(),
            Err(_) => None,
        };
        tracing::warn!(path = %path, status = status.as_u16(), message = ?message, "Backend rejected request");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Failed to decode backend response");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.dispatch(self.client.traced_get(&self.url(path)), path).await?;
        Self::decode(response, path).await
    }

    pub async fn get_json_with<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.traced_get(&self.url(path)).query(query);
        let response = self.dispatch(request, path).await?;
        Self::decode(response, path).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self.client.traced_post(&self.url(path)).json(body);
        self.dispatch(request, path).await.map(|_| ())
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self.client.traced_put(&self.url(path)).json(body);
        self.dispatch(request, path).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.client.traced_delete(&self.url(path)), path)
            .await
            .map(|_| ())
    }

    // Generic resource contract: /api/{collection}[/{id}]

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let path = R::list_path();
        let listing: Listing<R> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// One page of a paged collection (articles). `page` is zero-based.
    pub async fn list_page<R: Resource>(&self, page: u32, size: u32) -> Result<PagedBody<R>, ApiError> {
        let path = R::list_path();
        let listing: Listing<R> = self
            .get_json_with(&path, &[("page", page), ("size", size)])
            .await?;
        Ok(match listing {
            Listing::Paged(body) => body,
            Listing::Items(content) => PagedBody {
                total_elements: content.len() as u64,
                total_pages: 1,
                number: 0,
                content,
            },
        })
    }

    pub async fn create<R: Resource>(&self, body: &serde_json::Value) -> Result<(), ApiError> {
        self.post_json(&format!("/api/{}", R::COLLECTION), body).await
    }

    pub async fn update<R: Resource>(&self, id: &str, body: &serde_json::Value) -> Result<(), ApiError> {
        self.put_json(&format!("/api/{}/{}", R::COLLECTION, id), body).await
    }

    pub async fn remove<R: Resource>(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/{}/{}", R::COLLECTION, id)).await
    }

    // Menus

    /// Nested menu tree as the backend builds it.
    pub async fn menu_tree(&self) -> Result<Vec<TreeNode<Menu>>, ApiError> {
        self.get_json("/api/menus").await
    }

    /// Every menu as a flat list.
    pub async fn menu_list(&self) -> Result<Vec<Menu>, ApiError> {
        self.list::<Menu>().await
    }

    /// Menus visible to `user_id`, nested.
    pub async fn user_menus(&self, user_id: &str) -> Result<Vec<TreeNode<Menu>>, ApiError> {
        self.get_json(&format!("/api/menus/user/{}", user_id)).await
    }

    pub async fn update_menu_sort(&self, updates: &[SortUpdate]) -> Result<(), ApiError> {
        self.put_json("/api/menus/sort", updates).await
    }

    // Role permissions

    /// Menu slugs granted to the role.
    pub async fn role_menus(&self, role_id: &str) -> Result<Vec<String>, ApiError> {
        self.get_json(&format!("/api/roles/{}/menus", role_id)).await
    }

    /// Replace the role's grants with exactly `menu_ids`.
    pub async fn set_role_menus(&self, role_id: &str, menu_ids: &[String]) -> Result<(), ApiError> {
        self.put_json(&format!("/api/roles/{}/menus", role_id), menu_ids)
            .await
    }

    // Users

    pub async fn search_users(&self, keyword: &str) -> Result<Vec<User>, ApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list::<User>().await;
        }
        self.get_json_with("/api/users/search", &[("keyword", keyword)])
            .await
    }

    /// The account behind a login `userId`; `None` when the backend has no such user.
    pub async fn user_by_user_id(&self, user_id: &str) -> Result<Option<User>, ApiError> {
        match self.get_json(&format!("/api/users/by-user-id/{}", user_id)).await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Partial update of one user; absent fields are left untouched.
    pub async fn update_user<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<(), ApiError> {
        self.put_json(&format!("/api/users/{}", id), body).await
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let path = "/api/auth/login";
        let request = self
            .client
            .traced_post(&self.url(path))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.dispatch(request, path).await?;
        let body: LoginBody = Self::decode(response, path).await?;

        Ok(AuthUser {
            user_id: body.user_id,
            email: body.email,
            token: body.token,
        })
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_json("/api/auth/logout", &serde_json::json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendSettings {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Tag already exists"})))
            .mount(&server)
            .await;

        let err = client(&server)
            .create::<Tag>(&json!({"name": "rust"}))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Failed to save"), "Tag already exists");
    }

    #[tokio::test]
    async fn blank_error_text_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "", "message": "  "})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .create::<Tag>(&json!({"name": "rust"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 400, message: None }));
        assert_eq!(err.user_message("Failed to save tag"), "Failed to save tag");
    }

    #[tokio::test]
    async fn framework_error_message_is_used_when_error_is_blank() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tags/1"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": " ", "message": "Internal Server Error"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).remove::<Tag>("1").await.unwrap_err();
        assert_eq!(err.user_message("Failed to delete"), "Internal Server Error");
    }

    #[tokio::test]
    async fn nested_menu_tree_decodes_children() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/menus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "menuId": "content", "name": "Content", "path": "/admin/content",
                 "children": [
                    {"id": "2", "menuId": "articles", "parentId": "content", "name": "Articles",
                     "path": "/admin/articles"}
                 ]},
                {"id": "3", "menuId": "settings", "name": "Settings", "path": "/admin/settings"}
            ])))
            .mount(&server)
            .await;

        let tree = client(&server).menu_tree().await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.name, "Content");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].item.name, "Articles");
        assert!(tree[1].children.is_empty());
    }

    #[tokio::test]
    async fn unknown_user_id_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/by-user-id/u-9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "User not found"})))
            .mount(&server)
            .await;

        assert_eq!(client(&server).user_by_user_id("u-9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tags/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).remove::<Tag>("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, message: None }));
        assert_eq!(err.user_message("Failed to delete"), "Failed to delete");
    }

    #[tokio::test]
    async fn login_returns_session_user_and_token_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token": "tok", "email": "a@b.c", "userId": "u-1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/roles"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        let user = api.login("a@b.c", "pw").await.unwrap();
        assert_eq!(user.user_id, "u-1");

        let roles = api.authorized(&user).list::<crate::models::Role>().await.unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn paged_listing_passes_page_and_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(query_param("page", "2"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"id": "a", "title": "Hello", "tags": null}],
                "totalPages": 3, "totalElements": 21, "number": 2
            })))
            .mount(&server)
            .await;

        let page = client(&server)
            .list_page::<crate::models::Article>(2, 10)
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "email": "a@b.c", "name": "A"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let users = client(&server).search_users("   ").await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_uses_fallback() {
        let api = BackendClient::new(&BackendSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let err = api.list::<Tag>().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.user_message(""), GENERIC_FAILURE);
    }
}
