//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::{AppState, build_app};
use storefront_core::config::AppConfig;
use storefront_database::Repositories;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const USER_PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to services and stores
    pub state: AppState,
}

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The envelope `message`.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application with seeded roles and an administrator
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.rbac.admin_email = Some(ADMIN_EMAIL.to_string());
        config.rbac.admin_password = Some(ADMIN_PASSWORD.to_string());

        let state = AppState::new(config, Repositories::in_memory());
        state
            .bootstrap()
            .run()
            .await
            .expect("Failed to seed defaults");

        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Register a user through the API and return their ID and token
    pub async fn register(&self, username: &str) -> (Uuid, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": USER_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );

        let id = response.body["payload"]["user"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No user id in register response");
        let token = response.body["payload"]["token"]
            .as_str()
            .expect("No token in register response")
            .to_string();
        (id, token)
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["payload"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Token of the seeded administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// ID of the permission called `name`, looked up as administrator
    pub async fn permission_id(&self, admin: &str, name: &str) -> String {
        let response = self
            .request("GET", "/api/permissions", None, Some(admin))
            .await;
        response.body["payload"]["permissions"]
            .as_array()
            .and_then(|perms| perms.iter().find(|p| p["name"] == name))
            .and_then(|p| p["id"].as_str())
            .unwrap_or_else(|| panic!("Permission {name} not found"))
            .to_string()
    }

    /// Create a role holding the named permissions and return its ID
    pub async fn create_role(&self, admin: &str, name: &str, permissions: &[&str]) -> String {
        let response = self
            .request(
                "POST",
                "/api/roles",
                Some(json!({ "name": name, "description": format!("{name} role") })),
                Some(admin),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Role creation failed: {:?}",
            response.body
        );
        let role_id = response.body["payload"]["role"]["id"]
            .as_str()
            .expect("No role id")
            .to_string();

        if !permissions.is_empty() {
            let mut ids = Vec::new();
            for name in permissions {
                ids.push(self.permission_id(admin, name).await);
            }
            let response = self
                .request(
                    "PUT",
                    &format!("/api/roles/{role_id}/permissions"),
                    Some(json!({ "permissions": ids })),
                    Some(admin),
                )
                .await;
            assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        }

        role_id
    }

    /// Move a user to another role
    pub async fn set_role(&self, admin: &str, user_id: Uuid, role_name: &str) {
        let response = self
            .request(
                "PATCH",
                &format!("/api/users/{user_id}/role"),
                Some(json!({ "roleName": role_name })),
                Some(admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
