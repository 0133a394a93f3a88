//! Authorization, permission, and owner-or-permission gates.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use storefront_auth::{Claims, JwtEncoder};

use crate::helpers::TestApp;

async fn create_product(app: &TestApp, admin: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "name": "Lamp", "description": "Desk lamp", "price": 25.0, "stock": 3 })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["payload"]["product"]["id"]
        .as_str()
        .expect("No product id")
        .to_string()
}

#[tokio::test]
async fn test_editor_allowed_update_but_not_delete() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let product = create_product(&app, &admin).await;

    app.create_role(&admin, "editor", &["products:update"]).await;
    let (u1, token) = app.register("editor1").await;
    app.set_role(&admin, u1, "EDITOR").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/products/{product}"),
            Some(json!({ "price": 30.0 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["payload"]["product"]["price"], 30.0);

    let response = app
        .request("DELETE", &format!("/api/products/{product}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.message().contains("products:delete"));
    assert_eq!(response.body["status"], "error");
}

#[tokio::test]
async fn test_user_without_permissions_may_update_self() {
    let app = TestApp::new().await;
    let (u2, token) = app.register("plain").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{u2}"),
            Some(json!({ "username": "plain-renamed" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["payload"]["user"]["username"], "plain-renamed");
}

#[tokio::test]
async fn test_user_may_not_update_or_delete_another_user() {
    let app = TestApp::new().await;
    let (_, token) = app.register("mallory").await;
    let (victim, _) = app.register("victim").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{victim}"),
            Some(json!({ "username": "owned" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.message().contains("users:update"));

    let response = app
        .request("DELETE", &format!("/api/users/{victim}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.message().contains("users:delete"));

    let response = app
        .request("GET", &format!("/api/users/{victim}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_may_update_another_user() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (other, _) = app.register("someone").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{other}"),
            Some(json!({ "username": "renamed-by-admin" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_header_never_reaches_handler() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (target, _) = app.register("target").await;

    let response = app
        .request("DELETE", &format!("/api/users/{target}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["payload"].is_null());

    let response = app
        .request("GET", &format!("/api/users/{target}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized_not_forbidden() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("expiring").await;

    let now = Utc::now().timestamp();
    let expired = JwtEncoder::new(&app.state.config.auth)
        .encode_claims(&Claims {
            sub: user_id,
            iat: now - 7200,
            exp: now - 3600,
        })
        .unwrap();

    for token in [expired.as_str(), "not.a.jwt", ""] {
        let response = app.request("GET", "/api/users", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "token {token:?}");
    }

    let response = app
        .request("GET", "/api/users/me", None, Some(&expired))
        .await;
    assert_eq!(response.message(), "Not authenticated, token has expired");
}

#[tokio::test]
async fn test_deleted_user_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register("leaving").await;

    let response = app
        .request("DELETE", &format!("/api/users/{user_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Not authenticated, user no longer exists");
}

#[tokio::test]
async fn test_dangling_role_is_internal_error() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let role_id = app.create_role(&admin, "temp", &["users:read"]).await;
    let (user_id, token) = app.register("orphan").await;
    app.set_role(&admin, user_id, "TEMP").await;

    let response = app
        .request("DELETE", &format!("/api/roles/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.message(), "Error checking permissions");
    assert!(response.body["payload"]["error"].is_string());

    // Self-action is decided before the role is resolved.
    let response = app
        .request(
            "PUT",
            &format!("/api/users/{user_id}"),
            Some(json!({ "username": "still-me" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_permission_names_match_exactly() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/permissions",
            Some(json!({ "name": "Users:Read", "description": "Case variant" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    app.create_role(&admin, "auditor", &["Users:Read"]).await;
    let (user_id, token) = app.register("auditor1").await;
    app.set_role(&admin, user_id, "AUDITOR").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.message().ends_with("Required permission: users:read"));
}

#[tokio::test]
async fn test_revoked_permission_takes_effect_on_next_request() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let role_id = app.create_role(&admin, "reader", &["users:read"]).await;
    let (user_id, token) = app.register("reader1").await;
    app.set_role(&admin, user_id, "READER").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let again = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);

    let permission = app.permission_id(&admin, "users:read").await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/roles/{role_id}/permissions"),
            Some(json!({ "permissions": [permission] })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
