//! Registration, login, and password changes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, USER_PASSWORD};

#[tokio::test]
async fn test_register_assigns_default_role() {
    let app = TestApp::new().await;
    let (_, token) = app.register("newbie").await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["payload"]["user"]["role"]["name"], "USER");
    assert!(response.body["payload"]["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register("twin").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "twin2", "email": "TWIN@example.com", "password": USER_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "User already exists");
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "shorty", "email": "shorty@example.com", "password": "abc" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "Password must be at least 6 characters long"
    );

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "bad", "email": "not-an-email", "password": USER_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ghost@example.com", "password": USER_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "User not found");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new().await;
    let (_, token) = app.register("rotator").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/change-password",
            Some(json!({ "currentPassword": "wrong-password", "newPassword": "fresh-secret" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Current password is incorrect");

    let response = app
        .request(
            "PUT",
            "/api/auth/change-password",
            Some(json!({ "currentPassword": USER_PASSWORD, "newPassword": "fresh-secret" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.login("rotator@example.com", "fresh-secret").await;
}

#[tokio::test]
async fn test_logout_is_stateless() {
    let app = TestApp::new().await;
    let (_, token) = app.register("leaver").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
}
