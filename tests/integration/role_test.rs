//! Role and permission administration.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_assign_and_unassign_are_idempotent() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let role_id = app.create_role(&admin, "packer", &[]).await;
    let permission = app.permission_id(&admin, "products:update").await;
    let path = format!("/api/roles/{role_id}/permissions");

    for _ in 0..2 {
        let response = app
            .request(
                "PUT",
                &path,
                Some(json!({ "permissions": [permission, permission] })),
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        let perms = response.body["payload"]["role"]["permissions"]
            .as_array()
            .unwrap();
        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0]["name"], "products:update");
    }

    let absent = app.permission_id(&admin, "roles:delete").await;
    let response = app
        .request(
            "DELETE",
            &path,
            Some(json!({ "permissions": [absent] })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["payload"]["role"]["permissions"]
            .as_array()
            .unwrap()
            .len(),
        1
    );

    for _ in 0..2 {
        let response = app
            .request(
                "DELETE",
                &path,
                Some(json!({ "permissions": [permission] })),
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(
            response.body["payload"]["role"]["permissions"]
                .as_array()
                .unwrap()
                .is_empty()
        );
    }
}

#[tokio::test]
async fn test_assign_unknown_permission_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let role_id = app.create_role(&admin, "picker", &[]).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/roles/{role_id}/permissions"),
            Some(json!({ "permissions": [uuid::Uuid::new_v4()] })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Some permissions do not exist");
}

#[tokio::test]
async fn test_role_names_are_normalized_and_unique() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_role(&admin, "support", &[]).await;

    let response = app
        .request(
            "POST",
            "/api/roles",
            Some(json!({ "name": "Support", "description": "again" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.request("GET", "/api/roles", None, Some(&admin)).await;
    let names: Vec<_> = response.body["payload"]["roles"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert!(names.contains(&"SUPPORT"));
    assert!(names.contains(&"ADMIN"));
    assert!(names.contains(&"USER"));
}

#[tokio::test]
async fn test_unknown_role_assignment_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user_id, _) = app.register("wanderer").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}/role"),
            Some(json!({ "roleName": "nonexistent" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_permission_removes_it_from_roles() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/permissions",
            Some(json!({ "name": "reports:read", "description": "Read reports" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let permission = response.body["payload"]["permission"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let role_id = app.create_role(&admin, "analyst", &["reports:read"]).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/permissions/{permission}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/roles/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.body["payload"]["role"]["permissions"]
            .as_array()
            .unwrap()
            .is_empty()
    );
}
