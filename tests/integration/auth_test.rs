//! Integration tests for registration, login, logout and token handling.

mod helpers;

use http::StatusCode;

use flashdeck_entity::user::UserRole;
use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "memory");
}

#[tokio::test]
async fn test_register_creates_member() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "newbie",
                "email": "newbie@test.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["username"], "newbie");
    assert_eq!(response.data()["role"], "member");
    assert_eq!(response.data()["is_superuser"], false);
    assert!(response.data().get("password_hash").is_none());

    app.login("newbie", PASSWORD).await;
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "weak", "password": "password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.member("taken").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "TAKEN", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": 42 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.member("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_user_matches_bad_password() {
    let app = TestApp::new();
    app.member("alice").await;

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;
    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice", "password": "nope-nope-nope" })),
            None,
        )
        .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], wrong.body["message"]);
}

#[tokio::test]
async fn test_me_returns_identity() {
    let app = TestApp::new();
    let root = app.superuser("root").await;

    let response = app.get("/api/auth/me", &root).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.id(), root.id);
    assert_eq!(response.data()["role"], "superuser");
    assert_eq!(response.data()["is_superuser"], true);
}

#[tokio::test]
async fn test_missing_or_bad_token_is_rejected() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.get("/api/auth/me", &alice).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let fresh = app.login("alice", PASSWORD).await;
    let again = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_user_token_stops_working() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    app.admin.delete_user("alice").await.expect("delete");

    let response = app.get("/api/auth/me", &alice).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_promotion_applies_to_existing_token() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    app.admin
        .set_role("alice", UserRole::Superuser)
        .await
        .expect("promote");

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": "Shared", "is_public": true })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["is_public"], true);
}
