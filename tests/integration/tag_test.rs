//! Integration tests for tags.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_member_public_tag_is_downgraded() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": "ownership", "is_public": true })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["is_public"], false);
    assert_eq!(response.data()["owner_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_tag_listing_is_scoped() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let public = app
        .create("/api/tags", json!({ "name": "basics", "is_public": true }), &root)
        .await;
    let mine = app.create("/api/tags", json!({ "name": "mine" }), &alice).await;
    let theirs = app.create("/api/tags", json!({ "name": "theirs" }), &bob).await;

    let listed = app.get("/api/tags", &alice).await.ids();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&public));
    assert!(listed.contains(&mine));

    let hidden = app.get(&format!("/api/tags/{theirs}"), &alice).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get("/api/tags", &root).await.ids().len(), 3);
}

#[tokio::test]
async fn test_same_name_allowed_across_owners_only() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    app.create("/api/tags", json!({ "name": "async" }), &alice).await;
    app.create("/api/tags", json!({ "name": "async" }), &bob).await;

    let duplicate = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": "async" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_superuser_may_modify_any_tag() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let id = app.create("/api/tags", json!({ "name": "draft" }), &alice).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/tags/{id}"),
            Some(json!({ "name": "reviewed", "is_public": true })),
            Some(&root.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "reviewed");
    assert_eq!(response.data()["is_public"], true);
    assert_eq!(response.data()["owner_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_member_cannot_delete_public_tag_of_other_user() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let id = app
        .create("/api/tags", json!({ "name": "core", "is_public": true }), &root)
        .await;
    let path = format!("/api/tags/{id}");

    let response = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&root.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.get(&path, &root).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unauthenticated_tag_requests_are_rejected() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/tags", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
