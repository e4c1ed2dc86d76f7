//! Integration tests for categories: visibility, publishing and the tree.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_member_public_category_is_downgraded() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Rust", "is_public": true, "owner_id": Uuid::new_v4() })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["is_public"], false);
    assert_eq!(response.data()["owner_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_superuser_public_category_is_kept() {
    let app = TestApp::new();
    let root = app.superuser("root").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Algorithms", "is_public": true })),
            Some(&root.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["is_public"], true);
    assert_eq!(response.data()["owner_id"], root.id.to_string());
}

#[tokio::test]
async fn test_member_sees_own_and_public_only() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let public = app
        .create("/api/categories", json!({ "name": "Public", "is_public": true }), &root)
        .await;
    let mine = app
        .create("/api/categories", json!({ "name": "Mine" }), &alice)
        .await;
    let theirs = app
        .create("/api/categories", json!({ "name": "Theirs" }), &bob)
        .await;

    let listed = app.get("/api/categories", &alice).await.ids();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&public));
    assert!(listed.contains(&mine));
    assert!(!listed.contains(&theirs));

    let everything = app.get("/api/categories", &root).await.ids();
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = TestApp::new();

    let list = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);

    let create = app
        .request("POST", "/api/categories", Some(json!({ "name": "x" })), None)
        .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_private_category_of_other_user_is_not_found() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let id = app
        .create("/api/categories", json!({ "name": "Secret" }), &bob)
        .await;
    let path = format!("/api/categories/{id}");

    assert_eq!(app.get(&path, &alice).await.status, StatusCode::NOT_FOUND);

    let update = app
        .request("PUT", &path, Some(json!({ "name": "Mine now" })), Some(&alice.token))
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get(&path, &bob).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_member_cannot_modify_public_category_of_other_user() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let id = app
        .create("/api/categories", json!({ "name": "Shared", "is_public": true }), &root)
        .await;
    let path = format!("/api/categories/{id}");

    assert_eq!(app.get(&path, &alice).await.status, StatusCode::OK);

    let update = app
        .request("PUT", &path, Some(json!({ "name": "Hijacked" })), Some(&alice.token))
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_keeps_owner_and_downgrades() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let id = app
        .create("/api/categories", json!({ "name": "Draft" }), &alice)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/categories/{id}"),
            Some(json!({ "name": "Final", "short_name": "FIN", "is_public": true })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["name"], "Final");
    assert_eq!(response.data()["short_name"], "FIN");
    assert_eq!(response.data()["is_public"], false);
    assert_eq!(response.data()["owner_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_parent_must_be_visible() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let hidden = app
        .create("/api/categories", json!({ "name": "Hidden" }), &bob)
        .await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Child", "parent": hidden })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail_fields(), vec!["parent"]);

    let missing = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Child", "parent_id": Uuid::new_v4() })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.body["details"]["parent"][0]["code"],
        response.body["details"]["parent"][0]["code"]
    );
}

#[tokio::test]
async fn test_reparenting_under_descendant_is_rejected() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let root = app
        .create("/api/categories", json!({ "name": "Languages" }), &alice)
        .await;
    let child = app
        .create(
            "/api/categories",
            json!({ "name": "Rust", "parent_id": root }),
            &alice,
        )
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/categories/{root}"),
            Some(json!({ "name": "Languages", "parent_id": child })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["parent"][0]["code"], "cycle");

    let own = app
        .request(
            "PUT",
            &format!("/api/categories/{root}"),
            Some(json!({ "name": "Languages", "parent_id": root })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_sibling_name_conflicts() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    app.create("/api/categories", json!({ "name": "Rust" }), &alice)
        .await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Rust" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_delete_removes_subtree() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let parent = app
        .create("/api/categories", json!({ "name": "Parent" }), &alice)
        .await;
    let child = app
        .create(
            "/api/categories",
            json!({ "name": "Child", "parent_id": parent }),
            &alice,
        )
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/categories/{parent}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let gone = app.get(&format!("/api/categories/{child}"), &alice).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail_fields(), vec!["name"]);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app.get("/api/categories/42", &alice).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_references_of_public_card_cannot_turn_private() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let category = app
        .create("/api/categories", json!({ "name": "Shared", "is_public": true }), &root)
        .await;
    let tag = app
        .create("/api/tags", json!({ "name": "shared", "is_public": true }), &root)
        .await;
    let card = app
        .create(
            "/api/flashcards",
            json!({
                "question": "What is a trait?",
                "answer": "Shared behaviour",
                "category_id": category,
                "tag_ids": [tag],
                "is_public": true,
            }),
            &root,
        )
        .await;

    let hide_category = app
        .request(
            "PUT",
            &format!("/api/categories/{category}"),
            Some(json!({ "name": "Shared", "is_public": false })),
            Some(&root.token),
        )
        .await;
    assert_eq!(hide_category.status, StatusCode::BAD_REQUEST);
    assert_eq!(hide_category.detail_fields(), vec!["is_public"]);

    let hide_tag = app
        .request(
            "PUT",
            &format!("/api/tags/{tag}"),
            Some(json!({ "name": "shared", "is_public": false })),
            Some(&root.token),
        )
        .await;
    assert_eq!(hide_tag.status, StatusCode::BAD_REQUEST);
    assert_eq!(hide_tag.detail_fields(), vec!["is_public"]);

    let seen = app.get(&format!("/api/flashcards/{card}"), &alice).await;
    assert_eq!(seen.status, StatusCode::OK);
    assert_eq!(seen.data()["is_public"], true);
    let category_view = app.get(&format!("/api/categories/{category}"), &alice).await;
    assert_eq!(category_view.status, StatusCode::OK);
    let tag_view = app.get(&format!("/api/tags/{tag}"), &alice).await;
    assert_eq!(tag_view.status, StatusCode::OK);

    let delete_card = app
        .request("DELETE", &format!("/api/flashcards/{card}"), None, Some(&root.token))
        .await;
    assert_eq!(delete_card.status, StatusCode::OK);

    let hidden = app
        .request(
            "PUT",
            &format!("/api/categories/{category}"),
            Some(json!({ "name": "Shared", "is_public": false })),
            Some(&root.token),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::OK, "{:?}", hidden.body);
    assert_eq!(hidden.data()["is_public"], false);
}

#[tokio::test]
async fn test_owner_rename_keeps_published_category_public() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let id = app
        .create("/api/categories", json!({ "name": "Notes" }), &alice)
        .await;
    let path = format!("/api/categories/{id}");

    let published = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Notes", "is_public": true })),
            Some(&root.token),
        )
        .await;
    assert_eq!(published.data()["is_public"], true);

    let renamed = app
        .request("PUT", &path, Some(json!({ "name": "Study notes" })), Some(&alice.token))
        .await;
    assert_eq!(renamed.status, StatusCode::OK, "{:?}", renamed.body);
    assert_eq!(renamed.data()["name"], "Study notes");
    assert_eq!(renamed.data()["is_public"], true);
    assert_eq!(renamed.data()["owner_id"], alice.id.to_string());
}
