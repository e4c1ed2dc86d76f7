//! Integration tests for flashcards: publication checks and list filters.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use helpers::{TestApp, TestUser};

fn card(question: &str) -> Value {
    json!({ "question": question, "answer": "answer" })
}

fn tagged(question: &str, tag_ids: Value) -> Value {
    json!({ "question": question, "answer": question, "tag_ids": tag_ids })
}

async fn create_card(app: &TestApp, user: &TestUser, body: Value) -> Uuid {
    app.create("/api/flashcards", body, user).await
}

#[tokio::test]
async fn test_public_card_with_private_category_is_rejected() {
    let app = TestApp::new();
    let root = app.superuser("root").await;

    let category = app
        .create("/api/categories", json!({ "name": "Internal" }), &root)
        .await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({
                "question": "q",
                "answer": "a",
                "category": category,
                "is_public": true,
            })),
            Some(&root.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.detail_fields(), vec!["category"]);

    let listed = app.get("/api/flashcards", &root).await;
    assert!(listed.ids().is_empty());
}

#[tokio::test]
async fn test_category_and_tag_failures_are_reported_together() {
    let app = TestApp::new();
    let root = app.superuser("root").await;

    let category = app
        .create("/api/categories", json!({ "name": "Internal" }), &root)
        .await;
    let public_tag = app
        .create("/api/tags", json!({ "name": "open", "is_public": true }), &root)
        .await;
    let private_tag = app
        .create("/api/tags", json!({ "name": "closed" }), &root)
        .await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({
                "question": "q",
                "answer": "a",
                "category_id": category,
                "tag_ids": [public_tag, private_tag],
                "is_public": true,
            })),
            Some(&root.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let mut fields = response.detail_fields();
    fields.sort();
    assert_eq!(fields, vec!["category", "tags"]);
    assert_eq!(response.body["details"]["tags"][0]["code"], "private_tags");
}

#[tokio::test]
async fn test_public_card_with_public_references_is_accepted() {
    let app = TestApp::new();
    let root = app.superuser("root").await;

    let category = app
        .create("/api/categories", json!({ "name": "Open", "is_public": true }), &root)
        .await;
    let tag = app
        .create("/api/tags", json!({ "name": "basics", "is_public": true }), &root)
        .await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({
                "question": "What is ownership?",
                "answer": "Each value has one owner.",
                "category_id": category,
                "tag_ids": [tag, tag],
                "is_public": true,
            })),
            Some(&root.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["is_public"], true);
    assert_eq!(response.data()["category_id"], category.to_string());
    assert_eq!(response.data()["tags"], json!([tag]));
    assert_eq!(response.data()["ease_factor"], 2.5);
    assert_eq!(response.data()["repetitions"], 0);
}

#[tokio::test]
async fn test_member_public_card_is_downgraded_and_unconstrained() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let category = app
        .create("/api/categories", json!({ "name": "Mine" }), &alice)
        .await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({
                "question": "q",
                "answer": "a",
                "category_id": category,
                "is_public": true,
            })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["is_public"], false);
    assert_eq!(response.data()["owner_id"], alice.id.to_string());
}

#[tokio::test]
async fn test_invisible_references_read_as_missing() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let hidden_category = app
        .create("/api/categories", json!({ "name": "Bob's" }), &bob)
        .await;
    let hidden_tag = app.create("/api/tags", json!({ "name": "bob" }), &bob).await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({
                "question": "q",
                "answer": "a",
                "category_id": hidden_category,
                "tag_ids": [hidden_tag],
            })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["details"]["category"][0]["code"],
        "does_not_exist"
    );
    assert_eq!(response.body["details"]["tags"][0]["code"], "does_not_exist");
}

#[tokio::test]
async fn test_member_lists_own_and_public_cards() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let public_body = json!({ "question": "p", "answer": "a", "is_public": true });
    let public = create_card(&app, &root, public_body).await;
    let mine = create_card(&app, &alice, card("mine")).await;
    let theirs = create_card(&app, &bob, card("theirs")).await;

    let listed = app.get("/api/flashcards", &alice).await.ids();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&public));
    assert!(listed.contains(&mine));
    assert!(!listed.contains(&theirs));

    let hidden = app.get(&format!("/api/flashcards/{theirs}"), &alice).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tag_filter_returns_each_match_once() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let t5 = app.create("/api/tags", json!({ "name": "five" }), &alice).await;
    let t6 = app.create("/api/tags", json!({ "name": "six" }), &alice).await;
    let t7 = app.create("/api/tags", json!({ "name": "seven" }), &alice).await;

    let a = create_card(&app, &alice, tagged("a", json!([t5]))).await;
    let b = create_card(&app, &alice, tagged("b", json!([t6]))).await;
    let both = create_card(&app, &alice, tagged("c", json!([t5, t6]))).await;
    create_card(&app, &alice, json!({ "question": "d", "answer": "d", "tag_ids": [t7] })).await;
    create_card(&app, &alice, card("untagged")).await;

    let response = app
        .get(&format!("/api/flashcards?tag_ids={t5},{t6}"), &alice)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let mut ids = response.ids();
    ids.sort();
    let mut expected = vec![a, b, both];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_code_snippet_filter() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let snippet = create_card(
        &app,
        &alice,
        json!({ "question": "fn main?", "answer": "fn main() {}", "is_code_snippet": true }),
    )
    .await;
    create_card(&app, &alice, card("prose")).await;
    create_card(
        &app,
        &bob,
        json!({ "question": "hidden", "answer": "x", "is_code_snippet": true }),
    )
    .await;

    let flagged = app
        .get("/api/flashcards?is_code_snippet=true", &alice)
        .await
        .ids();
    assert_eq!(flagged, vec![snippet]);

    let unflagged = app
        .get("/api/flashcards?is_code_snippet=false", &alice)
        .await
        .ids();
    assert_eq!(unflagged.len(), 1);
    assert!(!unflagged.contains(&snippet));
}

#[tokio::test]
async fn test_search_and_category_filters_intersect() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let rust = app
        .create("/api/categories", json!({ "name": "Rust" }), &alice)
        .await;
    let go = app.create("/api/categories", json!({ "name": "Go" }), &alice).await;

    let target = create_card(
        &app,
        &alice,
        json!({ "question": "What is a Trait object?", "answer": "dyn", "category_id": rust }),
    )
    .await;
    create_card(
        &app,
        &alice,
        json!({ "question": "What is a lifetime?", "answer": "scope", "category_id": rust }),
    )
    .await;
    create_card(
        &app,
        &alice,
        json!({
            "question": "What is an interface?",
            "answer": "a trait-like type",
            "category_id": go,
        }),
    )
    .await;

    let by_search = app.get("/api/flashcards?search=trait", &alice).await.ids();
    assert_eq!(by_search.len(), 2);

    let combined = app
        .get(
            &format!("/api/flashcards?search=trait&category_id={rust}"),
            &alice,
        )
        .await
        .ids();
    assert_eq!(combined, vec![target]);
}

#[tokio::test]
async fn test_malformed_filter_is_rejected() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app.get("/api/flashcards?tag_ids=5,6", &alice).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_revalidates_and_keeps_owner() {
    let app = TestApp::new();
    let root = app.superuser("root").await;
    let alice = app.member("alice").await;

    let private_category = app
        .create("/api/categories", json!({ "name": "Internal" }), &root)
        .await;
    let id = create_card(&app, &root, card("draft")).await;
    let path = format!("/api/flashcards/{id}");

    let rejected = app
        .request(
            "PUT",
            &path,
            Some(json!({
                "question": "draft",
                "answer": "a",
                "category_id": private_category,
                "is_public": true,
            })),
            Some(&root.token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected.detail_fields(), vec!["category"]);

    let published = app
        .request(
            "PUT",
            &path,
            Some(json!({ "question": "final", "answer": "a", "is_public": true })),
            Some(&root.token),
        )
        .await;
    assert_eq!(published.status, StatusCode::OK, "{:?}", published.body);
    assert_eq!(published.data()["question"], "final");
    assert_eq!(published.data()["is_public"], true);
    assert_eq!(published.data()["owner_id"], root.id.to_string());

    let forbidden = app
        .request("PUT", &path, Some(card("stolen")), Some(&alice.token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleting_category_uncategorizes_cards() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let category = app
        .create("/api/categories", json!({ "name": "Temp" }), &alice)
        .await;
    let id = create_card(
        &app,
        &alice,
        json!({ "question": "q", "answer": "a", "category_id": category }),
    )
    .await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/categories/{category}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app.get(&format!("/api/flashcards/{id}"), &alice).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["category_id"], Value::Null);
}

#[tokio::test]
async fn test_deleting_tag_detaches_it() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let tag = app.create("/api/tags", json!({ "name": "gone" }), &alice).await;
    let id = create_card(
        &app,
        &alice,
        json!({ "question": "q", "answer": "a", "tag_ids": [tag] }),
    )
    .await;

    app.request("DELETE", &format!("/api/tags/{tag}"), None, Some(&alice.token))
        .await;

    let response = app.get(&format!("/api/flashcards/{id}"), &alice).await;
    assert_eq!(response.data()["tags"], json!([]));
}

#[tokio::test]
async fn test_delete_card() {
    let app = TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;

    let id = create_card(&app, &alice, card("bye")).await;
    let path = format!("/api/flashcards/{id}");

    let other = app.request("DELETE", &path, None, Some(&bob.token)).await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);

    let own = app.request("DELETE", &path, None, Some(&alice.token)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(app.get(&path, &alice).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let app = TestApp::new();
    let alice = app.member("alice").await;

    let response = app
        .request(
            "POST",
            "/api/flashcards",
            Some(json!({ "question": "", "answer": "a" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail_fields(), vec!["question"]);
}

#[tokio::test]
async fn test_unauthenticated_flashcard_requests_are_rejected() {
    let app = TestApp::new();

    let list = app.request("GET", "/api/flashcards", None, None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);

    let create = app
        .request("POST", "/api/flashcards", Some(card("q")), None)
        .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
}
