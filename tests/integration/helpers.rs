//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use flashdeck_api::{AppState, build_app};
use flashdeck_auth::password::{PasswordHasher, PasswordValidator};
use flashdeck_core::config::AppConfig;
use flashdeck_database::{MemoryStore, Stores};
use flashdeck_entity::user::UserRole;
use flashdeck_service::AdminUserService;

/// Password that satisfies the default strength policy.
pub const PASSWORD: &str = "plum-Orbit-42-kettle";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct account administration, bypassing HTTP
    pub admin: AdminUserService,
    /// Application config
    pub config: AppConfig,
}

/// A user created for a test, with a live token.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User ID
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Bearer token
    pub token: String,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let stores = Stores::memory(MemoryStore::new());
        let admin = AdminUserService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
        );
        let router = build_app(AppState::new(config.clone(), stores, None));

        Self {
            router,
            admin,
            config,
        }
    }

    /// Create a user with the given role and log them in
    pub async fn create_user(&self, username: &str, role: UserRole) -> TestUser {
        let user = self
            .admin
            .create_user(username, Some(format!("{username}@test.com")), PASSWORD, role)
            .await
            .expect("Failed to create test user");

        let token = self.login(username, PASSWORD).await;

        TestUser {
            id: user.id,
            username: user.username,
            token,
        }
    }

    /// Create a regular member
    pub async fn member(&self, username: &str) -> TestUser {
        self.create_user(username, UserRole::Member).await
    }

    /// Create a superuser
    pub async fn superuser(&self, username: &str) -> TestUser {
        self.create_user(username, UserRole::Superuser).await
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// POST a JSON body and return the created record's id
    pub async fn create(&self, path: &str, body: Value, user: &TestUser) -> Uuid {
        let response = self.request("POST", path, Some(body), Some(&user.token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create at {path} failed: {:?}",
            response.body
        );
        response.id()
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
            req = req.header("Authorization", format!("Bearer {token}"));
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
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// GET as the given user
    pub async fn get(&self, path: &str, user: &TestUser) -> TestResponse {
        self.request("GET", path, None, Some(&user.token)).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `id` of a single-record response
    pub fn id(&self) -> Uuid {
        self.data()["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("response has no id")
    }

    /// Ids of a list response, in order
    pub fn ids(&self) -> Vec<Uuid> {
        self.data()
            .as_array()
            .expect("response data is not a list")
            .iter()
            .filter_map(|item| item["id"].as_str())
            .filter_map(|s| Uuid::parse_str(s).ok())
            .collect()
    }

    /// Field names carried in validation details
    pub fn detail_fields(&self) -> Vec<String> {
        self.body["details"]
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}
