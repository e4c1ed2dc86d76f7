//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use flashdeck_auth::VisibilityPolicy;
use flashdeck_auth::jwt::{JwtDecoder, JwtEncoder, TokenBlocklist};
use flashdeck_auth::password::{PasswordHasher, PasswordValidator};
use flashdeck_core::config::AppConfig;
use flashdeck_database::{DatabasePool, Stores};
use flashdeck_service::{CategoryService, FlashcardService, TagService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db: Option<DatabasePool>,

    /// Registration, login and token resolution
    pub user_service: Arc<UserService>,
    /// Category use cases
    pub category_service: Arc<CategoryService>,
    /// Tag use cases
    pub tag_service: Arc<TagService>,
    /// Flashcard use cases
    pub flashcard_service: Arc<FlashcardService>,
}

impl AppState {
    /// Wires the auth components and services over the given stores.
    pub fn new(config: AppConfig, stores: Stores, db: Option<DatabasePool>) -> Self {
        let policy = VisibilityPolicy::new();

        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(
            &config.auth,
            TokenBlocklist::new(&config.auth),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            hasher,
            validator,
            encoder,
            decoder,
        ));
        let category_service = Arc::new(CategoryService::new(
            Arc::clone(&stores.categories),
            Arc::clone(&stores.flashcards),
            policy,
        ));
        let tag_service = Arc::new(TagService::new(
            Arc::clone(&stores.tags),
            Arc::clone(&stores.flashcards),
            policy,
        ));
        let flashcard_service = Arc::new(FlashcardService::new(
            Arc::clone(&stores.flashcards),
            Arc::clone(&stores.categories),
            Arc::clone(&stores.tags),
            policy,
        ));

        Self {
            config: Arc::new(config),
            db,
            user_service,
            category_service,
            tag_service,
            flashcard_service,
        }
    }
}
