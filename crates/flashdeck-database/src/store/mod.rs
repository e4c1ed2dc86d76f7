//! Store traits implemented by every persistence backend.

pub mod category;
pub mod flashcard;
pub mod tag;
pub mod user;

use std::sync::Arc;

use sqlx::PgPool;

pub use self::category::CategoryStore;
pub use self::flashcard::FlashcardStore;
pub use self::tag::TagStore;
pub use self::user::UserStore;

use crate::memory::MemoryStore;
use crate::repositories::{
    CategoryRepository, FlashcardRepository, TagRepository, UserRepository,
};

/// One handle per store, shared by the services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Category tree.
    pub categories: Arc<dyn CategoryStore>,
    /// Tags.
    pub tags: Arc<dyn TagStore>,
    /// Flashcards and their tag links.
    pub flashcards: Arc<dyn FlashcardStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            tags: Arc::new(TagRepository::new(pool.clone())),
            flashcards: Arc::new(FlashcardRepository::new(pool)),
        }
    }

    /// Stores backed by a single in-process [`MemoryStore`].
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            categories: store.clone(),
            tags: store.clone(),
            flashcards: store,
        }
    }
}
