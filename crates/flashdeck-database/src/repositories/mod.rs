//! PostgreSQL implementations of the store traits.

pub mod category;
pub mod flashcard;
pub mod tag;
pub mod user;

pub use category::CategoryRepository;
pub use flashcard::FlashcardRepository;
pub use tag::TagRepository;
pub use user::UserRepository;

use sqlx::{Postgres, QueryBuilder};

use flashdeck_core::error::{AppError, ErrorKind};
use flashdeck_core::types::VisibilityScope;

/// Append the read-visibility predicate for `alias` to a query whose
/// `WHERE` clause is already open.
pub(crate) fn push_visibility(
    qb: &mut QueryBuilder<'_, Postgres>,
    scope: VisibilityScope,
    alias: &str,
) {
    if let Some(owner_id) = scope.restricted_to() {
        qb.push(format!(" AND ({alias}.owner_id = "))
            .push_bind(owner_id)
            .push(format!(" OR {alias}.is_public)"));
    }
}

/// Map a unique violation on `constraint` to a conflict carrying `message`.
pub(crate) fn map_unique(
    err: sqlx::Error,
    constraint: &str,
    message: impl Into<String>,
    context: &str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(constraint) => {
            AppError::conflict(message)
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}

pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
