//! In-process revocation list for logged-out tokens.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use flashdeck_core::config::AuthConfig;

/// Revoked token IDs, each forgotten once no token carrying it could still
/// pass expiry validation.
#[derive(Debug, Clone)]
pub struct TokenBlocklist {
    revoked: Cache<Uuid, ()>,
}

impl TokenBlocklist {
    /// Sizes entry lifetime to the access-token TTL plus validation leeway.
    pub fn new(config: &AuthConfig) -> Self {
        let ttl = Duration::from_secs(
            config.jwt_access_ttl_minutes * 60 + super::decoder::LEEWAY_SECONDS,
        );
        Self {
            revoked: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Marks a token ID as revoked.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
    }

    /// Whether a token ID has been revoked.
    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.revoked.contains_key(jti)
    }
}
