//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use flashdeck_core::config::AuthConfig;
use flashdeck_core::error::AppError;

use super::blocklist::TokenBlocklist;
use super::claims::Claims;

/// Clock-skew allowance applied to `exp`.
pub const LEEWAY_SECONDS: u64 = 5;

/// Verifies signature, expiry and revocation of access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    blocklist: TokenBlocklist,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, blocklist: TokenBlocklist) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            blocklist,
        }
    }

    /// Decodes a token and rejects it if expired, forged or revoked.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Invalid token: {e}")),
            })?
            .claims;

        if self.blocklist.is_revoked(&claims.jti) {
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Revokes the token described by `claims` until it would expire anyway.
    pub async fn revoke(&self, claims: &Claims) {
        self.blocklist.revoke(claims.jti).await;
        debug!(user_id = %claims.sub, jti = %claims.jti, "Revoked access token");
    }
}
