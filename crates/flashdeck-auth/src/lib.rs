//! # flashdeck-auth
//!
//! Authentication and read/write authorization for Flashdeck.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuance, validation and revocation
//! - `password`: Argon2id hashing and strength policy
//! - `visibility`: who may see, publish and modify owned records

pub mod jwt;
pub mod password;
pub mod visibility;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenBlocklist};
pub use password::{PasswordHasher, PasswordValidator};
pub use visibility::VisibilityPolicy;
