//! Credential adapters: password hashing and access token signing.

mod argon2_password_hasher;
mod jwt_access_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_access_token_service::{JwtAccessTokenService, MIN_SECRET_LEN, WeakSecretError};
