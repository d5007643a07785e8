//! Driven port for signing and verifying access tokens.

use crate::domain::{AccessClaims, AccessToken};

use super::define_port_error;

define_port_error! {
    /// Token signing and verification failures.
    pub enum AccessTokenError {
        /// Claims could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
        /// Signature, algorithm, or claim shape did not validate.
        Invalid { message: String } => "access token is invalid: {message}",
        /// Token validated but has expired.
        Expired => "access token has expired",
    }
}

/// Sign claims into tokens and verify tokens back into claims.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenService: Send + Sync {
    fn sign(&self, claims: &AccessClaims) -> Result<AccessToken, AccessTokenError>;

    /// Decode and validate `token`, including expiry.
    fn verify(&self, token: &str) -> Result<AccessClaims, AccessTokenError>;
}
