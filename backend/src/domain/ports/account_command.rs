//! Driving ports for account registration, login, and bearer authentication.
//!
//! Inbound adapters call these without knowing how users are stored or how
//! tokens are signed.

use async_trait::async_trait;

use crate::domain::{AccessClaims, AccessToken, Error, LoginCredentials, Registration, UserId};

/// Registration and login use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and return its identifier.
    async fn register(&self, registration: &Registration) -> Result<UserId, Error>;

    /// Check credentials and issue an access token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}

/// Resolve a bearer token into verified claims.
#[cfg_attr(test, mockall::automock)]
pub trait BearerAuthenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<AccessClaims, Error>;
}
