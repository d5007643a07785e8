//! Driven port for password hashing.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures while hashing or checking a password.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// Stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Hash and verify passwords.
///
/// Implementations are CPU bound and synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError>;
}
