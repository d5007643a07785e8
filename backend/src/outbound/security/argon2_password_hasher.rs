//! Argon2id implementation of the password hashing port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes with Argon2id default parameters and a random salt per password.
///
/// Digests are stored in PHC string format, so parameters travel with the
/// hash and verification needs no configuration.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(hash.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    fn hashed_password_verifies(hasher: Argon2PasswordHasher) {
        let digest = hasher.hash("rahasia").expect("hash");

        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("rahasia", &digest).expect("verify"));
        assert!(!hasher.verify("salah", &digest).expect("verify"));
    }

    #[rstest]
    fn same_password_gets_distinct_salts(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("rahasia").expect("hash");
        let second = hasher.hash("rahasia").expect("hash");

        assert_ne!(first, second);
    }

    #[rstest]
    fn garbage_digest_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("rahasia", &PasswordDigest::new("not-a-phc-string"))
            .expect_err("malformed digest");

        assert!(matches!(err, PasswordHashError::MalformedDigest { .. }));
    }
}
