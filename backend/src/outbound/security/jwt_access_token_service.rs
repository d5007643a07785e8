//! HS256 JSON Web Token implementation of the access token port.
//!
//! `jsonwebtoken` checks the signature, algorithm, and claim shape. Expiry is
//! checked here against the injected clock instead of the library's
//! wall-clock check, so tests can move time.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{AccessTokenError, AccessTokenService};
use crate::domain::{AccessClaims, AccessToken};

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Signing secret could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signing secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
pub struct WeakSecretError(pub usize);

/// Signs and verifies access tokens with a shared HMAC secret.
pub struct JwtAccessTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtAccessTokenService {
    /// Build the service from a secret of at least [`MIN_SECRET_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WeakSecretError`] for shorter secrets.
    pub fn new(secret: &Zeroizing<Vec<u8>>, clock: Arc<dyn Clock>) -> Result<Self, WeakSecretError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(WeakSecretError(secret.len()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        })
    }
}

impl AccessTokenService for JwtAccessTokenService {
    fn sign(&self, claims: &AccessClaims) -> Result<AccessToken, AccessTokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| AccessTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, AccessTokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => AccessTokenError::expired(),
                _ => AccessTokenError::invalid(err.to_string()),
            }
        })?;
        if data.claims.is_expired_at(self.clock.utc()) {
            return Err(AccessTokenError::expired());
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};
    use crate::test_support::MutableClock;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn secret(byte: u8) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(vec![byte; MIN_SECRET_LEN])
    }

    struct Harness {
        clock: Arc<MutableClock>,
        service: JwtAccessTokenService,
        claims: AccessClaims,
    }

    #[fixture]
    fn harness() -> Harness {
        let now = Utc
            .with_ymd_and_hms(2024, 8, 17, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        let clock = Arc::new(MutableClock::new(now));
        let service = JwtAccessTokenService::new(&secret(7), clock.clone()).expect("secret");
        let claims = AccessClaims::new(UserId::random(), Role::Customer, now, Duration::hours(1));
        Harness {
            clock,
            service,
            claims,
        }
    }

    #[rstest]
    fn signed_tokens_verify_to_the_same_claims(harness: Harness) {
        let token = harness.service.sign(&harness.claims).expect("sign");

        let verified = harness.service.verify(token.as_str()).expect("verify");
        assert_eq!(verified, harness.claims);
    }

    #[rstest]
    fn tokens_expire_on_the_injected_clock(harness: Harness) {
        let token = harness.service.sign(&harness.claims).expect("sign");

        harness.clock.advance_seconds(3_600);

        assert_eq!(
            harness.service.verify(token.as_str()),
            Err(AccessTokenError::Expired)
        );
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(harness: Harness) {
        let other =
            JwtAccessTokenService::new(&secret(9), harness.clock.clone()).expect("secret");
        let token = other.sign(&harness.claims).expect("sign");

        let err = harness.service.verify(token.as_str()).expect_err("wrong key");
        assert!(matches!(err, AccessTokenError::Invalid { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    fn garbage_is_invalid(harness: Harness, #[case] token: &str) {
        let err = harness.service.verify(token).expect_err("garbage");
        assert!(matches!(err, AccessTokenError::Invalid { .. }));
    }

    #[rstest]
    fn short_secrets_are_refused() {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let err = JwtAccessTokenService::new(&Zeroizing::new(b"short".to_vec()), clock)
            .err()
            .expect("weak secret");
        assert_eq!(err, WeakSecretError(5));
    }
}
