//! Access token claims and the opaque token value.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, UserId};

/// Claims carried by an access token.
///
/// Decoded tokens are always read into this struct; unknown or missing
/// claims fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,
    /// Role at the time of login.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl AccessClaims {
    /// Claims for `user` issued at `now` and valid for `ttl`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use petapedia::domain::{AccessClaims, Role, UserId};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let claims = AccessClaims::new(UserId::random(), Role::Customer, now, Duration::hours(24));
    /// assert_eq!(claims.exp - claims.iat, 86_400);
    /// ```
    #[must_use]
    pub fn new(sub: UserId, role: Role, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Whether the claims have expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Signed access token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an already signed token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Compact JWS form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take the encoded token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}
