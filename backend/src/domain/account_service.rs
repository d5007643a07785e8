//! Account service implementing registration, login, and bearer checks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use tokio::sync::OnceCell;
use tokio::task::{JoinError, spawn_blocking};
use tracing::{debug, error, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccessTokenError, AccessTokenService, AccountCommand, BearerAuthenticator, PasswordHashError,
    PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessClaims, AccessToken, Error, LoginCredentials, PasswordDigest, Registration, User, UserId,
};

/// Default access token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(24);

const BAD_CREDENTIALS: &str = "invalid email or password";

/// Hashed once and verified against when the email is unknown, so both
/// login failures cost one password check.
const DECOY_PASSWORD: &str = "petapedia-decoy-password";

fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { .. } => Error::invalid_request("email already registered")
            .with_details(json!({ "field": "email" })),
        other => {
            error!(error = %other, "user repository call failed");
            Error::internal("user store unavailable")
        }
    }
}

fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password could not be processed")
}

fn map_join_error(err: JoinError) -> Error {
    error!(error = %err, "password task did not complete");
    Error::internal("password could not be processed")
}

/// Collaborators for [`AccountService`].
pub struct AccountServiceDeps {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn AccessTokenService>,
    pub clock: Arc<dyn Clock>,
}

/// Registration, login, and bearer authentication over the user store.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn AccessTokenService>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
    decoy: Arc<OnceCell<PasswordDigest>>,
}

impl AccountService {
    /// Issue tokens valid for `token_ttl`.
    pub fn new(deps: AccountServiceDeps, token_ttl: Duration) -> Self {
        let AccountServiceDeps {
            users,
            hasher,
            tokens,
            clock,
        } = deps;
        Self {
            users,
            hasher,
            tokens,
            clock,
            token_ttl,
            decoy: Arc::new(OnceCell::new()),
        }
    }

    /// Hashing and verification run on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(map_join_error)?
            .map_err(map_hash_error)
    }

    async fn verify_password(&self, password: &str, digest: PasswordDigest) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(map_join_error)?
            .map_err(map_hash_error)
    }

    async fn decoy_digest(&self) -> Result<PasswordDigest, Error> {
        self.decoy
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await
            .cloned()
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        let digest = self.hash_password(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            registration.role(),
            digest,
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), role = user.role().as_str(), "user registered");
        Ok(*user.id())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
        else {
            let decoy = self.decoy_digest().await?;
            self.verify_password(credentials.password(), decoy).await?;
            debug!("login for unknown email");
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password(), user.password().clone())
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        let claims = AccessClaims::new(*user.id(), user.role(), self.clock.utc(), self.token_ttl);
        let token = self.tokens.sign(&claims).map_err(|err| {
            error!(error = %err, "access token signing failed");
            Error::internal("access token could not be issued")
        })?;
        info!(user_id = %user.id(), "user logged in");
        Ok(token)
    }
}

impl BearerAuthenticator for AccountService {
    fn authenticate(&self, token: &str) -> Result<AccessClaims, Error> {
        self.tokens.verify(token).map_err(|err| match err {
            AccessTokenError::Expired => Error::unauthorized("access token has expired"),
            AccessTokenError::Invalid { message } => {
                debug!(reason = %message, "rejected access token");
                Error::unauthorized("access token is invalid")
            }
            AccessTokenError::Signing { message } => {
                error!(reason = %message, "unexpected signing error during verification");
                Error::internal("access token could not be verified")
            }
        })
    }
}
