//! PostgreSQL-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordDigest, Role, User, UserId, Username};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    email: &Email,
) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => {
            UserPersistenceError::duplicate_email(email.as_ref())
        }
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

/// Rebuild a domain user, treating invalid stored values as query failures.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err: &dyn std::fmt::Display| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let username = Username::new(&row.username).map_err(|err| invalid(&err))?;
    let email = Email::new(&row.email).map_err(|err| invalid(&err))?;
    let role = row.role.parse::<Role>().map_err(|err| invalid(&err))?;
    Ok(User::new(
        UserId::from(row.id),
        username,
        email,
        role,
        PasswordDigest::new(row.password_hash.as_str()),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            role: user.role().as_str(),
            password_hash: user.password().as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert user", user.email()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email", email))?;
        row.map(row_to_user).transpose()
    }
}
