//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// What a Diesel failure means to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DieselFailure {
    /// The connection dropped mid-query.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Anything else.
    Query(String),
}

/// Classify a Diesel error, logging the raw cause at debug level.
pub fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                },
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error".to_owned())
                }
                _ => DieselFailure::Query("database error".to_owned()),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::DeserializationError(err) => {
            debug!(error = %err, %operation, "row could not be deserialised");
            DieselFailure::Query(format!("row could not be deserialised: {err}"))
        }
        other => {
            debug!(error = %other, %operation, "diesel operation failed");
            DieselFailure::Query("database query error".to_owned())
        }
    }
}

impl DieselFailure {
    /// Collapse into a message, for ports without a uniqueness variant.
    pub fn into_message(self) -> String {
        match self {
            Self::Connection(message) | Self::Query(message) => message,
            Self::UniqueViolation { constraint } => format!(
                "unique constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            ),
        }
    }
}
