//! Domain-level error types.

use thiserror::Error;

use crate::ports::PasswordError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            // email is the only unique column besides the primary key
            RepoError::Constraint(_) => DomainError::Conflict("Email already exists".to_string()),
            RepoError::Connection(msg) => {
                DomainError::Internal(format!("database connection: {msg}"))
            }
            RepoError::Query(msg) => DomainError::Internal(format!("database query: {msg}")),
        }
    }
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
