//! Password hashing port.

use async_trait::async_trait;

/// Password hashing service.
///
/// Async because a memory-hard hash takes long enough to stall an executor
/// thread; implementations move the work off the request path.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Verify a password against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Password hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Hashing task failed: {0}")]
    Task(String),
}
