use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User, UserChanges};
use crate::error::RepoError;

/// User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Fetch one page (1-based) of users, newest first, together with the
    /// total number of users.
    async fn find_page(&self, page: u64, limit: u64) -> Result<(Vec<User>, u64), RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A duplicate email yields `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Apply changes to an existing user and bump `updated_at`.
    /// Returns `None` when no user has the given ID.
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, RepoError>;

    /// Delete a user. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts owned by a user, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
