//! User operations: reads, paginated listing, and hashed writes.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    NewUser, Post, PublicUser, User, UserChanges, UserPage, UserUpdate, UserWithPosts,
};
use crate::error::DomainError;
use crate::ports::{PasswordService, PostRepository, UserRepository};

/// Data-access operations for users and their posts.
///
/// Every value returned to callers outside the crate boundary is a
/// [`PublicUser`] (or contains one); only [`UserService::find_by_email`]
/// hands out the stored entity.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            posts,
            passwords,
        }
    }

    /// Find a user with its posts eagerly loaded.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserWithPosts>, DomainError> {
        let Some(user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };
        let posts = self.posts.find_by_user_id(id).await?;

        Ok(Some(UserWithPosts {
            user: user.into(),
            posts,
        }))
    }

    /// List users newest first. `page` and `limit` below 1 are raised to 1.
    pub async fn find_all(&self, page: u64, limit: u64) -> Result<UserPage, DomainError> {
        let page = page.max(1);
        let limit = limit.max(1);

        let (users, total) = self.users.find_page(page, limit).await?;

        Ok(UserPage {
            users: users.into_iter().map(Into::into).collect(),
            total,
            page,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Look up the stored entity, password hash included.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_email(email).await?)
    }

    /// Hash the password and persist a new user.
    pub async fn create(&self, new_user: NewUser) -> Result<PublicUser, DomainError> {
        let password_hash = self.passwords.hash(&new_user.password).await?;

        let user = User::new(
            new_user.email,
            password_hash,
            new_user.first_name,
            new_user.last_name,
        );
        let saved = self.users.insert(user).await?;

        tracing::info!(user_id = %saved.id, "User created");
        Ok(saved.into())
    }

    /// Merge a partial update, re-hashing only when a new password is given.
    pub async fn update(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<PublicUser>, DomainError> {
        let password_hash = match update.password {
            Some(password) => Some(self.passwords.hash(&password).await?),
            None => None,
        };

        let changes = UserChanges {
            email: update.email,
            password_hash,
            first_name: update.first_name,
            last_name: update.last_name,
            is_active: update.is_active,
        };

        let updated = self.users.update(id, changes).await?;
        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated");
        }
        Ok(updated.map(Into::into))
    }

    /// Hard delete. Posts owned by the user are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self.users.delete(id).await?;
        if removed {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(removed)
    }

    /// Posts for a user, newest first. An unknown user yields an empty list.
    pub async fn find_user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_user_id(user_id).await?)
    }

    /// Check a candidate password against a stored hash.
    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(self.passwords.verify(password, hash).await?)
    }
}
