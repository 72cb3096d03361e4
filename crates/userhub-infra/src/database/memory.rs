//! In-memory store - used as fallback when no database is configured.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_core::domain::{Post, User, UserChanges};
use userhub_core::error::RepoError;
use userhub_core::ports::{PostRepository, UserRepository};

/// In-memory users and posts behind async RwLocks.
///
/// Mirrors the database behaviour the service relies on: unique emails,
/// newest-first ordering and `updated_at` maintenance.
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    // insertion order
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Add a post. Posts have no write path in the API, so this is how they
    /// get in.
    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }

    fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
        users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_page(&self, page: u64, limit: u64) -> Result<(Vec<User>, u64), RepoError> {
        let users = self.users.read().await;

        // Newest first; equal timestamps fall back to reverse insertion order.
        let mut sorted: Vec<&User> = users.iter().rev().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = page.saturating_sub(1).saturating_mul(limit);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let items = sorted
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((items, users.len() as u64))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        if Self::email_taken(&users, &user.email, None) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, RepoError> {
        let mut users = self.users.write().await;

        if let Some(email) = &changes.email {
            if Self::email_taken(&users, email, Some(id)) {
                return Err(RepoError::Constraint("users_email_key".to_string()));
            }
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        changes.apply_to(user);
        // Always move forward, even when the clock has not ticked.
        let now = Utc::now();
        user.updated_at = if now > user.updated_at {
            now
        } else {
            user.updated_at + TimeDelta::microseconds(1)
        };

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut owned: Vec<Post> = posts
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned)
    }
}
