//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use userhub_core::domain::{Post, User, UserChanges};
use userhub_core::error::RepoError;
use userhub_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email for logging to avoid PII in logs: `alice@x.io` -> `a***@x.io`.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_page(&self, page: u64, limit: u64) -> Result<(Vec<User>, u64), RepoError> {
        // LIMIT is a bigint on the server
        let limit = limit.min(i64::MAX as u64);
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, limit);

        let total = paginator.num_items().await.map_err(map_db_err)?;

        // SeaORM pages are zero-based and it multiplies page by limit unchecked
        let page_index = page.saturating_sub(1);
        let in_range = page_index
            .checked_mul(limit)
            .is_some_and(|offset| offset < total);
        if !in_range {
            return Ok((Vec::new(), total));
        }

        let models = paginator
            .fetch_page(page_index)
            .await
            .map_err(map_db_err)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        tracing::debug!(user_email = %mask_email(&user.email), "Inserting user");

        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, RepoError> {
        let Some(model) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
