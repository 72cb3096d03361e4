use std::collections::BTreeMap;

use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use userhub_core::domain::{User, UserChanges};
use userhub_core::ports::{PostRepository, UserRepository};

use super::entity::{post, user};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository, mask_email};

fn user_model(id: Uuid, email: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        email: email.to_owned(),
        password_hash: "$argon2id$v=19$stub".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        is_active: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_user_by_id() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user_id, "ada@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = repo.find_by_id(user_id).await.unwrap().unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name, "Ada");
    assert!(user.is_active);
}

fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
}

#[tokio::test]
async fn test_find_page_returns_rows_and_total() {
    let newer = user_model(Uuid::new_v4(), "newer@example.com");
    let older = user_model(Uuid::new_v4(), "older@example.com");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .append_query_results(vec![vec![newer, older]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let (users, total) = repo.find_page(2, 2).await.unwrap();

    assert_eq!(total, 7);
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["newer@example.com", "older@example.com"]);
}

#[tokio::test]
async fn test_find_page_past_the_end_skips_the_fetch() {
    // Only the count query is mocked; a page query would fail the test
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let (users, total) = repo.find_page(5, 2).await.unwrap();

    assert!(users.is_empty());
    assert_eq!(total, 7);
}

#[tokio::test]
async fn test_find_page_with_overflowing_offset_is_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let (users, total) = repo.find_page(u64::MAX / 5, 10).await.unwrap();

    assert!(users.is_empty());
    assert_eq!(total, 7);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(7)]])
        .into_connection();
    let repo = PostgresUserRepository::new(db);
    let (users, _) = repo.find_page(u64::MAX, u64::MAX).await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_find_user_by_id_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let user = User::new(
        "ada@example.com".to_owned(),
        "$argon2id$v=19$stub".to_owned(),
        "Ada".to_owned(),
        "Lovelace".to_owned(),
    );

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user.id, "ada@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let saved = repo.insert(user.clone()).await.unwrap();

    assert_eq!(saved.id, user.id);
    assert_eq!(saved.email, user.email);
}

#[tokio::test]
async fn test_update_missing_user_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let changes = UserChanges {
        first_name: Some("Grace".to_owned()),
        ..Default::default()
    };

    assert!(repo.update(Uuid::new_v4(), changes).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_returns_changed_row() {
    let user_id = Uuid::new_v4();
    let before = user_model(user_id, "ada@example.com");
    let mut after = before.clone();
    after.first_name = "Grace".to_owned();
    after.updated_at = (Utc::now() + TimeDelta::seconds(1)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![before]])
        .append_query_results(vec![vec![after]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let changes = UserChanges {
        first_name: Some("Grace".to_owned()),
        ..Default::default()
    };
    let updated = repo.update(user_id, changes).await.unwrap().unwrap();

    assert_eq!(updated.first_name, "Grace");
    assert_eq!(updated.last_name, "Lovelace");
}

#[tokio::test]
async fn test_delete_reports_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let id = Uuid::new_v4();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
}

#[tokio::test]
async fn test_find_posts_by_user_id() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: Uuid::new_v4(),
            user_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.find_by_user_id(user_id).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Test Post");
    assert_eq!(posts[0].user_id, user_id);
}

#[test]
fn test_mask_email() {
    assert_eq!(mask_email("alice@example.com"), "a***@example.com");
    assert_eq!(mask_email("a@example.com"), "***@example.com");
    assert_eq!(mask_email("no-at-sign"), "***");
}
