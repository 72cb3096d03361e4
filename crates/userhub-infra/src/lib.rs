//! # Userhub Infrastructure
//!
//! Concrete implementations of the ports defined in `userhub-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - in-memory store only

pub mod auth;
pub mod database;

pub use auth::Argon2PasswordService;
pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
