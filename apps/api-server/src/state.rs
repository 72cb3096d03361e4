//! Application state - shared across all handlers.

use std::sync::Arc;

use userhub_core::UserService;
use userhub_core::ports::{PasswordService, PostRepository, UserRepository};
use userhub_infra::{Argon2PasswordService, InMemoryStore};

#[cfg(feature = "postgres")]
use sea_orm::DbConn;
#[cfg(feature = "postgres")]
use userhub_infra::database::connect;
#[cfg(feature = "postgres")]
use userhub_infra::{PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub environment: String,
    #[cfg(feature = "postgres")]
    pub db: Option<DbConn>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match connect(db_config).await {
                    Ok(db) => {
                        let users: Arc<dyn UserRepository> =
                            Arc::new(PostgresUserRepository::new(db.clone()));
                        let posts: Arc<dyn PostRepository> =
                            Arc::new(PostgresPostRepository::new(db.clone()));

                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            users: UserService::new(users, posts, passwords),
                            environment: config.environment.clone(),
                            db: Some(db),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::warn!("Running without postgres feature - using in-memory store");

        Self::in_memory(
            Arc::new(InMemoryStore::new()),
            passwords,
            config.environment.clone(),
        )
    }

    /// State over an in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        passwords: Arc<dyn PasswordService>,
        environment: String,
    ) -> Self {
        let users: Arc<dyn UserRepository> = store.clone();
        let posts: Arc<dyn PostRepository> = store;

        Self {
            users: UserService::new(users, posts, passwords),
            environment,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Storage status reported by `/health`.
    pub async fn database_status(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            return match db.ping().await {
                Ok(()) => "connected",
                Err(e) => {
                    tracing::warn!("Database ping failed: {}", e);
                    "disconnected"
                }
            };
        }

        "in-memory"
    }
}
