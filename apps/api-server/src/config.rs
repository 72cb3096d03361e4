//! Application configuration loaded from environment variables.

use std::env;

use userhub_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Mount point of the user routes, e.g. `/api/v1`.
    pub api_prefix: String,
    pub environment: String,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_prefix: normalize_prefix(
                &env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
            ),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            database,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Leading slash, no trailing slash; `/` and empty mean "mount at root".
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
