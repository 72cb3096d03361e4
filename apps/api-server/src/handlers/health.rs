//! Health check and welcome endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub database: &'static str,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        success: true,
        message: "API is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.environment.clone(),
        database: state.database_status().await,
    };

    HttpResponse::Ok().json(response)
}

/// GET /
pub async fn index(prefix: web::Data<ApiPrefix>) -> HttpResponse {
    let users = format!("{}/users", prefix.0);

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the Userhub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "users": {
                "list": format!("GET {users}?page=1&limit=10"),
                "get": format!("GET {users}/:id"),
                "create": format!("POST {users}"),
                "update": format!("PUT {users}/:id"),
                "delete": format!("DELETE {users}/:id"),
                "posts": format!("GET {users}/:id/posts"),
            },
        },
    }))
}

/// Mount point of the user routes, shared with the welcome document.
#[derive(Debug, Clone)]
pub struct ApiPrefix(pub String);
