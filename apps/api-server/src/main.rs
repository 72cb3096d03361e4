//! # Userhub API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    telemetry::init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Userhub API Server on {}:{} ({})",
        config.host,
        config.port,
        config.environment
    );

    // Build application state
    let state = AppState::new(&config).await;

    if config.is_development() {
        log_endpoints(&config.api_prefix);
    }

    // Start HTTP server
    let api_prefix = config.api_prefix.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, &api_prefix))
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn log_endpoints(api_prefix: &str) {
    let users = format!("{api_prefix}/users");
    tracing::debug!("GET    /health");
    tracing::debug!("GET    {users}");
    tracing::debug!("POST   {users}");
    tracing::debug!("GET    {users}/:id");
    tracing::debug!("PUT    {users}/:id");
    tracing::debug!("DELETE {users}/:id");
    tracing::debug!("GET    {users}/:id/posts");
}
