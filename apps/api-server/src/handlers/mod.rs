//! HTTP handlers and route configuration.

mod body;
mod health;
mod users;


use actix_web::{HttpResponse, web};

use userhub_shared::ErrorResponse;

pub use health::ApiPrefix;

use crate::middleware::UuidGuard;
use crate::middleware::error::AppError;

/// Configure all application routes. `api_prefix` is already normalized.
pub fn configure_routes(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    let path_config =
        web::PathConfig::default().error_handler(|_err, _req| AppError::InvalidId.into());

    cfg.app_data(path_config)
        .app_data(web::Data::new(ApiPrefix(api_prefix.to_string())))
        // Public routes
        .route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        // User routes; the id guard sits on the id resources only, so an
        // unknown sub-path is still a plain 404
        .service(
            web::scope(api_prefix).service(
                web::scope("/users")
                    .service(
                        web::resource("")
                            .route(web::get().to(users::list_users))
                            .route(web::post().to(users::create_user))
                            .default_service(web::to(not_found)),
                    )
                    .service(
                        web::resource("/{id}")
                            .wrap(UuidGuard::new("id"))
                            .route(web::get().to(users::get_user))
                            .route(web::put().to(users::update_user))
                            .route(web::delete().to(users::delete_user))
                            .default_service(web::to(not_found)),
                    )
                    .service(
                        web::resource("/{id}/posts")
                            .wrap(UuidGuard::new("id"))
                            .route(web::get().to(users::get_user_posts))
                            .default_service(web::to(not_found)),
                    ),
            ),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found("Route not found"))
}
