//! User handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use userhub_core::validation::{CreateUserInput, UpdateUserInput};
use userhub_shared::{ApiResponse, PageQuery};

use super::body::json_body;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// GET /users?page=&limit=
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.users.find_all(query.page(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(user_not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// POST /users
pub async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let new_user = CreateUserInput::parse(&json_body(&req, &body)?)?;
    let user = state.users.create(new_user).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        user,
        "User created successfully",
    )))
}

/// PUT /users/{id}
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let update = UpdateUserInput::parse(&json_body(&req, &body)?)?;
    let user = state
        .users
        .update(path.into_inner(), update)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        user,
        "User updated successfully",
    )))
}

/// DELETE /users/{id}
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !state.users.delete(path.into_inner()).await? {
        return Err(user_not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted successfully")))
}

/// GET /users/{id}/posts
pub async fn get_user_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let posts = state.users.find_user_posts(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}
