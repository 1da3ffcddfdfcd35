// User handlers
// HTTP handlers for user management operations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json,
};
use tracing::info;

use super::AppState;
use crate::{
    error::ApiError,
    models::user::{CreateUserRequest, UpdateUserRequest},
    routers::ViewSet,
};

pub fn viewset() -> ViewSet<AppState> {
    ViewSet::new(
        get(list_users).post(create_user),
        get(retrieve_user)
            .put(update_user)
            .patch(partial_update_user)
            .delete(destroy_user),
    )
}

/// POST /api/users/
pub async fn create_user(
    State(db): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating new user with username: {}", request.username);

    let user = db.create_user(request).await?;

    info!("Successfully created user with id: {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/
pub async fn list_users(State(db): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = db.get_all_users().await?;

    info!("Retrieved {} users", users.len());
    Ok(Json(users))
}

/// GET /api/users/:pk/
pub async fn retrieve_user(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = db.get_user_by_id(pk).await?;
    Ok(Json(user))
}

/// PUT /api/users/:pk/
pub async fn update_user(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Replacing user with id: {}", pk);

    let user = db.replace_user(pk, request).await?;
    Ok(Json(user))
}

/// PATCH /api/users/:pk/
pub async fn partial_update_user(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Updating user with id: {}", pk);

    let user = db.update_user(pk, request).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:pk/
pub async fn destroy_user(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    db.delete_user(pk).await?;

    info!("Deleted user with id: {}", pk);
    Ok(StatusCode::NO_CONTENT)
}
