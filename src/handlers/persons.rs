// Person handlers
// The `person` viewset, published through `person_router`

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
    models::person::{CreatePersonRequest, UpdatePersonRequest},
    routers::{SimpleRouter, ViewSet},
};

pub fn viewset() -> ViewSet<AppState> {
    ViewSet::new(
        get(list_persons).post(create_person),
        get(retrieve_person)
            .put(update_person)
            .patch(partial_update_person)
            .delete(destroy_person),
    )
}

/// Router owned by the polling app; the global router merges its registry.
pub fn person_router() -> SimpleRouter<AppState> {
    let mut router = SimpleRouter::new();
    router.register("person", viewset(), "person");
    router
}

pub async fn create_person(
    State(db): State<AppState>,
    Json(request): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating person: {} {}", request.first_name, request.last_name);

    let person = db.create_person(request).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn list_persons(State(db): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let persons = db.get_all_persons().await?;
    Ok(Json(persons))
}

pub async fn retrieve_person(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let person = db.get_person_by_id(pk).await?;
    Ok(Json(person))
}

pub async fn update_person(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(request): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person = db.update_person(pk, UpdatePersonRequest::from(request)).await?;
    Ok(Json(person))
}

pub async fn partial_update_person(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(request): Json<UpdatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let person = db.update_person(pk, request).await?;
    Ok(Json(person))
}

pub async fn destroy_person(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    db.delete_person(pk).await?;

    info!("Deleted person with id: {}", pk);
    Ok(StatusCode::NO_CONTENT)
}
