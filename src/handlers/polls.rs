use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json,
};
use tracing::info;

use super::AppState;
use crate::{error::ApiError, models::poll::PollDataRequest, routers::ViewSet};

pub fn viewset() -> ViewSet<AppState> {
    ViewSet::new(
        get(list_polls).post(create_poll),
        get(retrieve_poll)
            .put(update_poll)
            .patch(update_poll)
            .delete(destroy_poll),
    )
}

pub async fn create_poll(
    State(db): State<AppState>,
    Json(request): Json<PollDataRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let poll = db.create_poll(request).await?;

    info!("Successfully created poll with id: {}", poll.id);
    Ok((StatusCode::CREATED, Json(poll)))
}

pub async fn list_polls(State(db): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let polls = db.get_all_polls().await?;
    Ok(Json(polls))
}

pub async fn retrieve_poll(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let poll = db.get_poll_by_id(pk).await?;
    Ok(Json(poll))
}

pub async fn update_poll(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(request): Json<PollDataRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let poll = db.update_poll(pk, request).await?;
    Ok(Json(poll))
}

pub async fn destroy_poll(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    db.delete_poll(pk).await?;
    Ok(StatusCode::NO_CONTENT)
}
