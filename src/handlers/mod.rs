// Handlers module
// HTTP handlers for the REST API, grouped into one viewset per resource

pub mod persons;
pub mod polls;
pub mod products;
pub mod users;

use axum::{http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::db::Database;

/// Shared state handed to every handler.
pub type AppState = Arc<Database>;

/// Liveness probe; does not touch the database.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
