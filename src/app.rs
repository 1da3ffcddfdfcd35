use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    error::ApiError,
    handlers::{health_check, persons, polls, products, users, AppState},
    middleware::create_middleware_stack,
    routers::{DefaultRouter, RouteInfo},
};

/// Where the REST API is mounted.
pub const API_MOUNT: &str = "/api";

/// The global API router: the polling app's `person_router` merged with the
/// resources registered here, plus the product entry point on the root.
pub fn api_router() -> DefaultRouter<AppState> {
    let mut router = DefaultRouter::new();

    router
        .register("users", users::viewset(), "user")
        .register("polls", polls::viewset(), "polldata")
        .register("products", products::viewset(), "product");

    router.registry.extend(persons::person_router().registry);

    router.root_methods(post(products::api_home));
    router
}

/// Every API route with its name, for introspection and tests.
pub fn route_table() -> Vec<RouteInfo> {
    api_router().routes(API_MOUNT)
}

/// Create the Axum router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api_router().urls(API_MOUNT))
        .fallback(|| async { ApiError::not_found("Route") })
        .with_state(state)
        .layer(create_middleware_stack())
}
