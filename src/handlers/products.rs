// Product handlers
// Submissions go through `ProductForm`; responses through `ProductSerializer`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json,
};
use serde_json::Value;
use tracing::info;

use super::AppState;
use crate::{
    error::ApiError,
    forms::{ModelForm, ProductForm},
    routers::ViewSet,
    serializers::ProductSerializer,
};

pub fn viewset() -> ViewSet<AppState> {
    ViewSet::new(
        get(list_products).post(create_product),
        get(retrieve_product)
            .put(update_product)
            .patch(partial_update_product)
            .delete(destroy_product),
    )
}

/// POST /api/
/// Entry point the bundled client talks to: validate, save, echo back.
pub async fn api_home(state: State<AppState>, body: Json<Value>) -> Result<impl IntoResponse, ApiError> {
    create_product(state, body).await
}

/// POST /api/products/
pub async fn create_product(
    State(db): State<AppState>,
    Json(data): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let form = ProductForm::bind(&data)?;

    let product = db.create_product(form.into_product()).await?;

    info!("Successfully created product with id: {:?}", product.id);
    Ok((StatusCode::CREATED, Json(ProductSerializer::to_representation(&product))))
}

/// GET /api/products/
pub async fn list_products(State(db): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = db.get_all_products().await?;

    info!("Retrieved {} products", products.len());
    Ok(Json(ProductSerializer::many(&products)))
}

/// GET /api/products/:pk/
pub async fn retrieve_product(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = db.get_product_by_id(pk).await?;
    Ok(Json(ProductSerializer::to_representation(&product)))
}

/// PUT /api/products/:pk/
pub async fn update_product(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(data): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let form = ProductForm::bind(&data)?;

    let product = db.update_product(pk, form.into_product().into()).await?;
    Ok(Json(ProductSerializer::to_representation(&product)))
}

/// PATCH /api/products/:pk/
pub async fn partial_update_product(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
    Json(data): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let form = ProductForm::bind_partial(&data)?;

    let product = db.update_product(pk, form.into_changes()).await?;
    Ok(Json(ProductSerializer::to_representation(&product)))
}

/// DELETE /api/products/:pk/
pub async fn destroy_product(
    State(db): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    db.delete_product(pk).await?;

    info!("Deleted product with id: {}", pk);
    Ok(StatusCode::NO_CONTENT)
}
