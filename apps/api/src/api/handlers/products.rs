use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{Authorized, EmployeeOnly};
use crate::api::state::AppState;
use crate::domain::product::Product;

/// Request body for adding a product
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(rename = "type")]
    pub product_type: String,
    pub pvz_id: Uuid,
}

/// Add a product to the open reception of a PVZ
///
/// POST /products
pub async fn create_product(
    _auth: Authorized<EmployeeOnly>,
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(req) = payload?;

    let product = state
        .products
        .add_product(req.pvz_id, &req.product_type)
        .await?;
    state.metrics.product_added();
    Ok((StatusCode::CREATED, Json(product)))
}

/// Remove the most recently added product of the last reception
///
/// POST /pvz/:pvz_id/delete_last_product
pub async fn delete_last_product(
    _auth: Authorized<EmployeeOnly>,
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(pvz_id) = path?;
    state.products.delete_last_product(pvz_id).await?;
    Ok(StatusCode::OK)
}
