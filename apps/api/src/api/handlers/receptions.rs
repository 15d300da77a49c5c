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
use crate::domain::reception::Reception;

/// Request body for opening a reception
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pub pvz_id: Uuid,
}

/// Open a reception at a PVZ
///
/// POST /receptions
pub async fn create_reception(
    _auth: Authorized<EmployeeOnly>,
    State(state): State<AppState>,
    payload: Result<Json<CreateReceptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Reception>), ApiError> {
    let Json(req) = payload?;

    let reception = state.receptions.open_reception(req.pvz_id).await?;
    state.metrics.reception_created();
    Ok((StatusCode::CREATED, Json(reception)))
}

/// Close the open reception of a PVZ
///
/// POST /pvz/:pvz_id/close_last_reception
pub async fn close_last_reception(
    _auth: Authorized<EmployeeOnly>,
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Reception>, ApiError> {
    let Path(pvz_id) = path?;
    let reception = state.receptions.close_last_reception(pvz_id).await?;
    Ok(Json(reception))
}
