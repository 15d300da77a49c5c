use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::{AnyStaff, Authorized, ModeratorOnly};
use crate::api::state::AppState;
use crate::domain::pvz::listing::DEFAULT_PAGE_LIMIT;
use crate::domain::pvz::{DateWindow, ExtendedPvz, PageRequest, Pvz};

/// Request body for registering a PVZ
///
/// Client-supplied `id` and `registrationDate` are ignored.
#[derive(Debug, Deserialize)]
pub struct CreatePvzRequest {
    pub city: String,
}

/// Query parameters of the listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPvzParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPvzParams {
    fn into_listing(self) -> Result<(Option<DateWindow>, PageRequest), ApiError> {
        let window = DateWindow::from_bounds(self.start_date, self.end_date)
            .map_err(ApiError::bad_request)?;
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
        .map_err(ApiError::bad_request)?;

        Ok((window, page))
    }
}

/// Register a PVZ
///
/// POST /pvz
pub async fn create_pvz(
    _auth: Authorized<ModeratorOnly>,
    State(state): State<AppState>,
    payload: Result<Json<CreatePvzRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pvz>), ApiError> {
    let Json(req) = payload?;

    let pvz = state.pvz.add_pvz(&req.city).await?;
    state.metrics.pvz_created();
    Ok((StatusCode::CREATED, Json(pvz)))
}

/// List PVZs with their receptions and products
///
/// GET /pvz?startDate=&endDate=&page=&limit=
pub async fn list_pvz(
    _auth: Authorized<AnyStaff>,
    State(state): State<AppState>,
    params: Result<Query<ListPvzParams>, QueryRejection>,
) -> Result<Json<Vec<ExtendedPvz>>, ApiError> {
    let Query(params) = params?;
    let (window, page) = params.into_listing()?;

    let listing = state.pvz.list_pvz(window, page).await?;
    Ok(Json(listing))
}
