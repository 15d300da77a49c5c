use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::user::{Role, User};

/// Request body for dummy login
#[derive(Debug, Deserialize)]
pub struct DummyLoginRequest {
    pub role: String,
}

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issue a token for a role without a user record
///
/// POST /dummyLogin
pub async fn dummy_login(
    State(state): State<AppState>,
    payload: Result<Json<DummyLoginRequest>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(req) = payload?;
    let role: Role = req.role.parse()?;

    let token = state.auth.dummy_login(role).await?;
    Ok(Json(token))
}

/// Register a new user
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(req) = payload?;

    let user = state
        .auth
        .register(&req.email, &req.password, &req.role)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(req) = payload?;

    let token = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(token))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
