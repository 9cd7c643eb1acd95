use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use validator::Validate;

use super::service::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::{ApiError, ErrorBody};
use crate::gateway::state::AppState;

/// Login
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    req.validate()?;

    let resp = state.auth.login(req).await?;
    Ok((StatusCode::OK, Json(resp)))
}

/// Register a new user (admin only)
///
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    ),
    security(("bearer_jwt" = [])),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()?;

    let resp = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
