use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use validator::Validate;

use super::types::{
    CashRegisterRequest, CashRegisterResponse, DeclareRequest, DeclareResponse, VerifyResponse,
};
use crate::auth::CallerIdentity;
use crate::error::{ApiError, ErrorBody};
use crate::gateway::state::AppState;

/// Declare a transfer (sender)
///
/// POST /savings/declare
#[utoipa::path(
    post,
    path = "/savings/declare",
    request_body = DeclareRequest,
    responses(
        (status = 201, description = "Transfer declared", body = DeclareResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Sender role required", body = ErrorBody),
        (status = 412, description = "No custodian provisioned", body = ErrorBody)
    ),
    security(("bearer_jwt" = [])),
    tag = "Savings"
)]
pub async fn declare(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<DeclareRequest>,
) -> Result<(StatusCode, Json<DeclareResponse>), ApiError> {
    req.validate()?;

    let outcome = state.transfers.declare(&caller, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(DeclareResponse {
            success: true,
            message: "Transfer declared successfully. Pending registration by the custodian."
                .to_string(),
            transfer_id: outcome.transfer_id.to_string(),
            custodian_id: outcome.custodian_id,
        }),
    ))
}

/// Register counted cash bills (custodian)
///
/// POST /savings/cash-register
#[utoipa::path(
    post,
    path = "/savings/cash-register",
    request_body = CashRegisterRequest,
    responses(
        (status = 200, description = "Cash registered", body = CashRegisterResponse),
        (status = 400, description = "Validation error or amount mismatch", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Not the assigned custodian", body = ErrorBody),
        (status = 404, description = "Transfer not found", body = ErrorBody),
        (status = 409, description = "Stale state or duplicate serial code", body = ErrorBody)
    ),
    security(("bearer_jwt" = [])),
    tag = "Savings"
)]
pub async fn cash_register(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<CashRegisterRequest>,
) -> Result<(StatusCode, Json<CashRegisterResponse>), ApiError> {
    req.validate()?;

    let outcome = state.transfers.register_cash(&caller, req).await?;
    Ok((
        StatusCode::OK,
        Json(CashRegisterResponse {
            success: true,
            message: "Cash registered successfully".to_string(),
            transfer_id: outcome.transfer_id.to_string(),
            registered_count: outcome.registered_count,
        }),
    ))
}

/// Confirm a cash-registered transfer (sender)
///
/// PATCH /savings/transfer/{transfer_id}/verify
#[utoipa::path(
    patch,
    path = "/savings/transfer/{transfer_id}/verify",
    params(("transfer_id" = String, Path, description = "Transfer to confirm")),
    responses(
        (status = 200, description = "Transfer completed", body = VerifyResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Not the sender of this transfer", body = ErrorBody),
        (status = 404, description = "Transfer not found", body = ErrorBody),
        (status = 409, description = "Transfer is not cash-registered", body = ErrorBody)
    ),
    security(("bearer_jwt" = [])),
    tag = "Savings"
)]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(transfer_id): Path<String>,
) -> Result<(StatusCode, Json<VerifyResponse>), ApiError> {
    let transfer_id = state.transfers.verify(&caller, &transfer_id).await?;
    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            success: true,
            message: "Transfer confirmed and completed".to_string(),
            transfer_id: transfer_id.to_string(),
        }),
    ))
}
