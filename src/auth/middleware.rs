use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::account::{Role, UserId, UserRepository};
use crate::error::ApiError;
use crate::gateway::state::AppState;

/// Authenticated caller, resolved from a verified token and injected into
/// request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

/// Verify the bearer token and resolve the caller identity.
///
/// Fails Unauthorized when the token is missing, malformed, expired or has a
/// bad signature; fails Forbidden when the referenced user no longer exists.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid token format".to_string()))?;

    let claims = state.auth.verify_token(token)?;

    let id: UserId = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;
    let role = Role::from_db(&claims.role)
        .ok_or_else(|| ApiError::Unauthorized("Invalid token role".to_string()))?;

    // The token may outlive the account. A deleted user authenticates but is
    // not allowed through.
    let exists = UserRepository::get_by_id(state.db.pool(), &id).await?;
    if exists.is_none() {
        return Err(ApiError::Forbidden(
            "Access denied: user no longer exists".to_string(),
        ));
    }

    request.extensions_mut().insert(CallerIdentity {
        id,
        email: claims.email,
        role,
    });
    Ok(next.run(request).await)
}

/// Admin gate for user registration. Checks the token role, then re-reads
/// the role from the store so a revoked admin is rejected immediately.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = request
        .extensions()
        .get::<CallerIdentity>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    if caller.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Access denied: admin role required".to_string(),
        ));
    }

    let user = UserRepository::get_by_id(state.db.pool(), &caller.id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Access denied: user no longer exists".to_string()))?;

    if user.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Access denied: admin role has been revoked".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
