//! HTTP boundary: routing, health check and server startup

pub mod openapi;
pub mod state;

use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::{jwt_auth_middleware, require_admin};
use crate::error::{ApiError, ErrorBody};
use state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub build: &'static str,
}

/// Health check
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = ErrorBody)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.db.health_check().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        build: env!("GIT_HASH"),
    }))
}

/// Assemble the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public: login only
    let auth_routes = Router::new().route("/login", post(crate::auth::handlers::login));

    // Admin-gated: registration. Layers run outermost-last, so the JWT
    // middleware authenticates before require_admin authorizes.
    let admin_routes = Router::new()
        .route("/register", post(crate::auth::handlers::register))
        .layer(from_fn_with_state(state.clone(), require_admin))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // Workflow routes: any authenticated caller reaches the handler; role
    // and ownership guards live in the workflow engine.
    let savings_routes = Router::new()
        .route("/declare", post(crate::transfer::handlers::declare))
        .route(
            "/cash-register",
            post(crate::transfer::handlers::cash_register),
        )
        .route(
            "/transfer/{transfer_id}/verify",
            patch(crate::transfer::handlers::verify),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes.merge(admin_routes))
        .nest("/savings", savings_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Bind and serve until the process is stopped
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
