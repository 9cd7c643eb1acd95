//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:3001/docs`
//! - OpenAPI JSON: `http://localhost:3001/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::service::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::ErrorBody;
use crate::gateway::HealthResponse;
use crate::transfer::types::{
    CashBillDto, CashRegisterRequest, CashRegisterResponse, DeclareRequest, DeclareResponse,
    VerifyResponse,
};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT issued by POST /auth/login. Payload carries \
                             user id, email and role; expires after 24 hours.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Custodia API",
        version = "1.0.0",
        description = "Cash custody and transfer reconciliation API: senders declare \
                       transfers, the custodian registers physically counted bills, \
                       senders confirm the count.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "Development"),
    ),
    paths(
        crate::gateway::health_check,
        crate::auth::handlers::login,
        crate::auth::handlers::register,
        crate::transfer::handlers::declare,
        crate::transfer::handlers::cash_register,
        crate::transfer::handlers::verify,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            RegisterResponse,
            DeclareRequest,
            DeclareResponse,
            CashBillDto,
            CashRegisterRequest,
            CashRegisterResponse,
            VerifyResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and admin-managed registration"),
        (name = "Savings", description = "Transfer declaration, cash registration and confirmation"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Custodia API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Custodia API"));
    }

    #[test]
    fn test_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/health"));
        assert!(paths.paths.contains_key("/auth/login"));
        assert!(paths.paths.contains_key("/auth/register"));
        assert!(paths.paths.contains_key("/savings/declare"));
        assert!(paths.paths.contains_key("/savings/cash-register"));
        assert!(
            paths
                .paths
                .contains_key("/savings/transfer/{transfer_id}/verify")
        );
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_jwt"));
    }
}
