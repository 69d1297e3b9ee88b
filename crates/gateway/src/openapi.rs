//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::billing_handler::FormatResponse;
use crate::handlers::credential_handler::{HashRequest, HashResponse, VerifyRequest, VerifyResponse};
use crate::handlers::health_handler::{ComponentHealthResponse, HealthResponse, WorkerPoolHealth};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::health_handler::component_health,
        crate::handlers::credential_handler::hash_credential,
        crate::handlers::credential_handler::verify_credential,
        crate::handlers::billing_handler::format_amount,
    ),
    components(
        schemas(
            HealthResponse,
            WorkerPoolHealth,
            ComponentHealthResponse,
            HashRequest,
            HashResponse,
            VerifyRequest,
            VerifyResponse,
            FormatResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and component status"),
        (name = "Credentials", description = "Password hashing and verification"),
        (name = "Billing", description = "Locale-aware amount formatting"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/health/{component}",
            "/credentials/hash",
            "/credentials/verify",
            "/billing/{currency}/{minor}/format",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
