//! API Gateway Library
//!
//! HTTP shell of the lab application: exposes the credential boundary and
//! health endpoints, and routes parameterised requests through the route
//! context adapter.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::SecretString;
use tower_http::trace::TraceLayer;
use tracing::info;

use credential_service_lib::{CredentialService, CredentialVerifier};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create credential verifier
    let verifier = CredentialVerifier::from_config(&config.credentials)?;
    let work_factor = verifier.hasher().work_factor();
    info!(
        memory_kib = work_factor.memory_kib,
        iterations = work_factor.iterations,
        parallelism = work_factor.parallelism,
        max_concurrent = config.credentials.max_concurrent,
        "Credential verifier ready"
    );

    // Create app state
    let addr: SocketAddr = config.service.bind_addr().parse()?;
    let state = AppState::new(Arc::new(verifier), config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Hash one plaintext credential with the configured work factor.
pub async fn hash_once(
    config: &GatewayConfig,
    plaintext: SecretString,
) -> Result<String, Box<dyn std::error::Error>> {
    let verifier = CredentialVerifier::from_config(&config.credentials)?;
    Ok(verifier.hash(plaintext).await?)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
