//! Credential handlers.
//!
//! Request types carry plaintext and deliberately do not derive `Debug`.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Hash request
#[derive(Deserialize, Validate, ToSchema)]
pub struct HashRequest {
    /// Plaintext password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[schema(example = "SecurePass123!", format = Password)]
    pub password: String,
}

/// Hash response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HashResponse {
    /// Self-describing PHC hash string
    #[schema(example = "$argon2id$v=19$m=19456,t=2,p=1$...")]
    pub hash: String,
}

/// Verify request
#[derive(Deserialize, Validate, ToSchema)]
pub struct VerifyRequest {
    /// Plaintext candidate
    #[schema(example = "SecurePass123!", format = Password)]
    pub password: String,
    /// Stored hash to check against
    pub hash: String,
}

/// Verify response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    /// Whether the candidate matches
    pub valid: bool,
    /// Set when a valid hash was produced under an older work factor
    pub needs_rehash: bool,
}

/// Create credential routes
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/hash", post(hash_credential))
        .route("/verify", post(verify_credential))
}

/// Hash a plaintext credential
#[utoipa::path(
    post,
    path = "/credentials/hash",
    tag = "Credentials",
    request_body = HashRequest,
    responses(
        (status = 201, description = "Credential hashed", body = HashResponse),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Hashing primitive unavailable")
    )
)]
pub async fn hash_credential(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<HashRequest>,
) -> AppResult<(StatusCode, Json<HashResponse>)> {
    let hash = state
        .credentials
        .hash(SecretString::from(payload.password))
        .await?;

    Ok((StatusCode::CREATED, Json(HashResponse { hash })))
}

/// Verify a plaintext credential against a stored hash
#[utoipa::path(
    post,
    path = "/credentials/verify",
    tag = "Credentials",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyResponse),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn verify_credential(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyRequest>,
) -> Json<VerifyResponse> {
    let VerifyRequest { password, hash } = payload;
    let needs_rehash = state.credentials.needs_rehash(&hash);
    let valid = state
        .credentials
        .verify(SecretString::from(password), hash)
        .await;

    Json(VerifyResponse {
        valid,
        needs_rehash: valid && needs_rehash,
    })
}
