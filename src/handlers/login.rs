use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{LoginRequest, LoginResponse};
use crate::security::password::verify_password;
use crate::validation::json::JsonBody;
use anyhow::{anyhow, Context};
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Exchange email and password for a bearer token
///
/// POST /login
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[instrument(skip(state, payload))]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(account) = state.accounts.find_by_email(&payload.email) else {
        warn!("Login attempt for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let password = payload.password;
    let stored_hash = account.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .context("Password verification task failed")?
        .map_err(|e| anyhow!("Stored password hash is unreadable: {}", e))?;

    if !verified {
        warn!(account_id = %account.id, "Login attempt with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(&account.id)
        .context("Failed to issue token")?;

    info!(
        account_id = %account.id,
        expires_in = state.tokens.ttl_seconds(),
        "Token issued"
    );

    Ok(Json(LoginResponse { token }))
}
