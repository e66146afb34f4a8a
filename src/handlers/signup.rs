use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::lending::policy::{assess_application, Assessment};
use crate::models::account::{Account, AccountStatus, AccountView};
use crate::models::api::{SignupRequest, SignupResponse};
use crate::security::password::hash_password;
use crate::utils::id::new_account_id;
use crate::utils::time::today;
use crate::validation::json::JsonBody;
use crate::wal::wal::WalOperation;
use anyhow::{anyhow, Context};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Register and assess a new applicant
///
/// POST /signup
///
/// # Flow
/// 1. Parse date of birth and salary
/// 2. Apply the age and salary thresholds; reject without storing anything
/// 3. Hash the password
/// 4. Log the new account to the WAL, then add it to the store
#[instrument(skip(state, payload))]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<Response, ApiError> {
    let signup = payload.validate().map_err(|e| {
        warn!(error = %e, "Invalid signup request");
        ApiError::InvalidParameter(e.to_string())
    })?;

    let purchase_power = match assess_application(
        &state.config.lending,
        signup.dob,
        signup.monthly_salary,
        today(),
    ) {
        Assessment::Approved { purchase_power } => purchase_power,
        Assessment::Rejected(reason) => {
            info!(reason = ?reason, "Application rejected");
            return Err(ApiError::ApplicationRejected);
        }
    };

    let password = signup.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")?
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let account = Account {
        id: new_account_id(),
        phone: signup.phone,
        email: signup.email,
        name: signup.name,
        registration_date: Utc::now(),
        dob: signup.dob,
        monthly_salary: signup.monthly_salary,
        status: AccountStatus::Approved,
        password_hash,
        purchase_power,
    };

    state
        .wal
        .log_operation(&WalOperation::CreateAccount {
            account: account.clone(),
        })
        .context("Failed to log new account to WAL")?;

    let view = AccountView::from(&account);
    state.accounts.insert(account);

    info!(
        account_id = %view.id,
        purchase_power = view.purchase_power,
        "Application approved"
    );

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Application approved".to_string(),
            user: view,
        }),
    )
        .into_response())
}
