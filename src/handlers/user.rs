use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::account::AccountView;
use crate::security::extractor::AuthenticatedAccount;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::warn;

/// Profile of the token holder
///
/// GET /user
pub async fn user_handler(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedAccount,
) -> Result<Json<AccountView>, ApiError> {
    let account = state.accounts.get(&caller.id).ok_or_else(|| {
        warn!(account_id = %caller.id, "Valid token for an account that does not exist");
        ApiError::AccountNotFound
    })?;

    Ok(Json(AccountView::from(&account)))
}
