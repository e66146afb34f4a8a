use crate::core::error::{ApiError, StoreError};
use crate::core::state::AppState;
use crate::lending::policy::monthly_repayment;
use crate::models::api::{BorrowRequest, BorrowResponse};
use crate::security::extractor::AuthenticatedAccount;
use crate::validation::json::JsonBody;
use crate::wal::wal::WalOperation;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Draw down purchase power and quote the installment
///
/// POST /borrow
///
/// The check against purchase power, the WAL write and the debit happen
/// under one entry lock in the store.
#[instrument(skip(state, payload), fields(account_id = %caller.id))]
pub async fn borrow_handler(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedAccount,
    JsonBody(payload): JsonBody<BorrowRequest>,
) -> Result<Json<BorrowResponse>, ApiError> {
    let borrow = payload.validate().map_err(|e| {
        warn!(error = %e, "Invalid borrow request");
        ApiError::InvalidParameter(e.to_string())
    })?;

    let wal = &state.wal;
    let remaining = state
        .accounts
        .debit_purchase_power(&caller.id, borrow.amount, |remaining| {
            wal.log_operation(&WalOperation::DebitPurchasePower {
                id: caller.id.clone(),
                amount: borrow.amount,
                remaining,
            })
        })
        .map_err(|e| {
            match &e {
                StoreError::InsufficientPurchasePower { requested, available } => {
                    info!(requested, available, "Borrow refused");
                }
                StoreError::NotFound(_) => {
                    warn!("Valid token for an account that does not exist");
                }
                StoreError::Persistence(_) => {}
            }
            ApiError::from(e)
        })?;

    let repayment = monthly_repayment(borrow.amount, borrow.tenure, state.config.lending.interest_rate);

    info!(
        amount = borrow.amount,
        tenure = borrow.tenure,
        monthly_repayment = repayment,
        purchase_power = remaining,
        "Borrow accepted"
    );

    Ok(Json(BorrowResponse {
        purchase_power: remaining,
        monthly_repayment: repayment,
    }))
}
