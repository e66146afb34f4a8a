use anyhow::Result;
use tracing::warn;

use crate::core::state::AppState;
use crate::wal::wal::WalOperation;

// this runs at boot time
pub fn apply_wal_operations(state: &AppState, operations: &[WalOperation]) -> Result<()> {
    for op in operations {
        match op {
            WalOperation::CreateAccount { account } => {
                state.accounts.insert(account.clone());
            }
            WalOperation::DebitPurchasePower { id, remaining, .. } => {
                if let Err(e) = state.accounts.set_purchase_power(id, *remaining) {
                    warn!(
                        account_id = %id,
                        error = %e,
                        "Debit in WAL refers to an unknown account, skipping"
                    );
                }
            }
        }
    }
    Ok(())
}
