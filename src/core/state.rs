// Application state (AppState)

use crate::core::config::Config;
use crate::security::token::TokenIssuer;
use crate::stores::account_store::AccountStore;
use crate::wal::wal::Wal;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account table
    pub accounts: Arc<AccountStore>,

    /// Write-Ahead Log for persistence
    pub wal: Arc<Wal>,

    /// Bearer token signer/verifier
    pub tokens: TokenIssuer,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, wal: Wal) -> Self {
        let tokens = TokenIssuer::from_config(&config.auth);

        Self {
            accounts: Arc::new(AccountStore::new()),
            wal: Arc::new(wal),
            tokens,
            config: Arc::new(config),
        }
    }
}
