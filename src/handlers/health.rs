use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub accounts: usize,
    pub timestamp: i64,
}

/// Liveness probe
///
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        accounts: state.accounts.len(),
        timestamp: current_timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::wal::wal::Wal;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_health_reports_account_count() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_toml("[server]\nport = 3000\n[auth]\njwt_secret = \"s\"\n").unwrap();
        let wal = Wal::new(dir.path().join("health.wal")).unwrap();
        let state = Arc::new(AppState::new(config, wal));

        let Json(health) = health_handler(State(state)).await;

        assert_eq!(health.status, "ok");
        assert_eq!(health.accounts, 0);
        assert!(health.timestamp > 0);
    }
}
