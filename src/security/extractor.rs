use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::utils::id::is_valid_account_id;

/// Identity of the caller, taken from a verified bearer token
///
/// Missing or empty `Authorization` header is a 401, anything present but
/// not verifiable is a 400.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedAccount {
    pub id: String,
}

/// Pull the raw token out of an `Authorization` value.
/// The `Bearer ` prefix is optional.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = match parts.headers.get(AUTHORIZATION) {
            Some(value) => value.to_str().map_err(|_| {
                warn!("Authorization header is not valid ASCII");
                ApiError::InvalidToken
            })?,
            None => {
                debug!("Request without Authorization header");
                return Err(ApiError::MissingToken);
            }
        };

        let token = bearer_token(header_value).ok_or(ApiError::MissingToken)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            warn!(error = %e, "Bearer token rejected");
            ApiError::InvalidToken
        })?;

        if !is_valid_account_id(&claims.id) {
            warn!("Bearer token carries a malformed account id");
            return Err(ApiError::InvalidToken);
        }

        Ok(AuthenticatedAccount { id: claims.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_prefix_stripped() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_raw_token_accepted() {
        assert_eq!(bearer_token("abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(bearer_token(""), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer    "), None);
    }
}
