// Centralized error handling for the lending service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::account::MessageResponse;

/// Errors returned by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Application rejected")]
    ApplicationRejected,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access Denied")]
    MissingToken,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Insufficient purchase power")]
    InsufficientPurchasePower,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ApplicationRejected => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::BAD_REQUEST,
            ApiError::InsufficientPurchasePower => StatusCode::BAD_REQUEST,
            ApiError::AccountNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            error!(error = %format!("{:#}", cause), "Request failed with internal error");
        }

        (
            self.status(),
            Json(MessageResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors raised by the account store
#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Insufficient purchase power: requested {requested}, available {available}")]
    InsufficientPurchasePower { requested: f64, available: f64 },

    #[error("Failed to persist change: {0}")]
    Persistence(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::AccountNotFound,
            StoreError::InsufficientPurchasePower { .. } => ApiError::InsufficientPurchasePower,
            StoreError::Persistence(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Errors raised while issuing or verifying bearer tokens
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token rejected: {0}")]
    Rejected(String),
}
