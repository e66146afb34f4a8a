use serde::{Deserialize, Serialize};

use crate::models::account::AccountView;

/// POST /signup body
///
/// Contact fields are free text and default to empty when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub dob: String,
    pub monthly_salary: f64,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: AccountView,
}

/// POST /login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /borrow body
#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    pub amount: f64,
    /// Number of monthly installments; range-checked in `validate`
    pub tenure: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowResponse {
    pub purchase_power: f64,
    pub monthly_repayment: f64,
}
