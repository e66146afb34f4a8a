use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the eligibility check made at registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Approved,
    /// Rejected applications are answered with 400 and never stored
    Rejected,
}

/// Stored user account
///
/// `purchase_power` is the only field that changes after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// 24 hex characters
    pub id: String,
    pub phone: String,
    pub email: String,
    pub name: String,
    pub registration_date: DateTime<Utc>,
    pub dob: NaiveDate,
    pub monthly_salary: f64,
    pub status: AccountStatus,
    /// Argon2 PHC string
    pub password_hash: String,
    pub purchase_power: f64,
}

/// Account as returned to clients, without the password hash
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub name: String,
    pub registration_date: DateTime<Utc>,
    pub dob: NaiveDate,
    pub monthly_salary: f64,
    pub status: AccountStatus,
    pub purchase_power: f64,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            phone: account.phone.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            registration_date: account.registration_date,
            dob: account.dob,
            monthly_salary: account.monthly_salary,
            status: account.status,
            purchase_power: account.purchase_power,
        }
    }
}

/// Body of every error response and of plain acknowledgements
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
