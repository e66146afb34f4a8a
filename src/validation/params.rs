use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, NaiveDate};

use crate::models::api::{BorrowRequest, SignupRequest};

/// Signup fields after parsing
#[derive(Debug)]
pub struct ValidatedSignup {
    pub phone: String,
    pub email: String,
    pub name: String,
    pub dob: NaiveDate,
    pub monthly_salary: f64,
    pub password: String,
}

/// Borrow fields after range checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedBorrow {
    pub amount: f64,
    pub tenure: u32,
}

impl SignupRequest {
    pub fn validate(self) -> Result<ValidatedSignup> {
        let dob = parse_date_of_birth(&self.dob)?;

        if !self.monthly_salary.is_finite() {
            bail!("monthlySalary must be a finite number");
        }

        Ok(ValidatedSignup {
            phone: self.phone,
            email: self.email,
            name: self.name,
            dob,
            monthly_salary: self.monthly_salary,
            password: self.password,
        })
    }
}

impl BorrowRequest {
    pub fn validate(self) -> Result<ValidatedBorrow> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            bail!("amount must be greater than 0");
        }

        if self.tenure < 1 {
            bail!("tenure must be at least 1");
        }

        let tenure = u32::try_from(self.tenure)
            .map_err(|_| anyhow!("tenure must be at most {}", u32::MAX))?;

        Ok(ValidatedBorrow {
            amount: self.amount,
            tenure,
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| anyhow!("dob must be a date (YYYY-MM-DD), got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(dob: &str, salary: f64) -> SignupRequest {
        SignupRequest {
            phone: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            dob: dob.to_string(),
            monthly_salary: salary,
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date_of_birth("1990-05-17").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_date_of_birth("1990-05-17T00:00:00Z").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
        );
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_date_of_birth("not a date").is_err());
        assert!(parse_date_of_birth("").is_err());
        assert!(parse_date_of_birth("1990-13-01").is_err());
    }

    #[test]
    fn test_signup_validate() {
        let validated = signup("1990-05-17", 30_000.0).validate().unwrap();
        assert_eq!(validated.email, "ada@example.com");
        assert_eq!(validated.monthly_salary, 30_000.0);
    }

    #[test]
    fn test_signup_bad_dob() {
        assert!(signup("17/05/1990", 30_000.0).validate().is_err());
    }

    #[test]
    fn test_borrow_validate() {
        let ok = BorrowRequest { amount: 1000.0, tenure: 12 }.validate().unwrap();
        assert_eq!(ok, ValidatedBorrow { amount: 1000.0, tenure: 12 });
    }

    #[test]
    fn test_borrow_zero_tenure_rejected() {
        assert!(BorrowRequest { amount: 1000.0, tenure: 0 }.validate().is_err());
    }

    #[test]
    fn test_borrow_negative_tenure_rejected() {
        assert!(BorrowRequest { amount: 1000.0, tenure: -1 }.validate().is_err());
    }

    #[test]
    fn test_borrow_oversized_tenure_rejected() {
        assert!(BorrowRequest { amount: 1000.0, tenure: i64::from(u32::MAX) + 1 }.validate().is_err());
    }

    #[test]
    fn test_borrow_non_positive_amount_rejected() {
        assert!(BorrowRequest { amount: 0.0, tenure: 12 }.validate().is_err());
        assert!(BorrowRequest { amount: -50.0, tenure: 12 }.validate().is_err());
    }
}
