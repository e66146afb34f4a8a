use chrono::{Datelike, NaiveDate};

use crate::core::config::LendingConfig;

/// Decision taken on a signup application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assessment {
    Approved { purchase_power: f64 },
    Rejected(RejectionReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    TooYoung,
    SalaryTooLow,
}

/// Age as the difference between calendar years.
///
/// Month and day are ignored, so someone born in December counts as a year
/// older for most of the year.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - dob.year()
}

/// Apply the eligibility thresholds and compute the starting purchase power
pub fn assess_application(
    config: &LendingConfig,
    dob: NaiveDate,
    monthly_salary: f64,
    today: NaiveDate,
) -> Assessment {
    if age_in_years(dob, today) < config.min_age {
        return Assessment::Rejected(RejectionReason::TooYoung);
    }

    if monthly_salary < config.min_monthly_salary {
        return Assessment::Rejected(RejectionReason::SalaryTooLow);
    }

    Assessment::Approved {
        purchase_power: monthly_salary * config.purchase_power_multiplier,
    }
}

/// Flat-rate installment: principal plus one period of interest, split evenly.
///
/// `tenure` must be non-zero; callers validate it first.
pub fn monthly_repayment(amount: f64, tenure: u32, interest_rate: f64) -> f64 {
    amount * (1.0 + interest_rate) / f64::from(tenure)
}
