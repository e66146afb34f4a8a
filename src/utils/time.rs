use chrono::{NaiveDate, Utc};

/// Seconds since the Unix epoch
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp() {
        let ts = current_timestamp();
        // Should be a reasonable timestamp (after 2020-01-01)
        assert!(ts > 1577836800);
        // Should be before 2100-01-01
        assert!(ts < 4102444800);
    }

    #[test]
    fn test_today_matches_timestamp() {
        let from_ts = chrono::DateTime::from_timestamp(current_timestamp(), 0)
            .unwrap()
            .date_naive();
        // Allow for the clock crossing midnight between the two calls
        let diff = (today() - from_ts).num_days().abs();
        assert!(diff <= 1);
    }
}
