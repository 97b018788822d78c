use chrono::{NaiveDate, Utc};

/// Current unix timestamp in seconds
pub fn timestamp() -> i64 {
    Utc::now().timestamp()
}

/// ISO `YYYY-MM-DD` representation used for date columns
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
