//! Time helpers

use chrono::{Local, NaiveDate, Utc};

/// Today's date in server local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current Unix time in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
