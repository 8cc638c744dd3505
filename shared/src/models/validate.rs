//! Custom field validators used by the `validator` derives

use chrono::{Local, NaiveDate};
use std::borrow::Cow;
use validator::ValidationError;

/// Phone numbers are 10 to 15 ASCII digits, nothing else
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let ok = (10..=15).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message(Cow::Borrowed("Phone must be 10-15 digits")))
    }
}

/// Birth dates must be strictly before today
pub fn validate_past_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Local::now().date_naive() {
        Ok(())
    } else {
        Err(ValidationError::new("past")
            .with_message(Cow::Borrowed("Birth date must be in the past")))
    }
}

/// Rejects values that are empty once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("Value is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_phone() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("091234567890123").is_ok());
        assert!(validate_phone("091234567").is_err());
        assert!(validate_phone("0912345678901234").is_err());
        assert!(validate_phone("09123-45678").is_err());
        assert!(validate_phone("+84912345678").is_err());
    }

    #[test]
    fn test_past_date() {
        let today = Local::now().date_naive();
        assert!(validate_past_date(&(today - Duration::days(1))).is_ok());
        assert!(validate_past_date(&today).is_err());
        assert!(validate_past_date(&(today + Duration::days(1))).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Dev").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
