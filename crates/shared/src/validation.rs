//! Field validators used by request payloads.

use chrono::{Datelike, Utc};
use validator::ValidationError;

/// Earliest queen year accepted; older values are data-entry mistakes.
const MIN_QUEEN_YEAR: i32 = 1990;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// A queen cannot be born in the future or implausibly long ago.
pub fn validate_queen_year(year: i32) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    if (MIN_QUEEN_YEAR..=current).contains(&year) {
        Ok(())
    } else {
        Err(error(
            "queen_year_range",
            "Queen year must be between 1990 and the current year",
        ))
    }
}

/// Relative humidity in percent (0 to 100).
pub fn validate_humidity(humidity: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&humidity) {
        Ok(())
    } else {
        Err(error("humidity_range", "Humidity must be between 0 and 100"))
    }
}

/// Sensor battery charge in percent (0 to 100).
pub fn validate_battery_level(level: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&level) {
        Ok(())
    } else {
        Err(error(
            "battery_range",
            "Battery level must be between 0 and 100",
        ))
    }
}

/// Rejects NaN and infinities in measured values.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(error("not_finite", "Value must be a finite number"))
    }
}

/// Loose phone number check: optional leading `+`, then 6-20 digits,
/// spaces or dashes.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');

    if allowed && (6..=20).contains(&digits) {
        Ok(())
    } else {
        Err(error("phone_format", "Invalid phone number format"))
    }
}
