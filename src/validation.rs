// ✅ Field validation shared by every entity
//
// Each helper returns the accepted value so setters read as
// `self.name = require_text(name, "Name")?;`

use crate::error::{ZooError, ZooResult};

/// Lowest/highest accepted percentage (cleanliness, degrade amounts)
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// Reject empty and whitespace-only text
pub fn require_text(value: impl Into<String>, label: &str) -> ZooResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ZooError::value_violation(format!("{} cannot be empty.", label)));
    }
    Ok(value)
}

pub fn require_non_negative(value: i64, label: &str) -> ZooResult<i64> {
    if value < 0 {
        return Err(ZooError::value_violation(format!("{} cannot be negative.", label)));
    }
    Ok(value)
}

/// Accept a number in [0, 100]
///
/// NaN is not a number at all, so it is a type violation rather than a range one.
pub fn require_percentage(value: f64, label: &str) -> ZooResult<f64> {
    if value.is_nan() {
        return Err(ZooError::type_violation(format!("{} must be a number.", label)));
    }
    if !(PERCENT_MIN..=PERCENT_MAX).contains(&value) {
        return Err(ZooError::value_violation(format!(
            "{} must be between {} and {}.",
            label, PERCENT_MIN, PERCENT_MAX
        )));
    }
    Ok(value)
}
