use validator::ValidationError;

use crate::constants::MAX_SPIN_DURATION;

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::new("invalid_email_format"));
    }
    Ok(())
}

pub fn validate_item_label(label: &str) -> Result<(), ValidationError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(ValidationError::new("invalid_item_label"));
    }
    Ok(())
}

pub fn validate_spin_duration(seconds: f64) -> Result<(), ValidationError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(ValidationError::new("invalid_spin_duration"));
    }
    Ok(())
}

/// The editor's slider range. Stored records may hold longer durations.
pub fn validate_spin_duration_setting(seconds: f64) -> Result<(), ValidationError> {
    validate_spin_duration(seconds)?;
    if seconds > MAX_SPIN_DURATION {
        return Err(ValidationError::new("spin_duration_too_long"));
    }
    Ok(())
}

pub fn validate_font_size(size: f64) -> Result<(), ValidationError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(ValidationError::new("invalid_font_size"));
    }
    Ok(())
}

/// Weights may be zero (never drawn) but not negative.
pub fn validate_item_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ValidationError::new("invalid_item_weight"));
    }
    Ok(())
}
