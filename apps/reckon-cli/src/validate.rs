/// Errors from validating operand input before any computation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("value {value} exceeds the allowed magnitude of {limit}")]
    OutOfRange { value: f64, limit: f64 },
}

/// Parse one operand from prompt text.
pub fn parse_number(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))
}

/// Reject operands whose magnitude exceeds the configured limit.
pub fn check_magnitude(value: f64, limit: f64) -> Result<(), ValidationError> {
    if value.abs() > limit {
        return Err(ValidationError::OutOfRange { value, limit });
    }
    Ok(())
}
