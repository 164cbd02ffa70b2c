//! Calculator-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for calculator operations.
pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Errors raised while validating or computing a calculator request.
///
/// None of these ever cross the tool boundary: the dispatcher renders them
/// as `"Error: <message>"` responses.
#[derive(Debug, Error)]
pub enum CalcError {
    /// A request field is missing, has the wrong type or violates its constraint.
    #[error("Invalid '{field}': {constraint}")]
    Validation { field: String, constraint: String },

    /// A math operation was evaluated outside its domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Division with a divisor of exactly zero.
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    /// A unit identifier does not belong to the requested family.
    #[error("Invalid unit '{unit}' for {family} conversion")]
    InvalidUnit { unit: String, family: String },

    /// Input bytes could not be decoded or parsed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Not enough values for a statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A file-typed input could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalcError {
    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Create an invalid unit error.
    pub fn invalid_unit(unit: impl Into<String>, family: impl Into<String>) -> Self {
        Self::InvalidUnit {
            unit: unit.into(),
            family: family.into(),
        }
    }

    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reject a result that overflowed out of the finite `f64` range.
pub fn finite(result: f64, name: &str) -> CalcResult<f64> {
    if !result.is_finite() {
        return Err(CalcError::domain(format!("{} result overflows", name)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = CalcError::validation("exponent", "required for the 'power' operation");
        assert_eq!(
            err.to_string(),
            "Invalid 'exponent': required for the 'power' operation"
        );
    }

    #[test]
    fn test_finite_rejects_overflow() {
        assert_eq!(finite(2.5, "add").unwrap(), 2.5);
        let err = finite(f64::INFINITY, "multiply").unwrap_err();
        assert_eq!(err.to_string(), "Domain error: multiply result overflows");
        assert!(finite(f64::NAN, "sum").is_err());
    }

    #[test]
    fn test_invalid_unit_message() {
        let err = CalcError::invalid_unit("gram", "length");
        assert_eq!(err.to_string(), "Invalid unit 'gram' for length conversion");
    }
}
