//! Advanced math: powers, roots, rounding, logarithms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult, finite};

/// Largest n for which n! is finite in an f64.
pub const MAX_FACTORIAL: f64 = 170.0;

/// Largest number of decimals accepted by `round`.
pub const MAX_ROUND_DECIMALS: u32 = 15;

/// Advanced math operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdvancedOperation {
    /// `value` raised to `exponent`.
    Power,
    Sqrt,
    Cbrt,
    Ceil,
    Floor,
    /// Round half to even, to `decimals` places.
    Round,
    Abs,
    /// Natural logarithm.
    Log,
    Log10,
    Log2,
    Exp,
    Factorial,
}

impl AdvancedOperation {
    /// Wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Round => "round",
            Self::Abs => "abs",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Exp => "exp",
            Self::Factorial => "factorial",
        }
    }

    /// Evaluate the operation.
    ///
    /// `exponent` must be present for `power`; `decimals` only affects `round`.
    pub fn apply(self, value: f64, exponent: Option<f64>, decimals: u32) -> CalcResult<f64> {
        let result = match self {
            Self::Power => {
                let exponent = exponent.ok_or_else(|| {
                    CalcError::validation("exponent", "required for the 'power' operation")
                })?;
                power(value, exponent)
            }
            Self::Sqrt => sqrt(value),
            Self::Cbrt => Ok(value.cbrt()),
            Self::Ceil => Ok(value.ceil()),
            Self::Floor => Ok(value.floor()),
            Self::Round => round(value, decimals),
            Self::Abs => Ok(value.abs()),
            Self::Log => log(value, f64::ln, "log"),
            Self::Log10 => log(value, f64::log10, "log10"),
            Self::Log2 => log(value, f64::log2, "log2"),
            Self::Exp => Ok(value.exp()),
            Self::Factorial => factorial(value),
        }?;
        finite(result, self.as_str())
    }
}

/// Raise `base` to any real `exponent`.
pub fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::domain("zero cannot be raised to a negative power"));
    }
    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(CalcError::domain(format!(
            "{} raised to {} is not a real number",
            base, exponent
        )));
    }
    finite(result, "power")
}

/// Square root, undefined for negative input.
pub fn sqrt(value: f64) -> CalcResult<f64> {
    if value < 0.0 {
        return Err(CalcError::domain(format!(
            "cannot take the square root of negative number {}",
            value
        )));
    }
    Ok(value.sqrt())
}

/// Round half to even with the given number of decimals.
pub fn round(value: f64, decimals: u32) -> CalcResult<f64> {
    if decimals > MAX_ROUND_DECIMALS {
        return Err(CalcError::validation(
            "decimals",
            format!("must be between 0 and {}", MAX_ROUND_DECIMALS),
        ));
    }
    if decimals == 0 {
        return Ok(value.round_ties_even());
    }
    let factor = 10f64.powi(decimals as i32);
    // Beyond 2^53 an f64 has no fractional digits left to round.
    if !(value.abs() * factor).is_finite() {
        return Ok(value);
    }
    Ok((value * factor).round_ties_even() / factor)
}

/// n! for a non-negative integer n.
pub fn factorial(value: f64) -> CalcResult<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(CalcError::domain(format!(
            "factorial is only defined for non-negative integers, got {}",
            value
        )));
    }
    if value > MAX_FACTORIAL {
        return Err(CalcError::domain(format!(
            "factorial of {} overflows (maximum is {})",
            value, MAX_FACTORIAL
        )));
    }
    Ok((2..=value as u64).fold(1.0, |acc, n| acc * n as f64))
}

fn log(value: f64, f: fn(f64) -> f64, name: &str) -> CalcResult<f64> {
    if value <= 0.0 {
        return Err(CalcError::domain(format!(
            "{} is only defined for positive numbers, got {}",
            name, value
        )));
    }
    Ok(f(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power() {
        assert_eq!(power(2.0, 3.0).unwrap(), 8.0);
        assert_eq!(power(4.0, 0.5).unwrap(), 2.0);
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert!((power(1.05, 3.0).unwrap() - 1.157625).abs() < 1e-12);
    }

    #[test]
    fn test_power_domain_errors() {
        assert!(matches!(power(-8.0, 0.5), Err(CalcError::Domain(_))));
        assert!(matches!(power(0.0, -1.0), Err(CalcError::Domain(_))));
        assert!(matches!(power(10.0, 400.0), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_power_requires_exponent() {
        let err = AdvancedOperation::Power.apply(2.0, None, 0).unwrap_err();
        assert!(matches!(err, CalcError::Validation { ref field, .. } if field == "exponent"));
    }

    #[test]
    fn test_roots() {
        assert_eq!(sqrt(16.0).unwrap(), 4.0);
        assert!(matches!(sqrt(-4.0), Err(CalcError::Domain(_))));
        assert_eq!(AdvancedOperation::Cbrt.apply(-27.0, None, 0).unwrap(), -3.0);
    }

    #[test]
    fn test_rounding_family() {
        assert_eq!(AdvancedOperation::Ceil.apply(9.24, None, 0).unwrap(), 10.0);
        assert_eq!(AdvancedOperation::Floor.apply(-1.5, None, 0).unwrap(), -2.0);
        assert_eq!(round(2.5, 0).unwrap(), 2.0);
        assert_eq!(round(3.5, 0).unwrap(), 4.0);
        assert_eq!(round(3.14159, 2).unwrap(), 3.14);
        assert!(matches!(round(1.0, 16), Err(CalcError::Validation { .. })));
    }

    #[test]
    fn test_round_huge_value_is_unchanged() {
        assert_eq!(round(1.7e308, 2).unwrap(), 1.7e308);
        assert_eq!(round(-1e300, 15).unwrap(), -1e300);
        assert_eq!(AdvancedOperation::Round.apply(1.7e308, None, 2).unwrap(), 1.7e308);
    }

    #[test]
    fn test_overflow_is_domain_error() {
        let err = AdvancedOperation::Exp.apply(1000.0, None, 0).unwrap_err();
        assert_eq!(err.to_string(), "Domain error: exp result overflows");
    }

    #[test]
    fn test_logarithms() {
        assert!((AdvancedOperation::Log.apply(std::f64::consts::E, None, 0).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(AdvancedOperation::Log10.apply(1000.0, None, 0).unwrap(), 3.0);
        assert_eq!(AdvancedOperation::Log2.apply(8.0, None, 0).unwrap(), 3.0);
        assert!(matches!(
            AdvancedOperation::Log.apply(0.0, None, 0),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            AdvancedOperation::Log10.apply(-5.0, None, 0),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert!(factorial(170.0).unwrap().is_finite());
        assert!(matches!(factorial(171.0), Err(CalcError::Domain(_))));
        assert!(matches!(factorial(2.5), Err(CalcError::Domain(_))));
        assert!(matches!(factorial(-1.0), Err(CalcError::Domain(_))));
    }
}
