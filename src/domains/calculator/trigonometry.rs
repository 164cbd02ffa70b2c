//! Trigonometric functions with degree or radian angles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult, finite};

/// Cosines smaller than this are treated as zero when evaluating `tan`.
const TAN_POLE_EPSILON: f64 = 1e-12;

/// Trigonometric operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrigOperation {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl TrigOperation {
    /// Wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
        }
    }

    /// Whether the operation maps a ratio back to an angle.
    pub fn is_inverse(self) -> bool {
        matches!(self, Self::Asin | Self::Acos | Self::Atan)
    }

    /// Evaluate the operation.
    ///
    /// Forward functions take an angle; inverse functions take a ratio and
    /// return an angle. With `use_radians == false` angles are in degrees.
    pub fn evaluate(self, input: f64, use_radians: bool) -> CalcResult<f64> {
        if self.is_inverse() {
            let radians = match self {
                Self::Asin => unit_interval(input, "asin")?.asin(),
                Self::Acos => unit_interval(input, "acos")?.acos(),
                _ => input.atan(),
            };
            return Ok(if use_radians { radians } else { radians.to_degrees() });
        }

        let radians = if use_radians { input } else { input.to_radians() };
        match self {
            Self::Sin => Ok(radians.sin()),
            Self::Cos => Ok(radians.cos()),
            _ => {
                if radians.cos().abs() < TAN_POLE_EPSILON {
                    return Err(CalcError::domain(format!(
                        "tan is undefined at {}{}",
                        input,
                        if use_radians { " rad" } else { "°" }
                    )));
                }
                finite(radians.tan(), "tan")
            }
        }
    }
}

fn unit_interval(value: f64, name: &str) -> CalcResult<f64> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::domain(format!(
            "{} is only defined on [-1, 1], got {}",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sin_degrees() {
        let v = TrigOperation::Sin.evaluate(30.0, false).unwrap();
        assert!((v - 0.5).abs() < EPS);
    }

    #[test]
    fn test_cos_radians() {
        let v = TrigOperation::Cos.evaluate(std::f64::consts::PI, true).unwrap();
        assert!((v + 1.0).abs() < EPS);
    }

    #[test]
    fn test_asin_returns_degrees() {
        let v = TrigOperation::Asin.evaluate(0.5, false).unwrap();
        assert!((v - 30.0).abs() < EPS);
    }

    #[test]
    fn test_atan_slope() {
        let v = TrigOperation::Atan.evaluate(1.0, false).unwrap();
        assert!((v - 45.0).abs() < EPS);
        let r = TrigOperation::Atan.evaluate(1.0, true).unwrap();
        assert!((r - std::f64::consts::FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn test_inverse_domain() {
        assert!(matches!(
            TrigOperation::Asin.evaluate(1.5, false),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            TrigOperation::Acos.evaluate(-1.01, true),
            Err(CalcError::Domain(_))
        ));
        assert!(TrigOperation::Acos.evaluate(-1.0, false).is_ok());
    }

    #[test]
    fn test_tan_pole() {
        assert!(matches!(
            TrigOperation::Tan.evaluate(90.0, false),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            TrigOperation::Tan.evaluate(270.0, false),
            Err(CalcError::Domain(_))
        ));
        let v = TrigOperation::Tan.evaluate(45.0, false).unwrap();
        assert!((v - 1.0).abs() < EPS);
    }
}
