//! Trigonometric tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::{CalcResult, Details, Report, ResponseFormat, TrigOperation};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

/// Parameters for the trigonometric tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TrigonometricParams {
    /// Function to evaluate.
    pub operation: TrigOperation,

    /// Angle for sin/cos/tan, or ratio for asin/acos/atan.
    pub angle: f64,

    /// Interpret and return angles in radians instead of degrees.
    #[serde(default)]
    pub use_radians: bool,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for TrigonometricParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            operation: required(args, "operation")?,
            angle: required(args, "angle")?,
            use_radians: or_default(args, "use_radians")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Trigonometric tool - sin, cos, tan and their inverses.
pub struct TrigonometricTool;

impl CalculatorTool for TrigonometricTool {
    const NAME: &'static str = "calculator_trigonometric";

    const DESCRIPTION: &'static str = "Evaluate sin, cos, tan, asin, acos or atan. Angles are in degrees unless use_radians is true; inverse functions return an angle in the same unit.";

    type Params = TrigonometricParams;

    #[instrument(skip_all, fields(operation = params.operation.as_str()))]
    fn compute(params: &TrigonometricParams, _config: &Config) -> CalcResult<Report> {
        let result = params.operation.evaluate(params.angle, params.use_radians)?;
        info!("{}({}) = {}", params.operation.as_str(), params.angle, result);

        let unit = if params.use_radians { "radians" } else { "degrees" };
        let mut details = Details::new()
            .with("operation", params.operation.as_str())
            .with(if params.operation.is_inverse() { "input" } else { "angle" }, params.angle)
            .with("use_radians", params.use_radians);
        details.insert(
            if params.operation.is_inverse() { "output_unit" } else { "input_unit" },
            unit,
        );

        Ok(Report::new(
            format!("Trigonometric: {}", params.operation.as_str()),
            result,
            details,
        ))
    }

    fn response_format(params: &TrigonometricParams) -> ResponseFormat {
        params.response_format
    }
}
