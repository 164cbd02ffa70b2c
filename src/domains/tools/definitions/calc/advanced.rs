//! Advanced math tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::{
    AdvancedOperation, CalcError, CalcResult, Details, Report, ResponseFormat,
};
use crate::domains::calculator::advanced::MAX_ROUND_DECIMALS;
use crate::domains::tools::definitions::arguments::{
    Arguments, FromArguments, optional, or_default, required,
};
use crate::domains::tools::definitions::common::CalculatorTool;

/// Parameters for the advanced math tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AdvancedMathParams {
    /// Operation to perform.
    pub operation: AdvancedOperation,

    /// Input value.
    pub value: f64,

    /// Exponent, required when operation is "power".
    #[serde(default)]
    pub exponent: Option<f64>,

    /// Number of decimals for "round" (0-15, default 0).
    #[serde(default)]
    #[schemars(range(max = 15))]
    pub decimals: Option<u32>,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for AdvancedMathParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        let params = Self {
            operation: required(args, "operation")?,
            value: required(args, "value")?,
            exponent: optional(args, "exponent")?,
            decimals: optional(args, "decimals")?,
            response_format: or_default(args, "response_format")?,
        };

        if params.operation == AdvancedOperation::Power && params.exponent.is_none() {
            return Err(CalcError::validation(
                "exponent",
                "required for the 'power' operation",
            ));
        }
        if params.decimals.is_some_and(|d| d > MAX_ROUND_DECIMALS) {
            return Err(CalcError::validation(
                "decimals",
                format!("must be between 0 and {}", MAX_ROUND_DECIMALS),
            ));
        }

        Ok(params)
    }
}

/// Advanced math tool - powers, roots, rounding, logarithms, factorial.
pub struct AdvancedMathTool;

impl CalculatorTool for AdvancedMathTool {
    const NAME: &'static str = "calculator_advanced_math";

    const DESCRIPTION: &'static str = "Advanced math on a single value: power (needs exponent), sqrt, cbrt, ceil, floor, round (optional decimals), abs, log, log10, log2, exp, factorial.";

    type Params = AdvancedMathParams;

    #[instrument(skip_all, fields(operation = params.operation.as_str()))]
    fn compute(params: &AdvancedMathParams, _config: &Config) -> CalcResult<Report> {
        let decimals = params.decimals.unwrap_or(0);
        let result = params.operation.apply(params.value, params.exponent, decimals)?;
        info!("{}({}) = {}", params.operation.as_str(), params.value, result);

        let mut details = Details::new()
            .with("operation", params.operation.as_str())
            .with("value", params.value);
        match params.operation {
            AdvancedOperation::Power => {
                if let Some(exponent) = params.exponent {
                    details.insert("exponent", exponent);
                }
            }
            AdvancedOperation::Round => details.insert("decimals", u64::from(decimals)),
            _ => {}
        }

        Ok(Report::new(
            format!("Advanced Math: {}", params.operation.as_str()),
            result,
            details,
        ))
    }

    fn response_format(params: &AdvancedMathParams) -> ResponseFormat {
        params.response_format
    }
}
