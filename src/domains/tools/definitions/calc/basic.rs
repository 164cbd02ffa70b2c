//! Basic arithmetic tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::{BasicOperation, CalcResult, Details, Report, ResponseFormat};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

/// Parameters for the basic operation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BasicOperationParams {
    /// Arithmetic operation to perform.
    pub operation: BasicOperation,

    /// First operand.
    pub a: f64,

    /// Second operand.
    pub b: f64,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for BasicOperationParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            operation: required(args, "operation")?,
            a: required(args, "a")?,
            b: required(args, "b")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Basic operation tool - add, subtract, multiply, divide.
pub struct BasicOperationTool;

impl CalculatorTool for BasicOperationTool {
    const NAME: &'static str = "calculator_basic_operation";

    const DESCRIPTION: &'static str = "Perform basic arithmetic on two numbers: add, subtract, multiply or divide. Division by zero is rejected.";

    type Params = BasicOperationParams;

    #[instrument(skip_all, fields(operation = params.operation.as_str()))]
    fn compute(params: &BasicOperationParams, _config: &Config) -> CalcResult<Report> {
        let result = params.operation.apply(params.a, params.b)?;
        info!(
            "{} {} {} = {}",
            params.a,
            params.operation.symbol(),
            params.b,
            result
        );

        let details = Details::new()
            .with("operation", params.operation.as_str())
            .with("a", params.a)
            .with("b", params.b)
            .with(
                "expression",
                format!("{} {} {}", params.a, params.operation.symbol(), params.b),
            );

        Ok(Report::new(
            format!("Basic Operation: {}", params.operation.as_str()),
            result,
            details,
        ))
    }

    fn response_format(params: &BasicOperationParams) -> ResponseFormat {
        params.response_format
    }
}
