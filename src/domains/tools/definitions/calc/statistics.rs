//! Statistics tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::{
    CalcResult, Details, Field, Report, ResponseFormat, StatisticsOperation, StatisticsOutcome,
    Summary,
};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

/// Parameters for the statistics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatisticsParams {
    /// Statistic to compute.
    pub operation: StatisticsOperation,

    /// Data set.
    pub values: Vec<f64>,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for StatisticsParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            operation: required(args, "operation")?,
            values: required(args, "values")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Statistics tool - descriptive statistics over a list of numbers.
pub struct StatisticsTool;

impl CalculatorTool for StatisticsTool {
    const NAME: &'static str = "calculator_statistics";

    const DESCRIPTION: &'static str = "Descriptive statistics over a list of numbers: mean, median, mode, stdev and variance (sample), pstdev and pvariance (population), sum, min, max, range, or summary for all of them.";

    type Params = StatisticsParams;

    #[instrument(skip_all, fields(operation = params.operation.as_str(), count = params.values.len()))]
    fn compute(params: &StatisticsParams, _config: &Config) -> CalcResult<Report> {
        let outcome = params.operation.evaluate(&params.values)?;
        info!("{} over {} value(s)", params.operation.as_str(), params.values.len());

        let mut details = Details::new()
            .with("operation", params.operation.as_str())
            .with("count", params.values.len())
            .with("values", params.values.clone());
        if let Some(method) = params.operation.method() {
            details.insert("method", method);
        }

        let result = match outcome {
            StatisticsOutcome::Value(value) => Field::from(value),
            StatisticsOutcome::Summary(summary) => Field::Map(summary_details(&summary)),
        };

        Ok(Report::new(
            format!("Statistics: {}", params.operation.as_str()),
            result,
            details,
        ))
    }

    fn response_format(params: &StatisticsParams) -> ResponseFormat {
        params.response_format
    }
}

fn summary_details(summary: &Summary) -> Details {
    let mut details = Details::new()
        .with("count", summary.count)
        .with("mean", summary.mean)
        .with("median", summary.median)
        .with("min", summary.min)
        .with("max", summary.max)
        .with("range", summary.range)
        .with("sum", summary.sum);
    if let Some(stdev) = summary.stdev {
        details.insert("stdev", stdev);
    }
    if let Some(variance) = summary.variance {
        details.insert("variance", variance);
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::{result_text, test_args};
    use serde_json::json;

    fn run(args: serde_json::Value) -> rmcp::model::CallToolResult {
        StatisticsTool::execute_arguments(&test_args(args), &Config::default())
    }

    #[test]
    fn test_mean_markdown() {
        let result = run(json!({ "operation": "mean", "values": [1, 2, 3, 4, 5] }));
        let text = result_text(&result);
        assert!(text.starts_with("# Statistics: mean"));
        assert!(text.contains("- **Count**: 5"));
        assert!(text.contains("- **Values**:\n  - 1.0\n"));
        assert!(text.ends_with("## Result: **3.0**"));
    }

    #[test]
    fn test_stdev_reports_sample_method() {
        let result = run(json!({
            "operation": "stdev", "values": [1, 2, 3, 4, 5], "response_format": "json"
        }));
        let value: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert!((value["result"].as_f64().unwrap() - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(value["details"]["method"], "sample");
    }

    #[test]
    fn test_summary_is_named_result() {
        let result = run(json!({ "operation": "summary", "values": [2, 4, 4, 4, 5, 5, 7, 9] }));
        let text = result_text(&result);
        assert!(text.contains("## Results:\n- **count**: 8\n- **mean**: 5.0"));
    }

    #[test]
    fn test_empty_values() {
        let result = run(json!({ "operation": "mean", "values": [] }));
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error: Insufficient data"));
    }

    #[test]
    fn test_non_numeric_values() {
        let result = run(json!({ "operation": "mean", "values": [1, "two"] }));
        assert!(result_text(&result).starts_with("Error: Invalid 'values'"));
    }
}
