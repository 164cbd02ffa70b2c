//! Hash comparison tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::hashing::{digests_match, hash_source};
use crate::domains::calculator::validate;
use crate::domains::calculator::{
    CalcResult, Details, HashAlgorithm, InputType, Normalization, Report, ResponseFormat,
};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

use super::append_outcome;

/// Parameters for the hash comparison tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HashComparisonParams {
    /// Digest algorithm.
    pub algorithm: HashAlgorithm,

    /// How to interpret `input_data`.
    pub input_type: InputType,

    /// Text, file path, base64 or hex data depending on `input_type`.
    /// Surrounding whitespace is stripped.
    pub input_data: String,

    /// Expected digest in hex; case and surrounding whitespace are ignored.
    pub expected_hash: String,

    /// Normalization applied before hashing (default "none").
    #[serde(default)]
    pub normalization: Normalization,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for HashComparisonParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        let expected: String = required(args, "expected_hash")?;
        Ok(Self {
            algorithm: required(args, "algorithm")?,
            input_type: required(args, "input_type")?,
            input_data: required::<String>(args, "input_data")?.trim().to_string(),
            expected_hash: validate::expected_hash(&expected)?,
            normalization: or_default(args, "normalization")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Hash comparison tool - verify data against an expected digest.
pub struct HashComparisonTool;

impl CalculatorTool for HashComparisonTool {
    const NAME: &'static str = "calculator_hash_comparison";

    const DESCRIPTION: &'static str = "Calculate a digest of text, a file, base64 or hex data and compare it (case-insensitively) with an expected hex digest.";

    type Params = HashComparisonParams;

    #[instrument(skip_all, fields(algorithm = params.algorithm.as_str(), input_type = params.input_type.as_str()))]
    fn compute(params: &HashComparisonParams, config: &Config) -> CalcResult<Report> {
        let source = validate::hash_source("input_data", params.input_type, &params.input_data, config)?;
        let outcome = hash_source(&source, params.algorithm, params.normalization)?;
        let matched = digests_match(&outcome.digest, &params.expected_hash);
        info!("{} comparison: match={}", params.algorithm.as_str(), matched);

        let mut details = Details::new()
            .with("algorithm", params.algorithm.as_str())
            .with("input_type", params.input_type.as_str())
            .with("normalization", params.normalization.as_str())
            .with("calculated_hash", outcome.digest.as_str())
            .with("expected_hash", params.expected_hash.as_str())
            .with("match", matched);
        append_outcome(&mut details, &outcome);

        let result = Details::new()
            .with("match", matched)
            .with("calculated_hash", outcome.digest.as_str())
            .with("expected_hash", params.expected_hash.as_str());

        Ok(Report::new(
            format!("Hash Comparison: {}", params.algorithm.as_str()),
            result,
            details,
        )
        .with_heading_suffix(if matched { "✓ MATCH" } else { "✗ MISMATCH" }))
    }

    fn response_format(params: &HashComparisonParams) -> ResponseFormat {
        params.response_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::{result_text, test_args};
    use serde_json::json;

    const HELLO_SHA256: &str = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f";

    fn run(args: serde_json::Value) -> rmcp::model::CallToolResult {
        HashComparisonTool::execute_arguments(&test_args(args), &Config::default())
    }

    #[test]
    fn test_match_ignores_case() {
        let result = run(json!({
            "algorithm": "sha256", "input_type": "text", "input_data": "Hello, World!",
            "expected_hash": format!("  {}  ", HELLO_SHA256.to_uppercase())
        }));
        let text = result_text(&result);
        assert!(text.starts_with("# Hash Comparison: sha256 ✓ MATCH\n"));
        assert!(text.contains("## Results:\n- **match**: true\n"));
    }

    #[test]
    fn test_mismatch_json_label_unchanged() {
        let result = run(json!({
            "algorithm": "sha256", "input_type": "text", "input_data": "Hello, World!",
            "expected_hash": "deadbeef", "response_format": "json"
        }));
        assert_eq!(result.is_error, Some(false));
        let value = result.structured_content.clone().unwrap();
        assert_eq!(value["operation"], "Hash Comparison: sha256");
        assert_eq!(value["result"]["match"], false);
        assert_eq!(value["result"]["expected_hash"], "deadbeef");
        assert_eq!(value["details"]["calculated_hash"], HELLO_SHA256);
    }

    #[test]
    fn test_padded_text_matches() {
        let result = run(json!({
            "algorithm": "sha256", "input_type": "text", "input_data": "  Hello, World!  ",
            "expected_hash": HELLO_SHA256, "response_format": "json"
        }));
        assert_eq!(result.structured_content.unwrap()["result"]["match"], true);
    }

    #[test]
    fn test_mismatch_markdown_heading() {
        let result = run(json!({
            "algorithm": "md5", "input_type": "text", "input_data": "abc", "expected_hash": "00"
        }));
        assert!(result_text(&result).starts_with("# Hash Comparison: md5 ✗ MISMATCH"));
    }

    #[test]
    fn test_expected_hash_must_be_hex() {
        let result = run(json!({
            "algorithm": "md5", "input_type": "text", "input_data": "abc", "expected_hash": "xyz"
        }));
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error: Invalid 'expected_hash'"));
    }
}
