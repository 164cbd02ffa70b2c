//! Hash calculation tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::hashing::hash_source;
use crate::domains::calculator::validate;
use crate::domains::calculator::{
    CalcResult, Details, HashAlgorithm, InputType, Normalization, Report, ResponseFormat,
};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

use super::append_outcome;

/// Parameters for the hash calculation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HashCalculationParams {
    /// Digest algorithm.
    pub algorithm: HashAlgorithm,

    /// How to interpret `input_data`.
    pub input_type: InputType,

    /// Text, file path, base64 or hex data depending on `input_type`.
    /// Surrounding whitespace is stripped.
    pub input_data: String,

    /// Normalization applied before hashing (default "none").
    #[serde(default)]
    pub normalization: Normalization,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for HashCalculationParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            algorithm: required(args, "algorithm")?,
            input_type: required(args, "input_type")?,
            input_data: required::<String>(args, "input_data")?.trim().to_string(),
            normalization: or_default(args, "normalization")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Hash calculation tool - digest of text, a file, base64 or hex data.
pub struct HashCalculationTool;

impl CalculatorTool for HashCalculationTool {
    const NAME: &'static str = "calculator_hash_calculation";

    const DESCRIPTION: &'static str = "Calculate a digest (md5, sha1, sha256, sha512, sha3_256, sha3_512, blake2b, crc32) of text, a file, base64 or hex data. Optional json or text normalization makes the digest insensitive to key order or whitespace.";

    type Params = HashCalculationParams;

    #[instrument(skip_all, fields(algorithm = params.algorithm.as_str(), input_type = params.input_type.as_str()))]
    fn compute(params: &HashCalculationParams, config: &Config) -> CalcResult<Report> {
        let source = validate::hash_source("input_data", params.input_type, &params.input_data, config)?;
        let outcome = hash_source(&source, params.algorithm, params.normalization)?;
        info!(
            "{} digest over {} byte(s)",
            params.algorithm.as_str(),
            outcome.normalized_size
        );

        let mut details = Details::new()
            .with("algorithm", params.algorithm.as_str())
            .with("input_type", params.input_type.as_str())
            .with("normalization", params.normalization.as_str());
        append_outcome(&mut details, &outcome);

        Ok(Report::new(
            format!("Hash Calculation: {}", params.algorithm.as_str()),
            outcome.digest,
            details,
        ))
    }

    fn response_format(params: &HashCalculationParams) -> ResponseFormat {
        params.response_format
    }
}
