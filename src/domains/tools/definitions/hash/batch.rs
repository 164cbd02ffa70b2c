//! Batch hash tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::domains::calculator::hashing::hash_batch;
use crate::domains::calculator::validate;
use crate::domains::calculator::{
    CalcResult, Details, HashAlgorithm, InputType, Normalization, Report, ResponseFormat,
};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

use super::append_outcome;

/// Parameters for the batch hash tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BatchHashParams {
    /// Digest algorithm applied to every input.
    pub algorithm: HashAlgorithm,

    /// How to interpret each entry of `input_list`.
    pub input_type: InputType,

    /// Inputs to hash, processed in order.
    pub input_list: Vec<String>,

    /// Normalization applied before hashing (default "none").
    #[serde(default)]
    pub normalization: Normalization,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for BatchHashParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            algorithm: required(args, "algorithm")?,
            input_type: required(args, "input_type")?,
            input_list: required(args, "input_list")?,
            normalization: or_default(args, "normalization")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Batch hash tool - one digest per input, failures reported per entry.
pub struct BatchHashTool;

impl CalculatorTool for BatchHashTool {
    const NAME: &'static str = "calculator_batch_hash";

    const DESCRIPTION: &'static str = "Calculate digests for a list of inputs with one algorithm. Results keep the input order; an input that cannot be hashed gets an error entry without failing the others.";

    type Params = BatchHashParams;

    #[instrument(skip_all, fields(algorithm = params.algorithm.as_str(), count = params.input_list.len()))]
    fn compute(params: &BatchHashParams, config: &Config) -> CalcResult<Report> {
        validate::batch_size(params.input_list.len(), config)?;

        let sources = params.input_list.iter().enumerate().map(|(index, input)| {
            let field = format!("input_list[{}]", index);
            (
                input.clone(),
                validate::hash_source(&field, params.input_type, input, config),
            )
        });
        let items = hash_batch(sources, params.algorithm, params.normalization);

        let mut results = Vec::with_capacity(items.len());
        let mut inputs = Vec::with_capacity(items.len());
        let mut failed = 0usize;

        for item in &items {
            let mut result = Details::new().with("input", item.input.as_str());
            let mut entry = Details::new().with("input", item.input.as_str());
            match &item.outcome {
                Ok(outcome) => {
                    result.insert("hash", outcome.digest.as_str());
                    if let Some((_, size)) = &outcome.file {
                        result.insert("file_size", *size);
                    }
                    append_outcome(&mut entry, outcome);
                }
                Err(e) => {
                    warn!("Batch entry '{}' failed: {}", item.input, e);
                    failed += 1;
                    result.insert("error", e.to_string());
                    entry.insert("error", e.to_string());
                }
            }
            results.push(result);
            inputs.push(entry);
        }

        info!(
            "{} batch: {} succeeded, {} failed",
            params.algorithm.as_str(),
            items.len() - failed,
            failed
        );

        let details = Details::new()
            .with("algorithm", params.algorithm.as_str())
            .with("input_type", params.input_type.as_str())
            .with("normalization", params.normalization.as_str())
            .with("total_inputs", items.len())
            .with("succeeded", items.len() - failed)
            .with("failed", failed)
            .with("inputs", inputs);

        Ok(Report::new(
            format!("Batch Hash Calculation: {}", params.algorithm.as_str()),
            results,
            details,
        ))
    }

    fn response_format(params: &BatchHashParams) -> ResponseFormat {
        params.response_format
    }
}
