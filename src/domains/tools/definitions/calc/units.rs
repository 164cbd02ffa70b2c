//! Unit conversion tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::calculator::units::convert;
use crate::domains::calculator::{CalcResult, Details, Report, ResponseFormat, UnitFamily};
use crate::domains::tools::definitions::arguments::{Arguments, FromArguments, or_default, required};
use crate::domains::tools::definitions::common::CalculatorTool;

/// Parameters for the unit conversion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnitConversionParams {
    /// Unit family: "temperature", "length" or "weight".
    pub unit_type: UnitFamily,

    /// Value to convert.
    pub value: f64,

    /// Source unit, e.g. "celsius", "meter", "kg".
    pub from_unit: String,

    /// Target unit, from the same family as `from_unit`.
    pub to_unit: String,

    /// Output format: "markdown" (default) or "json".
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl FromArguments for UnitConversionParams {
    fn from_arguments(args: &Arguments) -> CalcResult<Self> {
        Ok(Self {
            unit_type: required(args, "unit_type")?,
            value: required(args, "value")?,
            from_unit: required(args, "from_unit")?,
            to_unit: required(args, "to_unit")?,
            response_format: or_default(args, "response_format")?,
        })
    }
}

/// Unit conversion tool - temperature, length and weight.
pub struct UnitConversionTool;

impl CalculatorTool for UnitConversionTool {
    const NAME: &'static str = "calculator_unit_conversion";

    const DESCRIPTION: &'static str = "Convert a value between units of the same family. Temperature: celsius, fahrenheit, kelvin. Length: millimeter, centimeter, meter, kilometer, inch, foot, yard, mile. Weight: milligram, gram, kilogram, ounce, pound, tonne. Abbreviations such as c, m, ft, kg, lb are accepted.";

    type Params = UnitConversionParams;

    #[instrument(skip_all, fields(unit_type = params.unit_type.as_str()))]
    fn compute(params: &UnitConversionParams, _config: &Config) -> CalcResult<Report> {
        let conversion = convert(params.unit_type, params.value, &params.from_unit, &params.to_unit)?;
        info!(
            "{} {} = {} {}",
            params.value, conversion.from_unit, conversion.value, conversion.to_unit
        );

        let details = Details::new()
            .with("unit_type", params.unit_type.as_str())
            .with("value", params.value)
            .with("from_unit", conversion.from_unit)
            .with("to_unit", conversion.to_unit)
            .with("base_unit", params.unit_type.base_unit());

        Ok(Report::new(
            format!("Unit Conversion: {}", params.unit_type.as_str()),
            conversion.value,
            details,
        ))
    }

    fn response_format(params: &UnitConversionParams) -> ResponseFormat {
        params.response_format
    }
}
