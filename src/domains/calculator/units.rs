//! Unit conversion within closed unit families.
//!
//! Every unit is described by a [`ConversionRule`] relative to its family's
//! base unit (Celsius, meter, gram). A conversion goes source → base → target.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult, finite};

/// Absolute zero in the temperature base unit (Celsius).
const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Family of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Temperature,
    Length,
    Weight,
}

/// `base = (x + offset) * numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRule {
    pub offset: f64,
    pub numerator: f64,
    pub denominator: f64,
}

impl ConversionRule {
    const fn linear(factor: f64) -> Self {
        Self {
            offset: 0.0,
            numerator: factor,
            denominator: 1.0,
        }
    }

    const fn affine(offset: f64, numerator: f64, denominator: f64) -> Self {
        Self {
            offset,
            numerator,
            denominator,
        }
    }

    pub fn to_base(&self, value: f64) -> f64 {
        (value + self.offset) * self.numerator / self.denominator
    }

    pub fn from_base(&self, base: f64) -> f64 {
        base * self.denominator / self.numerator - self.offset
    }
}

/// (canonical name, aliases, rule)
type UnitEntry = (&'static str, &'static [&'static str], ConversionRule);

const TEMPERATURE_UNITS: &[UnitEntry] = &[
    ("celsius", &["c", "°c"], ConversionRule::linear(1.0)),
    ("fahrenheit", &["f", "°f"], ConversionRule::affine(-32.0, 5.0, 9.0)),
    ("kelvin", &["k"], ConversionRule::affine(-273.15, 1.0, 1.0)),
];

const LENGTH_UNITS: &[UnitEntry] = &[
    ("millimeter", &["mm", "millimeters", "millimetre", "millimetres"], ConversionRule::linear(0.001)),
    ("centimeter", &["cm", "centimeters", "centimetre", "centimetres"], ConversionRule::linear(0.01)),
    ("meter", &["m", "meters", "metre", "metres"], ConversionRule::linear(1.0)),
    ("kilometer", &["km", "kilometers", "kilometre", "kilometres"], ConversionRule::linear(1000.0)),
    ("inch", &["in", "inches"], ConversionRule::linear(0.0254)),
    ("foot", &["ft", "feet"], ConversionRule::linear(0.3048)),
    ("yard", &["yd", "yards"], ConversionRule::linear(0.9144)),
    ("mile", &["mi", "miles"], ConversionRule::linear(1609.344)),
];

const WEIGHT_UNITS: &[UnitEntry] = &[
    ("milligram", &["mg", "milligrams"], ConversionRule::linear(0.001)),
    ("gram", &["g", "grams"], ConversionRule::linear(1.0)),
    ("kilogram", &["kg", "kilograms"], ConversionRule::linear(1000.0)),
    ("ounce", &["oz", "ounces"], ConversionRule::linear(28.349523125)),
    ("pound", &["lb", "lbs", "pounds"], ConversionRule::linear(453.59237)),
    ("tonne", &["t", "tonnes", "metric_ton"], ConversionRule::linear(1_000_000.0)),
];

impl UnitFamily {
    /// Wire name of the family.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Length => "length",
            Self::Weight => "weight",
        }
    }

    /// Name of the family's base unit.
    pub fn base_unit(self) -> &'static str {
        self.units()[match self {
            Self::Temperature => 0,
            Self::Length => 2,
            Self::Weight => 1,
        }]
        .0
    }

    fn units(self) -> &'static [UnitEntry] {
        match self {
            Self::Temperature => TEMPERATURE_UNITS,
            Self::Length => LENGTH_UNITS,
            Self::Weight => WEIGHT_UNITS,
        }
    }

    /// Canonical names of every unit in the family.
    pub fn unit_names(self) -> Vec<&'static str> {
        self.units().iter().map(|(name, _, _)| *name).collect()
    }

    /// Resolve a unit identifier (case-insensitive, aliases allowed) to its
    /// canonical name and rule.
    pub fn resolve(self, unit: &str) -> CalcResult<(&'static str, ConversionRule)> {
        let wanted = unit.trim().to_lowercase();
        self.units()
            .iter()
            .find(|(name, aliases, _)| *name == wanted || aliases.contains(&wanted.as_str()))
            .map(|(name, _, rule)| (*name, *rule))
            .ok_or_else(|| CalcError::invalid_unit(unit, self.as_str()))
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
}

/// Convert `value` from `from` to `to` within `family`.
pub fn convert(family: UnitFamily, value: f64, from: &str, to: &str) -> CalcResult<Conversion> {
    let (from_unit, from_rule) = family.resolve(from)?;
    let (to_unit, to_rule) = family.resolve(to)?;

    let base = from_rule.to_base(value);
    if family == UnitFamily::Temperature && base < ABSOLUTE_ZERO_C - 1e-9 {
        return Err(CalcError::domain(format!(
            "{} {} is below absolute zero",
            value, from_unit
        )));
    }

    let converted = if from_unit == to_unit {
        value
    } else {
        finite(to_rule.from_base(base), "conversion")?
    };

    Ok(Conversion {
        value: converted,
        from_unit,
        to_unit,
    })
}
