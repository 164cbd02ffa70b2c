//! Rendering of calculator results as Markdown or JSON.
//!
//! A [`Report`] is the operation label, its result and an insertion-ordered
//! set of details. Markdown output looks like:
//!
//! ```text
//! # Hash Calculation: sha256
//!
//! - **Algorithm**: sha256
//! - **Input Size Bytes**: 13
//!
//! ## Result: **dffd6021...**
//! ```
//!
//! JSON output is the pretty-printed `{operation, result, details}` record.

use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use super::error::CalcResult;

/// Output format selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Human-readable Markdown.
    #[default]
    Markdown,
    /// Pretty-printed JSON record.
    Json,
}

/// A value inside a report: a JSON scalar, a nested ordered mapping or a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Scalar(Value),
    Map(Details),
    List(Vec<Field>),
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        // Non-finite floats have no JSON form. Every operation rejects them
        // with `finite` before a report is built.
        Self::Scalar(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Self::Scalar(Value::Bool(value))
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Scalar(Value::String(value))
    }
}

impl From<usize> for Field {
    fn from(value: usize) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<u64> for Field {
    fn from(value: u64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<Details> for Field {
    fn from(value: Details) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<f64>> for Field {
    fn from(values: Vec<f64>) -> Self {
        Self::List(values.into_iter().map(Field::from).collect())
    }
}

impl From<Vec<Details>> for Field {
    fn from(items: Vec<Details>) -> Self {
        Self::List(items.into_iter().map(Field::Map).collect())
    }
}

/// Insertion-ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    entries: Vec<(String, Field)>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Field>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Field>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Outcome of one tool call, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub operation: String,
    pub result: Field,
    pub details: Details,
    /// Suffix appended to the Markdown heading only.
    #[serde(skip)]
    pub heading_suffix: Option<String>,
}

impl Report {
    pub fn new(operation: impl Into<String>, result: impl Into<Field>, details: Details) -> Self {
        Self {
            operation: operation.into(),
            result: result.into(),
            details,
            heading_suffix: None,
        }
    }

    /// Add a marker to the Markdown heading, leaving the JSON label untouched.
    pub fn with_heading_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.heading_suffix = Some(suffix.into());
        self
    }

    /// Render the report in the requested format.
    pub fn render(&self, format: ResponseFormat) -> CalcResult<String> {
        match format {
            ResponseFormat::Markdown => Ok(self.to_markdown()),
            ResponseFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// The report as a JSON value.
    pub fn to_value(&self) -> CalcResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            match &self.heading_suffix {
                Some(suffix) => format!("# {} {}", self.operation, suffix),
                None => format!("# {}", self.operation),
            },
            String::new(),
        ];

        if !self.details.is_empty() {
            for (key, value) in self.details.iter() {
                let label = humanize(key);
                match value {
                    Field::Scalar(scalar) => {
                        lines.push(format!("- **{}**: {}", label, detail_scalar(scalar)))
                    }
                    Field::List(items) => {
                        lines.push(format!("- **{}**:", label));
                        lines.extend(items.iter().map(|item| format!("  - {}", inline(item))));
                    }
                    Field::Map(map) => {
                        lines.push(format!("- **{}**:", label));
                        lines.extend(
                            map.iter()
                                .map(|(k, v)| format!("  - **{}**: {}", k, inline(v))),
                        );
                    }
                }
            }
            lines.push(String::new());
        }

        match &self.result {
            Field::Scalar(scalar) => lines.push(format!("## Result: **{}**", scalar_text(scalar))),
            Field::Map(map) => {
                lines.push("## Results:".to_string());
                lines.extend(map.iter().map(|(k, v)| format!("- **{}**: {}", k, inline(v))));
            }
            Field::List(items) => {
                lines.push("## Results:".to_string());
                lines.extend(items.iter().map(|item| format!("- {}", inline(item))));
            }
        }

        lines.join("\n")
    }
}

/// `input_size_bytes` → `Input Size Bytes`.
fn humanize(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Detail lines print floats with six decimals.
fn detail_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => format!("{:.6}", f),
            None => n.to_string(),
        },
        other => scalar_text(other),
    }
}

/// Plain text for a scalar: strings unquoted, floats in shortest round-trip form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => format!("{:?}", f),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn inline(field: &Field) -> String {
    match field {
        Field::Scalar(scalar) => scalar_text(scalar),
        Field::Map(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, inline(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Field::List(items) => format!(
            "[{}]",
            items.iter().map(inline).collect::<Vec<_>>().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::new(
            "Division",
            2.5,
            Details::new()
                .with("a", 10.0)
                .with("b", 4.0)
                .with("operation", "divide"),
        )
    }

    #[test]
    fn test_markdown_scalar() {
        let text = sample().render(ResponseFormat::Markdown).unwrap();
        assert_eq!(
            text,
            "# Division\n\n- **A**: 10.000000\n- **B**: 4.000000\n- **Operation**: divide\n\n## Result: **2.5**"
        );
    }

    #[test]
    fn test_markdown_float_result_keeps_fraction() {
        let report = Report::new("Conversion", 212.0, Details::new());
        assert_eq!(report.to_markdown(), "# Conversion\n\n## Result: **212.0**");
    }

    #[test]
    fn test_json_preserves_order_and_numbers() {
        let text = sample().render(ResponseFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["operation"], "Division");
        assert_eq!(value["result"], 2.5);
        assert_eq!(value["details"]["a"], 10.0);

        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        let op = text.find("\"operation\": \"divide\"").unwrap();
        assert!(a < b && b < op);
        assert!(text.contains("\n  \"operation\""));
    }

    #[test]
    fn test_markdown_named_results() {
        let result = Details::new()
            .with("match", true)
            .with("calculated_hash", "abc");
        let report = Report::new("Hash Comparison: md5", result, Details::new().with("input_size_bytes", 3usize))
            .with_heading_suffix("✓ MATCH");
        let text = report.to_markdown();
        assert!(text.starts_with("# Hash Comparison: md5 ✓ MATCH\n"));
        assert!(text.contains("- **Input Size Bytes**: 3\n"));
        assert!(text.contains("## Results:\n- **match**: true\n- **calculated_hash**: abc"));

        let json = report.to_value().unwrap();
        assert_eq!(json["operation"], "Hash Comparison: md5");
    }

    #[test]
    fn test_markdown_lists() {
        let items = vec![
            Details::new().with("input", "a").with("hash", "0cc1"),
            Details::new().with("input", "b").with("error", "bad"),
        ];
        let report = Report::new(
            "Batch",
            items.clone(),
            Details::new().with("values", vec![1.0, 2.5]).with("inputs", items),
        );
        let text = report.to_markdown();
        assert!(text.contains("- **Values**:\n  - 1.0\n  - 2.5\n"));
        assert!(text.contains("- **Inputs**:\n  - input: a, hash: 0cc1\n  - input: b, error: bad\n"));
        assert!(text.ends_with("## Results:\n- input: a, hash: 0cc1\n- input: b, error: bad"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("input_size_bytes"), "Input Size Bytes");
        assert_eq!(humanize("use_radians"), "Use Radians");
        assert_eq!(humanize("a"), "A");
    }

    #[test]
    fn test_empty_details_omits_list() {
        let report = Report::new("Sum", 3.0, Details::new());
        assert_eq!(report.render(ResponseFormat::Markdown).unwrap(), "# Sum\n\n## Result: **3.0**");
        let json: Value = serde_json::from_str(&report.render(ResponseFormat::Json).unwrap()).unwrap();
        assert_eq!(json["details"], serde_json::json!({}));
    }
}
