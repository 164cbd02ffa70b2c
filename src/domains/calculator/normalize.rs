//! Canonicalization passes applied to input bytes before hashing.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{CalcError, CalcResult};

static LINE_ENDINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Normalization applied before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    #[default]
    None,
    /// Parse as JSON and re-serialize with sorted keys, no whitespace.
    Json,
    /// Trim, unify line endings and collapse blank lines and space runs.
    Text,
}

impl Normalization {
    /// Wire name of the normalization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    /// Apply the normalization to raw bytes.
    pub fn apply(self, data: &[u8]) -> CalcResult<Cow<'_, [u8]>> {
        match self {
            Self::None => Ok(Cow::Borrowed(data)),
            Self::Json => Ok(Cow::Owned(normalize_json(&decode_lossy(data))?.into_bytes())),
            Self::Text => Ok(Cow::Owned(normalize_text(&decode_lossy(data)).into_bytes())),
        }
    }
}

/// Decode UTF-8, dropping any invalid byte sequences.
fn decode_lossy(data: &[u8]) -> String {
    data.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Canonical JSON: recursively sorted keys, compact separators, ASCII only.
pub fn normalize_json(data: &str) -> CalcResult<String> {
    let parsed: Value = serde_json::from_str(data)
        .map_err(|e| CalcError::malformed(format!("invalid JSON data: {}", e)))?;

    let mut out = Vec::with_capacity(data.len());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    serde::Serialize::serialize(&sort_keys(parsed), &mut serializer)?;

    // The formatter only ever writes ASCII.
    String::from_utf8(out).map_err(|e| CalcError::malformed(e.to_string()))
}

/// Rebuild every object so its keys are in lexicographic order, whatever
/// ordering `serde_json::Map` uses.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Compact formatter that escapes non-ASCII characters as `\uXXXX` and
/// writes floats in shortest round-trip form with `e+XX`/`e-XX` exponents.
struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_literal(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                let mut buf = [0u8; 1];
                writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Shortest round-trip float text: positional for decimal exponents in
/// `-4..16` (always with a fractional part), scientific otherwise.
fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{}{}", sign, scientific);
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits = mantissa.replace('.', "");

    if !(-4..16).contains(&exponent) {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let padding = "0".repeat(int_len - digits.len());
        format!("{}{}{}.0", sign, digits, padding)
    } else {
        format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
    }
}

/// Whitespace canonicalization for free text.
pub fn normalize_text(data: &str) -> String {
    let trimmed = data.trim();
    let unified = LINE_ENDINGS.replace_all(trimmed, "\n");
    let collapsed = BLANK_RUNS.replace_all(&unified, "\n\n");
    SPACE_RUNS.replace_all(&collapsed, " ").into_owned()
}
