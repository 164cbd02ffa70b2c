//! Field-by-field extraction of tool arguments.
//!
//! Deserializing the whole argument object at once loses track of which
//! field was wrong. These helpers pull one field at a time so every failure
//! is reported as a validation error naming that field.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domains::calculator::{CalcError, CalcResult};

/// Raw argument object of a tool call.
pub type Arguments = Map<String, Value>;

/// Construction of a params struct from a raw argument object.
pub trait FromArguments: Sized {
    fn from_arguments(args: &Arguments) -> CalcResult<Self>;
}

/// A field that must be present and non-null.
pub fn required<T: DeserializeOwned>(args: &Arguments, field: &str) -> CalcResult<T> {
    optional(args, field)?.ok_or_else(|| CalcError::validation(field, "field is required"))
}

/// A field that may be absent or null.
pub fn optional<T: DeserializeOwned>(args: &Arguments, field: &str) -> CalcResult<Option<T>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| CalcError::validation(field, e.to_string())),
    }
}

/// A field that falls back to its type's default when absent.
pub fn or_default<T: DeserializeOwned + Default>(args: &Arguments, field: &str) -> CalcResult<T> {
    Ok(optional(args, field)?.unwrap_or_default())
}
