//! Input validation for hash requests.
//!
//! Validation never reads file contents: file inputs are checked through the
//! path security layer and their metadata only.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::error::{CalcError, CalcResult};
use super::hashing::{HashSource, InputType, decode_base64, decode_hex};
use crate::core::config::Config;
use crate::core::security::validate_path;

static HEX_DATA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").unwrap());
static HEX_DIGEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-f]+$").unwrap());

/// Validate `raw` as an input of kind `input_type` and turn it into a source.
///
/// `field` names the request field in error messages. Text is taken as
/// given, so batch entries hash verbatim; every other kind is trimmed first.
pub fn hash_source(
    field: &str,
    input_type: InputType,
    raw: &str,
    config: &Config,
) -> CalcResult<HashSource> {
    match input_type {
        InputType::Text => Ok(HashSource::Text(raw.to_string())),
        InputType::File => file_source(field, raw.trim(), config),
        InputType::Base64 => decode_base64(raw.trim())
            .map(HashSource::Bytes)
            .map_err(|_| CalcError::validation(field, "invalid base64 encoded data")),
        InputType::Hex => {
            let raw = raw.trim();
            if !HEX_DATA.is_match(raw) {
                return Err(CalcError::validation(field, "invalid hex encoded data"));
            }
            decode_hex(raw)
                .map(HashSource::Bytes)
                .map_err(|_| CalcError::validation(field, "hex data must have an even length"))
        }
    }
}

fn file_source(field: &str, raw: &str, config: &Config) -> CalcResult<HashSource> {
    let path = validate_path(raw, config).map_err(|e| CalcError::validation(field, e.to_string()))?;

    let metadata = std::fs::metadata(&path).map_err(|e| CalcError::io(&path, e))?;
    if !metadata.is_file() {
        return Err(CalcError::validation(
            field,
            format!("path is not a file: {}", raw),
        ));
    }

    let limit = config.calculator.max_file_size;
    if metadata.len() > limit {
        return Err(CalcError::validation(
            field,
            format!(
                "file is {} bytes, larger than the {} byte limit",
                metadata.len(),
                limit
            ),
        ));
    }

    debug!("Validated file input {:?} ({} bytes)", path, metadata.len());
    Ok(HashSource::File {
        path,
        size: metadata.len(),
    })
}

/// Normalize an expected digest to trimmed lowercase hex.
pub fn expected_hash(raw: &str) -> CalcResult<String> {
    let normalized = raw.trim().to_lowercase();
    if !HEX_DIGEST.is_match(&normalized) {
        return Err(CalcError::validation(
            "expected_hash",
            "must be a hexadecimal string",
        ));
    }
    Ok(normalized)
}

/// Check the number of entries in a batch request.
pub fn batch_size(len: usize, config: &Config) -> CalcResult<()> {
    if len == 0 {
        return Err(CalcError::validation(
            "input_list",
            "must contain at least one input",
        ));
    }
    let limit = config.calculator.max_batch_size;
    if len > limit {
        return Err(CalcError::validation(
            "input_list",
            format!("contains {} inputs, more than the limit of {}", len, limit),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn assert_invalid(result: CalcResult<HashSource>, expected_field: &str) {
        match result {
            Err(CalcError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_text_source_keeps_whitespace() {
        let config = Config::default();
        let source = hash_source("input_data", InputType::Text, "  padded  ", &config).unwrap();
        assert_eq!(source, HashSource::Text("  padded  ".to_string()));
    }

    #[test]
    fn test_base64() {
        let config = Config::default();
        let source = hash_source("input_data", InputType::Base64, " SGk= ", &config).unwrap();
        assert_eq!(source, HashSource::Bytes(b"Hi".to_vec()));
        assert_invalid(
            hash_source("input_data", InputType::Base64, "@@@", &config),
            "input_data",
        );
    }

    #[test]
    fn test_hex() {
        let config = Config::default();
        let source = hash_source("input_data", InputType::Hex, "DEADbeef", &config).unwrap();
        assert_eq!(source, HashSource::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_invalid(hash_source("input_data", InputType::Hex, "xyz", &config), "input_data");
        assert_invalid(hash_source("input_data", InputType::Hex, "abc", &config), "input_data");
        assert_invalid(hash_source("input_data", InputType::Hex, "", &config), "input_data");
    }

    #[test]
    fn test_file_uses_metadata_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, [0u8; 64]).unwrap();

        let config = Config::default();
        let source = hash_source("input_data", InputType::File, path.to_str().unwrap(), &config).unwrap();
        match source {
            HashSource::File { size, .. } => assert_eq!(size, 64),
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[test]
    fn test_file_errors() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();

        let missing = dir.path().join("missing.txt");
        assert_invalid(
            hash_source("input_data", InputType::File, missing.to_str().unwrap(), &config),
            "input_data",
        );
        assert_invalid(
            hash_source("input_data", InputType::File, dir.path().to_str().unwrap(), &config),
            "input_data",
        );
    }

    #[test]
    fn test_file_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.bin");
        fs::write(&path, [1u8; 32]).unwrap();

        let mut config = Config::default();
        config.calculator.max_file_size = 16;
        assert_invalid(
            hash_source("input_data", InputType::File, path.to_str().unwrap(), &config),
            "input_data",
        );
    }

    #[test]
    fn test_file_outside_root_rejected() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let path = outside.path().join("secret.txt");
        fs::write(&path, "secret").unwrap();

        let mut config = Config::default();
        config.security.root_path = Some(root.path().to_path_buf());
        assert_invalid(
            hash_source("input_list[0]", InputType::File, path.to_str().unwrap(), &config),
            "input_list[0]",
        );
    }

    #[test]
    fn test_expected_hash() {
        assert_eq!(expected_hash("  ABCdef01 ").unwrap(), "abcdef01");
        assert!(matches!(
            expected_hash("not-a-hash"),
            Err(CalcError::Validation { .. })
        ));
        assert!(expected_hash("").is_err());
    }

    #[test]
    fn test_batch_size() {
        let mut config = Config::default();
        config.calculator.max_batch_size = 2;
        assert!(batch_size(1, &config).is_ok());
        assert!(batch_size(2, &config).is_ok());
        assert!(batch_size(0, &config).is_err());
        assert!(batch_size(3, &config).is_err());
    }
}
