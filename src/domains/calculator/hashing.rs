//! Digest computation over text, files, base64 and hex inputs.
//!
//! Inputs are first turned into a [`HashSource`] by the validator, then read,
//! normalized and hashed here. Digests are lowercase hex.

use std::borrow::Cow;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use blake2::Blake2b512;
use md5::Md5;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

use super::error::{CalcError, CalcResult};
use super::normalize::Normalization;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
    /// BLAKE2b with a 512-bit digest.
    Blake2b,
    /// CRC-32 checksum, rendered as 8 hex characters.
    Crc32,
}

impl HashAlgorithm {
    /// Wire name of the algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_512 => "sha3_512",
            Self::Blake2b => "blake2b",
            Self::Crc32 => "crc32",
        }
    }

    /// Compute the lowercase hex digest of `data`.
    pub fn digest(self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hex_digest::<Md5>(data),
            Self::Sha1 => hex_digest::<Sha1>(data),
            Self::Sha256 => hex_digest::<Sha256>(data),
            Self::Sha512 => hex_digest::<Sha512>(data),
            Self::Sha3_256 => hex_digest::<Sha3_256>(data),
            Self::Sha3_512 => hex_digest::<Sha3_512>(data),
            Self::Blake2b => hex_digest::<Blake2b512>(data),
            Self::Crc32 => format!("{:08x}", crc32fast::hash(data)),
        }
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

/// How `input_data` should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Literal text, hashed as UTF-8.
    Text,
    /// Path to a file whose contents are hashed.
    File,
    /// Base64-encoded bytes.
    Base64,
    /// Hex-encoded bytes.
    Hex,
}

impl InputType {
    /// Wire name of the input type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }
}

/// Decode standard, padded base64.
pub fn decode_base64(raw: &str) -> CalcResult<Vec<u8>> {
    STANDARD
        .decode(raw)
        .map_err(|e| CalcError::malformed(format!("invalid base64 encoded data: {}", e)))
}

/// Decode an even-length hex string.
pub fn decode_hex(raw: &str) -> CalcResult<Vec<u8>> {
    hex::decode(raw).map_err(|e| CalcError::malformed(format!("invalid hex encoded data: {}", e)))
}

/// A validated input, ready to be read.
#[derive(Debug, Clone, PartialEq)]
pub enum HashSource {
    Text(String),
    /// A regular file; `size` comes from metadata taken during validation.
    File { path: PathBuf, size: u64 },
    /// Already decoded base64 or hex payload.
    Bytes(Vec<u8>),
}

impl HashSource {
    /// Raw bytes of the input. Only file sources touch the filesystem.
    pub fn read(&self) -> CalcResult<Cow<'_, [u8]>> {
        match self {
            Self::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            Self::File { path, .. } => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|e| CalcError::io(path, e)),
        }
    }
}

/// Digest plus the sizes that went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct HashOutcome {
    pub digest: String,
    pub input_size: usize,
    pub normalized_size: usize,
    /// Path and on-disk size for file inputs.
    pub file: Option<(PathBuf, u64)>,
}

/// Read, normalize and hash one source.
pub fn hash_source(
    source: &HashSource,
    algorithm: HashAlgorithm,
    normalization: Normalization,
) -> CalcResult<HashOutcome> {
    let data = source.read()?;
    let normalized = normalization.apply(&data)?;

    Ok(HashOutcome {
        digest: algorithm.digest(&normalized),
        input_size: data.len(),
        normalized_size: normalized.len(),
        file: match source {
            HashSource::File { path, size } => Some((path.clone(), *size)),
            _ => None,
        },
    })
}

/// Case-insensitive comparison of two hex digests.
pub fn digests_match(calculated: &str, expected: &str) -> bool {
    calculated.trim().eq_ignore_ascii_case(expected.trim())
}

/// Outcome of one entry in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub input: String,
    pub outcome: CalcResult<HashOutcome>,
}

/// Hash every input independently; a failing entry never aborts the batch.
///
/// Each item carries the raw input string and either its validated source
/// or the validation error raised for it.
pub fn hash_batch<I>(items: I, algorithm: HashAlgorithm, normalization: Normalization) -> Vec<BatchItem>
where
    I: IntoIterator<Item = (String, CalcResult<HashSource>)>,
{
    items
        .into_iter()
        .map(|(input, source)| BatchItem {
            outcome: source.and_then(|s| hash_source(&s, algorithm, normalization)),
            input,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HELLO: &str = "Hello, World!";
    const HELLO_SHA256: &str = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f";

    fn text(s: &str) -> HashSource {
        HashSource::Text(s.to_string())
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(HashAlgorithm::Sha256.digest(HELLO.as_bytes()), HELLO_SHA256);
        assert_eq!(
            HashAlgorithm::Md5.digest(HELLO.as_bytes()),
            "65a8e27d8879283831b664bd8b7f0ad4"
        );
        assert_eq!(
            HashAlgorithm::Sha1.digest(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            HashAlgorithm::Sha256.digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            HashAlgorithm::Sha3_256.digest(b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_digest_lengths() {
        let cases = [
            (HashAlgorithm::Md5, 32),
            (HashAlgorithm::Sha1, 40),
            (HashAlgorithm::Sha256, 64),
            (HashAlgorithm::Sha512, 128),
            (HashAlgorithm::Sha3_256, 64),
            (HashAlgorithm::Sha3_512, 128),
            (HashAlgorithm::Blake2b, 128),
            (HashAlgorithm::Crc32, 8),
        ];
        for (algorithm, len) in cases {
            let digest = algorithm.digest(HELLO.as_bytes());
            assert_eq!(digest.len(), len, "{}", algorithm.as_str());
            assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_crc32_fixed_width() {
        assert_eq!(HashAlgorithm::Crc32.digest(b"123456789"), "cbf43926");
        assert_eq!(HashAlgorithm::Crc32.digest(b""), "00000000");
    }

    #[test]
    fn test_sha256_is_deterministic() {
        let first = hash_source(&text(HELLO), HashAlgorithm::Sha256, Normalization::None).unwrap();
        let second = hash_source(&text(HELLO), HashAlgorithm::Sha256, Normalization::None).unwrap();
        assert_eq!(first.digest, HELLO_SHA256);
        assert_eq!(first, second);
        assert_eq!(first.input_size, 13);
        assert_eq!(first.normalized_size, 13);
    }

    #[test]
    fn test_encodings_of_same_bytes_agree() {
        let from_hex = HashSource::Bytes(decode_hex("48656c6c6f2c20576f726c6421").unwrap());
        let from_b64 = HashSource::Bytes(decode_base64("SGVsbG8sIFdvcmxkIQ==").unwrap());
        for source in [from_hex, from_b64] {
            let outcome = hash_source(&source, HashAlgorithm::Sha256, Normalization::None).unwrap();
            assert_eq!(outcome.digest, HELLO_SHA256);
        }
    }

    #[test]
    fn test_malformed_encodings() {
        assert!(matches!(decode_base64("not base64!"), Err(CalcError::MalformedInput(_))));
        assert!(matches!(decode_hex("abc"), Err(CalcError::MalformedInput(_))));
    }

    #[test]
    fn test_json_normalization_ignores_key_order() {
        let a = hash_source(&text(r#"{"a":1,"b":2}"#), HashAlgorithm::Sha256, Normalization::Json).unwrap();
        let b = hash_source(&text(r#"{"b":2,"a":1}"#), HashAlgorithm::Sha256, Normalization::Json).unwrap();
        assert_eq!(a.digest, b.digest);

        let raw_a = hash_source(&text(r#"{"a":1,"b":2}"#), HashAlgorithm::Sha256, Normalization::None).unwrap();
        let raw_b = hash_source(&text(r#"{"b":2,"a":1}"#), HashAlgorithm::Sha256, Normalization::None).unwrap();
        assert_ne!(raw_a.digest, raw_b.digest);
    }

    #[test]
    fn test_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, HELLO).unwrap();

        let source = HashSource::File { path: path.clone(), size: 13 };
        let outcome = hash_source(&source, HashAlgorithm::Sha256, Normalization::None).unwrap();
        assert_eq!(outcome.digest, HELLO_SHA256);
        assert_eq!(outcome.file, Some((path, 13)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = HashSource::File {
            path: PathBuf::from("/definitely/not/here.bin"),
            size: 0,
        };
        assert!(matches!(
            hash_source(&source, HashAlgorithm::Md5, Normalization::None),
            Err(CalcError::Io { .. })
        ));
    }

    #[test]
    fn test_digest_comparison_ignores_case() {
        assert!(digests_match(HELLO_SHA256, &HELLO_SHA256.to_uppercase()));
        assert!(!digests_match(HELLO_SHA256, "deadbeef"));
    }

    #[test]
    fn test_batch_isolates_failures_and_keeps_order() {
        let missing = HashSource::File {
            path: PathBuf::from("/definitely/not/here.bin"),
            size: 0,
        };
        let items = vec![
            ("abc".to_string(), Ok(text("abc"))),
            ("bad".to_string(), Err(CalcError::malformed("broken"))),
            ("/definitely/not/here.bin".to_string(), Ok(missing)),
            (HELLO.to_string(), Ok(text(HELLO))),
        ];
        let results = hash_batch(items, HashAlgorithm::Sha256, Normalization::None);

        assert_eq!(results.len(), 4);
        let inputs: Vec<_> = results.iter().map(|r| r.input.as_str()).collect();
        assert_eq!(inputs, ["abc", "bad", "/definitely/not/here.bin", HELLO]);
        assert!(results[0].outcome.is_ok());
        assert!(matches!(results[1].outcome, Err(CalcError::MalformedInput(_))));
        assert!(matches!(results[2].outcome, Err(CalcError::Io { .. })));
        assert_eq!(results[3].outcome.as_ref().unwrap().digest, HELLO_SHA256);
    }
}
