//! Hashing tools: single calculation, comparison against an expected digest,
//! and batch calculation.

pub mod batch;
pub mod calculate;
pub mod compare;

pub use batch::{BatchHashParams, BatchHashTool};
pub use calculate::{HashCalculationParams, HashCalculationTool};
pub use compare::{HashComparisonParams, HashComparisonTool};

use crate::domains::calculator::{Details, HashOutcome};

/// Append input/normalized sizes and, for files, the resolved path and size.
fn append_outcome(details: &mut Details, outcome: &HashOutcome) {
    details.insert("input_size_bytes", outcome.input_size);
    details.insert("normalized_size_bytes", outcome.normalized_size);
    if let Some((path, size)) = &outcome.file {
        details.insert("file_path", path.display().to_string());
        details.insert("file_size", *size);
    }
}
