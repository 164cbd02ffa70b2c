//! Calculator domain: pure math, unit conversion and hashing libraries plus
//! input validation and result formatting.
//!
//! Nothing in here knows about MCP. The tool definitions in
//! `domains::tools::definitions` validate arguments, call into these
//! modules and render a [`Report`].

pub mod advanced;
pub mod arithmetic;
mod error;
pub mod format;
pub mod hashing;
pub mod normalize;
pub mod statistics;
pub mod trigonometry;
pub mod units;
pub mod validate;

pub use advanced::AdvancedOperation;
pub use arithmetic::BasicOperation;
pub use error::{CalcError, CalcResult, finite};
pub use format::{Details, Field, Report, ResponseFormat};
pub use hashing::{HashAlgorithm, HashOutcome, HashSource, InputType};
pub use normalize::Normalization;
pub use statistics::{StatisticsOperation, StatisticsOutcome, Summary};
pub use trigonometry::TrigOperation;
pub use units::UnitFamily;
