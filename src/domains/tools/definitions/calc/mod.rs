//! Math tools: arithmetic, advanced functions, trigonometry, statistics and
//! unit conversion.

pub mod advanced;
pub mod basic;
pub mod statistics;
pub mod trigonometric;
pub mod units;

pub use advanced::{AdvancedMathParams, AdvancedMathTool};
pub use basic::{BasicOperationParams, BasicOperationTool};
pub use statistics::{StatisticsParams, StatisticsTool};
pub use trigonometric::{TrigonometricParams, TrigonometricTool};
pub use units::{UnitConversionParams, UnitConversionTool};
