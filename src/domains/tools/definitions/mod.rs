//! Tool definitions module.
//!
//! Each tool lives in its own file and implements [`CalculatorTool`]:
//! math tools under `calc/`, hashing tools under `hash/`.

pub mod arguments;
pub mod calc;
pub mod common;
pub mod hash;

pub use arguments::{Arguments, FromArguments};
pub use calc::{
    AdvancedMathTool, BasicOperationTool, StatisticsTool, TrigonometricTool, UnitConversionTool,
};
pub use common::CalculatorTool;
pub use hash::{BatchHashTool, HashCalculationTool, HashComparisonTool};
