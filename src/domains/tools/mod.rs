//! Tools domain module.
//!
//! This module exposes the calculator as MCP tools. Each tool validates its
//! arguments, runs a computation from `domains::calculator` and renders the
//! result as Markdown or JSON.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/calc/` or `definitions/hash/`
//! 2. Define a params struct implementing `FromArguments` and a unit struct
//!    implementing `CalculatorTool`
//! 3. Export it from the parent `mod.rs`
//! 4. Add its route in `router.rs` and its name and handler in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
