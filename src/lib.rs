//! Calculator MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing deterministic calculator
//! tools: arithmetic, advanced math, trigonometry, statistics, unit
//! conversion and hashing.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, path security, the MCP server
//!   handler and the stdio/tcp/http transports
//! - **domains**: business logic organized by bounded contexts
//!   - **calculator**: pure computations, validation and result formatting
//!   - **tools**: the MCP tool layer wrapping each calculator operation
//!
//! # Example
//!
//! ```rust,no_run
//! use calculator_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
