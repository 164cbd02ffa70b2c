//! Domains module containing business logic organized by bounded contexts.
//!
//! `calculator` holds the computations and knows nothing about MCP; `tools`
//! adapts each computation into an MCP tool.

pub mod calculator;
pub mod tools;
