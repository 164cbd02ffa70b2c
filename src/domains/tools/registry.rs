//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

#[cfg(feature = "http")]
use super::ToolError;

use rmcp::model::Tool;

use crate::core::config::Config;

use super::definitions::{
    AdvancedMathTool, BasicOperationTool, BatchHashTool, CalculatorTool, HashCalculationTool,
    HashComparisonTool, StatisticsTool, TrigonometricTool, UnitConversionTool,
};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            BasicOperationTool::NAME,
            AdvancedMathTool::NAME,
            TrigonometricTool::NAME,
            StatisticsTool::NAME,
            UnitConversionTool::NAME,
            HashCalculationTool::NAME,
            HashComparisonTool::NAME,
            BatchHashTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            BasicOperationTool::to_tool(),
            AdvancedMathTool::to_tool(),
            TrigonometricTool::to_tool(),
            StatisticsTool::to_tool(),
            UnitConversionTool::to_tool(),
            HashCalculationTool::to_tool(),
            HashComparisonTool::to_tool(),
            BatchHashTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Calculator failures come back as `Ok` results with `isError` set;
    /// `Err` is reserved for unknown tools and malformed argument objects.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let config = self.config.clone();
        match name {
            BasicOperationTool::NAME => BasicOperationTool::http_handler(arguments, config),
            AdvancedMathTool::NAME => AdvancedMathTool::http_handler(arguments, config),
            TrigonometricTool::NAME => TrigonometricTool::http_handler(arguments, config),
            StatisticsTool::NAME => StatisticsTool::http_handler(arguments, config),
            UnitConversionTool::NAME => UnitConversionTool::http_handler(arguments, config),
            HashCalculationTool::NAME => HashCalculationTool::http_handler(arguments, config),
            HashComparisonTool::NAME => HashComparisonTool::http_handler(arguments, config),
            BatchHashTool::NAME => BatchHashTool::http_handler(arguments, config),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_config());
        let names = registry.tool_names();
        assert_eq!(names.len(), 8);
        assert!(names.iter().all(|n| n.starts_with("calculator_")));
        assert!(names.contains(&"calculator_hash_comparison"));
        assert!(names.contains(&"calculator_batch_hash"));
    }

    #[test]
    fn test_all_tools_have_descriptions() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some_and(|d| !d.is_empty()));
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_basic() {
        let registry = ToolRegistry::new(test_config());
        let result = registry
            .call_tool(
                "calculator_basic_operation",
                serde_json::json!({ "operation": "multiply", "a": 6, "b": 7 }),
            )
            .unwrap();
        assert_eq!(result["isError"], false);
        assert!(result["content"][0]["text"].as_str().unwrap().ends_with("**42.0**"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_reports_calc_errors_in_result() {
        let registry = ToolRegistry::new(test_config());
        let result = registry
            .call_tool(
                "calculator_basic_operation",
                serde_json::json!({ "operation": "divide", "a": 1, "b": 0 }),
            )
            .unwrap();
        assert_eq!(result["isError"], true);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_config());
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::NotFound(_))));

        let result = registry.call_tool("calculator_statistics", serde_json::json!([1, 2]));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
