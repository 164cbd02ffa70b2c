//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    AdvancedMathTool, BasicOperationTool, BatchHashTool, CalculatorTool, HashCalculationTool,
    HashComparisonTool, StatisticsTool, TrigonometricTool, UnitConversionTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(BasicOperationTool::create_route(config.clone()))
        .with_route(AdvancedMathTool::create_route(config.clone()))
        .with_route(TrigonometricTool::create_route(config.clone()))
        .with_route(StatisticsTool::create_route(config.clone()))
        .with_route(UnitConversionTool::create_route(config.clone()))
        .with_route(HashCalculationTool::create_route(config.clone()))
        .with_route(HashComparisonTool::create_route(config.clone()))
        .with_route(BatchHashTool::create_route(config))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        assert_eq!(tools.len(), 8);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"calculator_basic_operation"));
        assert!(names.contains(&"calculator_advanced_math"));
        assert!(names.contains(&"calculator_trigonometric"));
        assert!(names.contains(&"calculator_statistics"));
        assert!(names.contains(&"calculator_unit_conversion"));
        assert!(names.contains(&"calculator_hash_calculation"));
        assert!(names.contains(&"calculator_hash_comparison"));
        assert!(names.contains(&"calculator_batch_hash"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let config = test_config();
        let registry = ToolRegistry::new(config.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(config);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_input_schemas_list_required_fields() {
        let tools = ToolRegistry::get_all_tools();
        let basic = tools
            .iter()
            .find(|t| t.name == BasicOperationTool::NAME)
            .unwrap();
        let required = basic.input_schema.get("required").unwrap().as_array().unwrap();
        assert!(required.contains(&serde_json::json!("operation")));
        assert!(required.contains(&serde_json::json!("a")));
        assert!(!required.contains(&serde_json::json!("response_format")));
    }
}
