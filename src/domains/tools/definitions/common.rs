//! Behavior shared by every calculator tool.
//!
//! A tool only supplies its name, description, params type and a `compute`
//! function returning a [`Report`]. Parsing, rendering, error conversion and
//! the rmcp/HTTP plumbing are provided here.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use std::sync::Arc;
use tracing::{debug, warn};

use super::arguments::{Arguments, FromArguments};
use crate::core::config::Config;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;
use crate::domains::calculator::{CalcError, CalcResult, Report, ResponseFormat};

/// A calculator operation exposed as an MCP tool.
pub trait CalculatorTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Validated request parameters.
    type Params: FromArguments + JsonSchema + 'static;

    /// Run the computation.
    fn compute(params: &Self::Params, config: &Config) -> CalcResult<Report>;

    /// Output format requested in `params`.
    fn response_format(params: &Self::Params) -> ResponseFormat;

    /// Compute and render. Failures become an `"Error: ..."` result.
    fn execute(params: &Self::Params, config: &Config) -> CallToolResult {
        let format = Self::response_format(params);
        match Self::compute(params, config).and_then(|report| success_result(&report, format)) {
            Ok(result) => result,
            Err(e) => error_result(Self::NAME, &e),
        }
    }

    /// Parse a raw argument object, then execute.
    fn execute_arguments(args: &Arguments, config: &Config) -> CallToolResult {
        debug!("{} called with {} argument(s)", Self::NAME, args.len());
        match Self::Params::from_arguments(args) {
            Ok(params) => Self::execute(&params, config),
            Err(e) => error_result(Self::NAME, &e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, ToolError> {
        let args = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => Arguments::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "expected a JSON object for {}, got {}",
                    Self::NAME,
                    other
                )));
            }
        };

        let result = Self::execute_arguments(&args, &config);

        // Serialize the full CallToolResult to preserve all fields including structuredContent
        serde_json::to_value(&result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<Self::Params>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move { Ok::<_, McpError>(Self::execute_arguments(&args, &config)) }.boxed()
        })
    }
}

/// Render a report. JSON responses also carry the report as structured content.
fn success_result(report: &Report, format: ResponseFormat) -> CalcResult<CallToolResult> {
    let text = report.render(format)?;
    let structured_content = match format {
        ResponseFormat::Json => Some(report.to_value()?),
        ResponseFormat::Markdown => None,
    };
    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content,
        is_error: Some(false),
        meta: None,
    })
}

fn error_result(tool: &str, error: &CalcError) -> CallToolResult {
    warn!("{} failed: {}", tool, error);
    CallToolResult::error(vec![Content::text(format!("Error: {}", error))])
}

/// Text of the first content block of a result.
#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

/// Build an argument object from a `json!` literal.
#[cfg(test)]
pub(crate) fn test_args(value: serde_json::Value) -> Arguments {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}
