//! MCP (Model Context Protocol) server for element capture
//!
//! Each MCP tool forwards to the matching entry of the [`ToolRegistry`](crate::tools::ToolRegistry).

pub mod handler;
pub use handler::CaptureServer;

use crate::tools::{CaptureElementParams, NavigateParams, ToolContext, ToolResult as InternalToolResult};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde_json::Value;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = match result.data {
            Some(data) => serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
            None => "Success".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

impl CaptureServer {
    fn run_tool(&self, name: &str, params: Value) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        let mut context = ToolContext::new(&session).with_options(self.options().clone());

        let result = self
            .registry()
            .execute(name, params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }
}

#[tool_router]
impl CaptureServer {
    /// Navigate to a URL
    #[tool(description = "Open a page in the browser; incomplete URLs like example.com are completed")]
    fn browser_navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        let params = serde_json::to_value(params.0).map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        self.run_tool("navigate", params)
    }

    /// Capture an element as a standalone HTML file
    #[tool(
        description = "Save the first element matching a CSS selector, with its matching CSS rules and linked stylesheets, as a standalone HTML file"
    )]
    fn browser_capture_element(&self, params: Parameters<CaptureElementParams>) -> Result<CallToolResult, McpError> {
        if params.0.selector.trim().is_empty() {
            return Err(McpError::invalid_params("selector must not be empty", None));
        }

        let params = serde_json::to_value(params.0).map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        self.run_tool("capture_element", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_success_result() {
        let result = convert_result(InternalToolResult::success_with(serde_json::json!({ "bytes": 10 }))).unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_convert_failure_result() {
        let err = convert_result(InternalToolResult::failure("No element matches '.x'")).unwrap_err();
        assert!(err.message.contains(".x"));
    }
}
