use crate::error::{CaptureError, Result};
use crate::tools::{Tool, ToolContext, ToolResult, utils::normalize_url};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// Page to open; incomplete URLs such as `example.com` are completed
    pub url: String,

    /// Wait for the page to finish loading before returning (default: true)
    #[serde(default = "default_wait")]
    pub wait_for_load: bool,
}

fn default_wait() -> bool {
    true
}

/// Opens the page that later captures run against
#[derive(Default)]
pub struct NavigateTool;

impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn execute_typed(&self, params: NavigateParams, context: &mut ToolContext) -> Result<ToolResult> {
        let target = absolute_target(&params.url)?;
        log::debug!("Navigating to {}", target);

        context.session.navigate(target.as_str())?;
        if params.wait_for_load {
            context.session.wait_for_navigation()?;
        }

        let current = context.session.tab()?.get_url();

        Ok(ToolResult::success_with(serde_json::json!({
            "requested_url": params.url,
            "url": current,
            "waited": params.wait_for_load
        })))
    }
}

/// Captured documents resolve relative paths against the page URL, so only
/// absolute targets are accepted
fn absolute_target(input: &str) -> Result<Url> {
    let normalized = normalize_url(input);
    Url::parse(&normalized).map_err(|e| CaptureError::InvalidParams {
        tool: "navigate".to_string(),
        reason: format!("'{}' is not an absolute URL: {}", normalized, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_params_default() {
        let params: NavigateParams =
            serde_json::from_value(serde_json::json!({ "url": "https://example.com" })).unwrap();
        assert_eq!(params.url, "https://example.com");
        assert!(params.wait_for_load);
    }

    #[test]
    fn test_navigate_params_explicit_wait() {
        let params: NavigateParams =
            serde_json::from_value(serde_json::json!({ "url": "example.com", "wait_for_load": false })).unwrap();
        assert!(!params.wait_for_load);
    }

    #[test]
    fn test_absolute_target() {
        assert_eq!(absolute_target("example.com/shop").unwrap().as_str(), "https://example.com/shop");
        assert_eq!(absolute_target("localhost:8080").unwrap().as_str(), "http://localhost:8080/");
        assert_eq!(absolute_target("file:///tmp/page.html").unwrap().scheme(), "file");
    }

    #[test]
    fn test_relative_target_rejected() {
        let err = absolute_target("/shop/index.html").unwrap_err();
        assert!(matches!(err, CaptureError::InvalidParams { ref tool, .. } if tool == "navigate"));
    }

    #[test]
    fn test_navigate_tool_metadata() {
        let tool = NavigateTool;
        assert_eq!(tool.name(), "navigate");
        assert!(tool.parameters_schema().is_object());
    }
}
