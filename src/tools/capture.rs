use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for the capture_element tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureElementParams {
    /// CSS selector of the element to capture
    pub selector: String,

    /// Directory to write into (defaults to the configured output directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Artifact file name (default: element.html)
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Tool that captures an element of the current page as a standalone HTML file
#[derive(Default)]
pub struct CaptureElementTool;

impl Tool for CaptureElementTool {
    type Params = CaptureElementParams;

    fn name(&self) -> &str {
        "capture_element"
    }

    fn execute_typed(&self, params: CaptureElementParams, context: &mut ToolContext) -> Result<ToolResult> {
        let mut options = context.options.clone();
        if let Some(dir) = params.output_dir {
            options = options.output_dir(dir);
        }
        if let Some(name) = params.file_name {
            options = options.file_name(name);
        }

        let receipt = context.session.capture_selector(&params.selector, &options)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "selector": params.selector,
            "file_name": receipt.file_name,
            "path": receipt.location,
            "bytes": receipt.bytes
        })))
    }
}
