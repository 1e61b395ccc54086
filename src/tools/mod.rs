//! Tool system: typed operations dispatched by name with JSON parameters

pub mod capture;
pub mod navigate;
pub mod utils;

pub use capture::{CaptureElementParams, CaptureElementTool};
pub use navigate::{NavigateParams, NavigateTool};

use crate::browser::BrowserSession;
use crate::config::CaptureOptions;
use crate::error::{CaptureError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Everything a tool may touch while it runs
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,
    pub options: CaptureOptions,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, options: CaptureOptions::default() }
    }

    /// Builder method: set capture options
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }
}

/// Uniform tool response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

/// A browser operation with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of [`Tool::Params`]
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Parse JSON parameters and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params = serde_json::from_value(params).map_err(|e| CaptureError::InvalidParams {
            tool: self.name().to_string(),
            reason: e.to_string(),
        })?;
        self.execute_typed(params, context)
    }
}

/// Object-safe view of a [`Tool`] for the registry
trait ErasedTool: Send + Sync {
    fn schema(&self) -> Value;
    fn call(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> ErasedTool for T {
    fn schema(&self) -> Value {
        self.parameters_schema()
    }

    fn call(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        self.execute(params, context)
    }
}

/// Name-indexed collection of tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(CaptureElementTool);
        registry
    }

    /// Add a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Box::new(tool)).is_some() {
            log::debug!("Replaced tool '{}'", name);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Parameter schema of a registered tool
    pub fn schema(&self, name: &str) -> Option<Value> {
        self.tools.get(name).map(|tool| tool.schema())
    }

    /// Run a tool by name
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| CaptureError::UnknownTool(name.to_string()))?;

        log::debug!("Executing tool '{}'", name);
        tool.call(params, context)
    }
}
