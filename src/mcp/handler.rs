use crate::browser::{BrowserSession, LaunchOptions};
use crate::config::CaptureOptions;
use crate::error::Result as CaptureResult;
use crate::tools::ToolRegistry;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server exposing element capture over a shared browser session
#[derive(Clone)]
pub struct CaptureServer {
    session: Arc<Mutex<BrowserSession>>,
    registry: Arc<ToolRegistry>,
    options: CaptureOptions,
    tool_router: ToolRouter<Self>,
}

impl CaptureServer {
    /// Launch a headless browser with default capture options
    pub fn new() -> CaptureResult<Self> {
        Self::with_options(LaunchOptions::default(), CaptureOptions::default())
    }

    /// Launch a browser with the given options
    pub fn with_options(launch: LaunchOptions, options: CaptureOptions) -> CaptureResult<Self> {
        let session = BrowserSession::launch(launch)?;
        Ok(Self::with_session(session, options))
    }

    /// Serve an existing session
    pub fn with_session(session: BrowserSession, options: CaptureOptions) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            registry: Arc::new(ToolRegistry::with_defaults()),
            options,
            tool_router: Self::tool_router(),
        }
    }

    pub(crate) fn session(&self) -> std::result::Result<MutexGuard<'_, BrowserSession>, McpError> {
        self.session
            .lock()
            .map_err(|e| McpError::internal_error(format!("Browser session unavailable: {}", e), None))
    }

    pub(crate) fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }
}

#[tool_handler]
impl ServerHandler for CaptureServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Navigate to a page with browser_navigate, then save an element with its matching CSS \
                 as a standalone HTML file with browser_capture_element."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
