//! # element-capture
//!
//! Capture any element of a web page as a standalone HTML document: the element's markup with
//! absolute asset URLs, the CSS rules that mention it, and links to the page's stylesheets.
//!
//! ## Features
//!
//! - **Capture pipeline**: path resolution, non-destructive cloning, rule collection and a single
//!   hover highlight, driven by explicit state machines
//! - **Iframes**: same-origin frames are captured in their own document context; cross-origin
//!   frames and stylesheets are skipped with a warning
//! - **Page sources**: static HTML parsed with `scraper`, or live pages snapshotted through Chrome
//! - **MCP Server**: `browser_navigate` and `browser_capture_element` for AI agents
//!
//! ## Capturing from static HTML
//!
//! ```rust,no_run
//! use element_capture::capture::{CaptureOrchestrator, TriggerEvent};
//! use element_capture::config::CaptureOptions;
//! use element_capture::dom::{Document, NodeHandle, Page};
//!
//! # fn main() -> element_capture::Result<()> {
//! let html = r#"<html><head><style>.card { color: red; }</style></head>
//!               <body><div class="card"><img src="/logo.png"></div></body></html>"#;
//! let (document, node) = Document::parse_selecting("https://ex.com/", html, ".card")?;
//! let mut page = Page::new(document);
//! let target = NodeHandle::main(node.expect("selector matched"));
//!
//! let mut orchestrator = CaptureOrchestrator::from_options(&CaptureOptions::new().output_dir("out"));
//! orchestrator.hover(&mut page, target)?;
//! let receipt = orchestrator.capture(&mut page, &mut TriggerEvent::new(target))?;
//! println!("Wrote {} bytes", receipt.bytes);
//! # Ok(())
//! # }
//! ```
//!
//! ## Capturing from a live page
//!
//! ```rust,no_run
//! use element_capture::{BrowserSession, CaptureOptions, LaunchOptions};
//!
//! # fn main() -> element_capture::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! let receipt = session.capture_selector("h1", &CaptureOptions::default())?;
//! println!("Saved to {:?}", receipt.location);
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust,no_run
//! use element_capture::{BrowserSession, LaunchOptions};
//! use element_capture::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> element_capture::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&session);
//!
//! registry.execute("navigate", json!({"url": "example.com"}), &mut context)?;
//! registry.execute("capture_element", json!({"selector": "h1"}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`capture`]: the capture pipeline and its event adapter
//! - [`dom`]: owned document model, HTML serialization and page snapshots
//! - [`browser`]: Chrome session management and live-page snapshots
//! - [`export`]: artifact assembly and exporters
//! - [`tools`]: named tools with JSON parameters
//! - [`config`]: capture options
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod browser;
pub mod capture;
pub mod config;
pub mod dom;
pub mod error;
pub mod export;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use capture::{CaptureOrchestrator, EventAdapter, PathResolver, SelectionTracker, TriggerEvent};
pub use config::CaptureOptions;
pub use dom::{Document, ElementNode, NodeHandle, Page};
pub use error::{CaptureError, Result};
pub use export::{CapturedArtifact, ExportReceipt, Exporter, FileExporter, MemoryExporter};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::CaptureServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
