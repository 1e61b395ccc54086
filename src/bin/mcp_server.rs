//! Element capture MCP server
//!
//! Serves `browser_navigate` and `browser_capture_element` over stdio to MCP clients.

use clap::Parser;
use element_capture::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use element_capture::config::CaptureOptions;
use element_capture::mcp::CaptureServer;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "capture-mcp-server")]
#[command(version)]
#[command(about = "Element capture MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// JSON file with capture options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory captured elements are written to
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => CaptureOptions::from_file(path)?,
        None => CaptureOptions::default(),
    };
    if let Some(dir) = cli.output_dir {
        options = options.output_dir(dir);
    }

    eprintln!("Element capture MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Output directory: {}", options.output_dir.display());

    let server = match cli.ws_endpoint {
        Some(endpoint) => {
            eprintln!("WebSocket endpoint: {}", endpoint);
            let session = BrowserSession::connect(ConnectionOptions::new(endpoint))?;
            CaptureServer::with_session(session, options)
        }
        None => {
            let mut launch = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = cli.executable_path {
                eprintln!("Browser executable: {}", path.display());
                launch = launch.chrome_path(path);
            }
            if let Some(dir) = cli.user_data_dir {
                launch = launch.user_data_dir(dir);
            }
            eprintln!("Browser mode: {}", if launch.headless { "headless" } else { "headed" });
            CaptureServer::with_options(launch, options)?
        }
    };

    eprintln!("Ready to accept MCP connections via stdio");
    let running = server.serve(stdio()).await?;
    let quit_reason = running.waiting().await?;
    log::info!("Server quit with reason: {:?}", quit_reason);

    Ok(())
}
