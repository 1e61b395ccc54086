//! Command-line element capture
//!
//! `capture-file` works on a saved HTML file and needs no browser;
//! `capture-url` loads the page in Chrome first.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use element_capture::browser::{BrowserSession, LaunchOptions};
use element_capture::capture::{CaptureOrchestrator, TriggerEvent};
use element_capture::config::CaptureOptions;
use element_capture::dom::{Document, NodeHandle, Page};
use element_capture::tools::utils::normalize_url;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "element-capture")]
#[command(version)]
#[command(about = "Save a page element with its CSS as a standalone HTML file", long_about = None)]
struct Cli {
    /// JSON file with capture options
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(long, short = 'o', global = true, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Output file name (default: element.html)
    #[arg(long, global = true, value_name = "NAME")]
    file_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture from a saved HTML file
    CaptureFile {
        /// HTML file to read
        #[arg(long, short = 'f', value_name = "PATH")]
        file: PathBuf,

        /// URL the page was served from; relative paths resolve against it
        #[arg(long, short = 'u', value_name = "URL")]
        url: String,

        /// CSS selector of the element to capture
        #[arg(long, short = 's')]
        selector: String,
    },
    /// Load a page in Chrome and capture from it
    CaptureUrl {
        /// Page to load
        #[arg(long, short = 'u', value_name = "URL")]
        url: String,

        /// CSS selector of the element to capture
        #[arg(long, short = 's')]
        selector: String,

        /// Launch browser in headed mode (default: headless)
        #[arg(long, short = 'H')]
        headed: bool,

        /// Path to custom browser executable
        #[arg(long, value_name = "PATH")]
        executable_path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => CaptureOptions::from_file(path)?,
        None => CaptureOptions::default(),
    };
    if let Some(dir) = cli.out {
        options = options.output_dir(dir);
    }
    if let Some(name) = cli.file_name {
        options = options.file_name(name);
    }

    let receipt = match cli.command {
        Command::CaptureFile { file, url, selector } => {
            let html = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let (document, target) = Document::parse_selecting(&normalize_url(&url), &html, &selector)?;
            let Some(node) = target else {
                bail!("no element matches '{}' in {}", selector, file.display());
            };

            let mut page = Page::new(document);
            let target = NodeHandle::main(node);
            let mut orchestrator = CaptureOrchestrator::from_options(&options);
            orchestrator.hover(&mut page, target)?;
            orchestrator.capture(&mut page, &mut TriggerEvent::new(target))?
        }
        Command::CaptureUrl { url, selector, headed, executable_path } => {
            let mut launch = LaunchOptions::new().headless(!headed);
            if let Some(path) = executable_path {
                launch = launch.chrome_path(path);
            }

            let session = BrowserSession::launch(launch)?;
            session.navigate(&normalize_url(&url))?;
            session.wait_for_navigation()?;
            session.capture_selector(&selector, &options)?
        }
    };

    match &receipt.location {
        Some(path) => println!("Saved {} bytes to {}", receipt.bytes, path.display()),
        None => println!("Captured {} bytes as {}", receipt.bytes, receipt.file_name),
    }

    Ok(())
}
