use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            capture::{CaptureOrchestrator, TriggerEvent},
            config::CaptureOptions,
            dom::{NodeHandle, Page, PageSnapshot},
            error::{CaptureError, Result},
            export::ExportReceipt};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Page extraction script: a function taking an optional CSS selector and
/// returning the JSON form of [`PageSnapshot`]
const EXTRACT_PAGE_JS: &str = include_str!("extract_page.js");

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));

        // Keep the browser alive between captures; the default idle timeout is 30 seconds
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| CaptureError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| CaptureError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// The tab captures run against (the most recently opened one)
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| CaptureError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?;

        tabs.last()
            .cloned()
            .ok_or_else(|| CaptureError::TabOperationFailed("No open tab".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| CaptureError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| CaptureError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Snapshot the active tab: main document, stylesheets and iframes.
    ///
    /// With a selector, the first matching element (main document first, then
    /// readable iframes in order) is returned as a handle.
    pub fn snapshot_page(&self, selector: Option<&str>) -> Result<(Page, Option<NodeHandle>)> {
        let script = format!("({})({})", EXTRACT_PAGE_JS, serde_json::to_string(&selector)?);

        let result = self
            .tab()?
            .evaluate(&script, false)
            .map_err(|e| CaptureError::EvaluationFailed(format!("Failed to execute page extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| CaptureError::DomParseFailed("No value returned from page extraction".to_string()))?;

        // The script returns a JSON string
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| CaptureError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        let snapshot: PageSnapshot = serde_json::from_str(&json_str)
            .map_err(|e| CaptureError::DomParseFailed(format!("Failed to parse page snapshot: {}", e)))?;

        snapshot.into_page()
    }

    /// Capture the first element matching `selector` on the current page into a file
    pub fn capture_selector(&self, selector: &str, options: &CaptureOptions) -> Result<ExportReceipt> {
        let (mut page, target) = self.snapshot_page(Some(selector))?;
        let target = target.ok_or_else(|| CaptureError::ElementNotFound(format!("No element matches '{}'", selector)))?;

        let mut orchestrator = CaptureOrchestrator::from_options(options);
        orchestrator.hover(&mut page, target)?;
        orchestrator.capture(&mut page, &mut TriggerEvent::new(target))
    }

    /// Close every tab; the browser process exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| CaptureError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}
