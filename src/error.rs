use thiserror::Error;

/// Errors produced while capturing elements or driving the browser
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Chrome could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Could not attach to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation did not start or complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Tab lookup or lifecycle operation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// JavaScript evaluation in the page failed
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// HTML, CSS or snapshot data could not be turned into the document model
    #[error("Failed to parse DOM: {0}")]
    DomParseFailed(String),

    /// No element matches the given selector or handle
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A document or stylesheet belongs to another origin
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// An attribute value could not be resolved to an absolute URL
    #[error("Malformed URL '{value}': {reason}")]
    MalformedUrl { value: String, reason: String },

    /// Handing the artifact to the exporter failed
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },

    /// Tool name is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool ran but did not succeed
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_url_message() {
        let err = CaptureError::MalformedUrl {
            value: "http://[::1".to_string(),
            reason: "invalid IPv6 address".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed URL 'http://[::1': invalid IPv6 address");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CaptureError = io.into();
        assert!(matches!(err, CaptureError::Io(_)));
    }
}
