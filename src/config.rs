use crate::capture::selection::HIGHLIGHT_OUTLINE;
use crate::error::{CaptureError, Result};
use crate::export::DEFAULT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for captures and their output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureOptions {
    /// Directory the artifact is written to
    pub output_dir: PathBuf,

    /// Name of the written artifact
    pub file_name: String,

    /// Outline value used to mark the hovered element
    pub highlight_outline: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            highlight_outline: HIGHLIGHT_OUTLINE.to_string(),
        }
    }
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| CaptureError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Builder method: set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Builder method: set the highlight outline
    pub fn highlight_outline(mut self, outline: impl Into<String>) -> Self {
        self.highlight_outline = outline.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = CaptureOptions::default();
        assert_eq!(opts.file_name, "element.html");
        assert_eq!(opts.highlight_outline, "2px dashed red");
        assert_eq!(opts.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_builder() {
        let opts = CaptureOptions::new().output_dir("/tmp/captures").file_name("hero.html");
        assert_eq!(opts.output_dir, PathBuf::from("/tmp/captures"));
        assert_eq!(opts.file_name, "hero.html");
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.json");
        std::fs::write(&path, r#"{"file_name": "snippet.html"}"#).unwrap();

        let opts = CaptureOptions::from_file(&path).unwrap();
        assert_eq!(opts.file_name, "snippet.html");
        assert_eq!(opts.highlight_outline, HIGHLIGHT_OUTLINE);

        std::fs::write(&path, "not json").unwrap();
        assert!(CaptureOptions::from_file(&path).is_err());
    }
}
