//! Captured artifacts and where they go

use crate::config::CaptureOptions;
use crate::dom::{ElementNode, outer_html, serialize::escape_attribute};
use crate::error::{CaptureError, Result};
use std::io::Write;
use std::path::PathBuf;

/// Default name of the downloaded document
pub const DEFAULT_FILE_NAME: &str = "element.html";

/// The standalone HTML document produced by a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedArtifact {
    html: String,
}

impl CapturedArtifact {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Assemble the document: linked sheets by reference, matched rules inline,
    /// the cloned element as body content.
    pub fn assemble(linked_stylesheets: &[String], css: &str, body: &ElementNode) -> Self {
        let mut html = String::from("<!DOCTYPE html><html><head>\n");
        for href in linked_stylesheets {
            html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape_attribute(href)));
        }
        html.push_str("<style>");
        html.push_str(css);
        html.push_str("</style>\n</head><body>\n");
        html.push_str(&outer_html(body));
        html.push_str("\n</body></html>\n");

        Self { html }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// What an exporter did with an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub file_name: String,
    /// Where the artifact landed, for exporters that write files
    pub location: Option<PathBuf>,
    pub bytes: usize,
}

/// Receives finished artifacts
pub trait Exporter {
    fn export(&mut self, artifact: CapturedArtifact) -> Result<ExportReceipt>;
}

impl<E: Exporter + ?Sized> Exporter for Box<E> {
    fn export(&mut self, artifact: CapturedArtifact) -> Result<ExportReceipt> {
        (**self).export(artifact)
    }
}

/// Writes artifacts into a directory.
///
/// Content is staged in a temporary file next to the target and persisted
/// with a rename; the staging file is removed if anything fails.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
    file_name: String,
}

impl FileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), file_name: DEFAULT_FILE_NAME.to_string() }
    }

    pub fn from_options(options: &CaptureOptions) -> Self {
        Self::new(&options.output_dir).with_file_name(&options.file_name)
    }

    /// Builder method: set the output file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Exporter for FileExporter {
    fn export(&mut self, artifact: CapturedArtifact) -> Result<ExportReceipt> {
        if self.file_name.is_empty() || self.file_name.contains(['/', '\\']) {
            return Err(CaptureError::ExportFailed(format!("Invalid file name '{}'", self.file_name)));
        }

        std::fs::create_dir_all(&self.dir)?;

        let mut staging = tempfile::NamedTempFile::new_in(&self.dir)?;
        staging.write_all(artifact.html().as_bytes())?;
        staging.flush()?;

        let target = self.target_path();
        staging.persist(&target).map_err(|e| CaptureError::Io(e.error))?;

        log::info!("Saved {} bytes to {}", artifact.len(), target.display());

        Ok(ExportReceipt {
            file_name: self.file_name.clone(),
            location: Some(target),
            bytes: artifact.len(),
        })
    }
}

/// Keeps artifacts in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    artifacts: Vec<CapturedArtifact>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[CapturedArtifact] {
        &self.artifacts
    }

    pub fn last(&self) -> Option<&CapturedArtifact> {
        self.artifacts.last()
    }
}

impl Exporter for MemoryExporter {
    fn export(&mut self, artifact: CapturedArtifact) -> Result<ExportReceipt> {
        let bytes = artifact.len();
        self.artifacts.push(artifact);

        Ok(ExportReceipt { file_name: DEFAULT_FILE_NAME.to_string(), location: None, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> CapturedArtifact {
        let body = ElementNode::new("div").with_attribute("class", "card").with_text("Hi");
        CapturedArtifact::assemble(
            &["https://ex.com/a.css".to_string(), "https://ex.com/b.css?v=1&t=2".to_string()],
            ".card { color: red; }\n",
            &body,
        )
    }

    #[test]
    fn test_assemble_shape() {
        let html = artifact().into_html();

        assert!(html.starts_with("<!DOCTYPE html><html><head>\n"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"https://ex.com/a.css\">\n"));
        assert!(html.contains("href=\"https://ex.com/b.css?v=1&amp;t=2\""));
        assert!(html.contains("<style>.card { color: red; }\n</style>"));
        assert!(html.contains("</head><body>\n<div class=\"card\">Hi</div>\n</body></html>"));

        let a = html.find("a.css").unwrap();
        let b = html.find("b.css").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_file_exporter_writes_element_html() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = FileExporter::new(dir.path().join("out"));

        let receipt = exporter.export(artifact()).unwrap();

        let path = dir.path().join("out").join("element.html");
        assert_eq!(receipt.location.as_deref(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), artifact().into_html());

        // only the final file remains
        let entries = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_exporter_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = FileExporter::new(dir.path()).with_file_name("card.html");

        exporter.export(CapturedArtifact::new("first")).unwrap();
        let receipt = exporter.export(CapturedArtifact::new("second")).unwrap();

        assert_eq!(receipt.bytes, 6);
        assert_eq!(std::fs::read_to_string(dir.path().join("card.html")).unwrap(), "second");
    }

    #[test]
    fn test_file_exporter_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = FileExporter::new(dir.path()).with_file_name("../escape.html");
        assert!(matches!(exporter.export(artifact()), Err(CaptureError::ExportFailed(_))));
    }

    #[test]
    fn test_memory_exporter() {
        let mut exporter: Box<dyn Exporter> = Box::new(MemoryExporter::new());
        let receipt = exporter.export(artifact()).unwrap();
        assert_eq!(receipt.file_name, "element.html");
        assert!(receipt.location.is_none());
    }
}
