use crate::capture::cloner::ElementCloner;
use crate::capture::path_resolver::PathResolver;
use crate::capture::selection::SelectionTracker;
use crate::capture::style_collector::{linked_stylesheets, match_rules};
use crate::dom::{NodeHandle, Page};
use crate::config::CaptureOptions;
use crate::error::Result;
use crate::export::{CapturedArtifact, ExportReceipt, Exporter, FileExporter};

/// An activation (click) on an element that should be captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub target: NodeHandle,
    default_prevented: bool,
}

impl TriggerEvent {
    pub fn new(target: NodeHandle) -> Self {
        Self { target, default_prevented: false }
    }

    /// Suppress the page's own handling of the activation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Owns the highlight state and turns trigger events into exported artifacts
pub struct CaptureOrchestrator<E: Exporter> {
    tracker: SelectionTracker,
    exporter: E,
}

impl<E: Exporter> CaptureOrchestrator<E> {
    pub fn new(exporter: E) -> Self {
        Self { tracker: SelectionTracker::new(), exporter }
    }

    /// Builder method: replace the selection tracker (e.g. a custom marker)
    pub fn with_tracker(mut self, tracker: SelectionTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn into_exporter(self) -> E {
        self.exporter
    }

    /// Pointer entered an element
    pub fn hover(&mut self, page: &mut Page, target: NodeHandle) -> Result<()> {
        self.tracker.hover(page, target)
    }

    /// Capture the event's target and hand the artifact to the exporter.
    ///
    /// The owning document is resolved before the highlight is touched, so a
    /// target that cannot be reached (unknown node, cross-origin frame) fails
    /// with the selection left as it was.
    pub fn capture(&mut self, page: &mut Page, event: &mut TriggerEvent) -> Result<ExportReceipt> {
        event.prevent_default();
        let target = event.target;

        page.context(target)?;
        self.tracker.restore(page);

        let artifact = build_artifact(page, target)?;
        log::debug!("Captured {:?} ({} bytes)", target, artifact.len());

        self.exporter.export(artifact)
    }
}

impl CaptureOrchestrator<FileExporter> {
    /// File-backed orchestrator using the configured output location and marker
    pub fn from_options(options: &CaptureOptions) -> Self {
        Self::new(FileExporter::from_options(options))
            .with_tracker(SelectionTracker::with_marker(&options.highlight_outline))
    }
}

/// Clone the element, collect its rules and linked sheets, and assemble the document
pub fn build_artifact(page: &Page, target: NodeHandle) -> Result<CapturedArtifact> {
    let context = page.context(target)?;
    let element = page.element(target)?;

    let resolver = PathResolver::for_context(&context);
    let clone = ElementCloner::new(&resolver).clone_element(element);
    let css = match_rules(element, context.stylesheets());
    let linked = linked_stylesheets(context.document);

    Ok(CapturedArtifact::assemble(&linked, &css, &clone))
}
