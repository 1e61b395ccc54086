//! Event adapter between page events and the capture state machines

use crate::capture::orchestrator::{CaptureOrchestrator, TriggerEvent};
use crate::dom::{DocumentRef, FrameAccess, NodeHandle, Page};
use crate::error::Result;
use crate::export::{ExportReceipt, Exporter};

/// Events the adapter reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Pointer moved onto an element
    PointerEnter(NodeHandle),
    /// Element was clicked or otherwise activated
    Activate(TriggerEvent),
}

/// What handling an event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Highlighted(NodeHandle),
    Captured(ExportReceipt),
    /// The event came from a document without listeners
    Ignored,
}

/// Routes events from attached documents to a [`CaptureOrchestrator`].
///
/// Listeners are attached once, to the main document and every iframe whose
/// document is readable at that moment. Frames added later stay unattached.
pub struct EventAdapter<E: Exporter> {
    orchestrator: CaptureOrchestrator<E>,
    attached: Vec<DocumentRef>,
}

impl<E: Exporter> EventAdapter<E> {
    pub fn new(orchestrator: CaptureOrchestrator<E>) -> Self {
        Self { orchestrator, attached: Vec::new() }
    }

    /// Attach to the page's documents, skipping cross-origin frames
    pub fn attach(&mut self, page: &Page) -> &[DocumentRef] {
        self.attached.clear();
        self.attached.push(DocumentRef::Main);

        for (index, frame) in page.frames.iter().enumerate() {
            match &frame.access {
                FrameAccess::Accessible(_) => self.attached.push(DocumentRef::Frame(index)),
                FrameAccess::CrossOrigin { origin } => {
                    log::warn!(
                        "Cannot access iframe contents: {} (origin {})",
                        frame.src,
                        origin.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }

        log::debug!("Listening on {} document(s)", self.attached.len());
        &self.attached
    }

    pub fn is_attached(&self, document: DocumentRef) -> bool {
        self.attached.contains(&document)
    }

    pub fn attached(&self) -> &[DocumentRef] {
        &self.attached
    }

    pub fn orchestrator(&self) -> &CaptureOrchestrator<E> {
        &self.orchestrator
    }

    /// Handle one event to completion
    pub fn dispatch(&mut self, page: &mut Page, event: PageEvent) -> Result<EventOutcome> {
        let target = match &event {
            PageEvent::PointerEnter(target) => *target,
            PageEvent::Activate(trigger) => trigger.target,
        };

        if !self.is_attached(target.document) {
            log::debug!("Ignoring event from unattached document {:?}", target.document);
            return Ok(EventOutcome::Ignored);
        }

        match event {
            PageEvent::PointerEnter(target) => {
                self.orchestrator.hover(page, target)?;
                Ok(EventOutcome::Highlighted(target))
            }
            PageEvent::Activate(mut trigger) => {
                let receipt = self.orchestrator.capture(page, &mut trigger)?;
                Ok(EventOutcome::Captured(receipt))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Frame, NodeId};
    use crate::export::MemoryExporter;

    fn page() -> Page {
        let main = Document::parse("https://ex.com/", "<html><body><p id='x'>hi</p></body></html>").unwrap();
        let frame = Document::parse("https://ex.com/f.html", "<html><body><b>f</b></body></html>").unwrap();
        Page::new(main)
            .with_frame(Frame::cross_origin("https://other.net/", None))
            .with_frame(Frame::accessible("/f.html", frame))
    }

    #[test]
    fn test_attach_skips_cross_origin() {
        let page = page();
        let mut adapter = EventAdapter::new(CaptureOrchestrator::new(MemoryExporter::new()));

        let attached = adapter.attach(&page).to_vec();
        assert_eq!(attached, vec![DocumentRef::Main, DocumentRef::Frame(1)]);
        assert!(!adapter.is_attached(DocumentRef::Frame(0)));
    }

    #[test]
    fn test_late_frames_are_not_discovered() {
        let mut page = page();
        let mut adapter = EventAdapter::new(CaptureOrchestrator::new(MemoryExporter::new()));
        adapter.attach(&page);

        let late = Document::parse("https://ex.com/late.html", "<html><body></body></html>").unwrap();
        let late_ref = page.add_frame(Frame::accessible("/late.html", late));

        let outcome = adapter
            .dispatch(&mut page, PageEvent::PointerEnter(NodeHandle::new(late_ref, NodeId(0))))
            .unwrap();
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(adapter.orchestrator().tracker().is_idle());
    }

    #[test]
    fn test_hover_then_activate() {
        let mut page = page();
        let mut adapter = EventAdapter::new(CaptureOrchestrator::new(MemoryExporter::new()));
        adapter.attach(&page);
        let bold = NodeHandle::new(DocumentRef::Frame(1), NodeId(3));

        let outcome = adapter.dispatch(&mut page, PageEvent::PointerEnter(bold)).unwrap();
        assert_eq!(outcome, EventOutcome::Highlighted(bold));

        let outcome = adapter
            .dispatch(&mut page, PageEvent::Activate(TriggerEvent::new(bold)))
            .unwrap();
        assert!(matches!(outcome, EventOutcome::Captured(_)));

        let html = adapter.orchestrator().exporter().last().unwrap().html();
        assert!(html.contains("<b>f</b>"));
    }
}
