use crate::dom::{NodeHandle, Page};
use crate::error::Result;

/// Outline applied to the hovered element
pub const HIGHLIGHT_OUTLINE: &str = "2px dashed red";

/// The single highlight slot shared by every document of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    /// Currently highlighted element, if any
    pub current: Option<NodeHandle>,
    /// Inline outline the element had before it was highlighted
    pub saved_outline: String,
}

/// Tracks which element carries the highlight outline.
///
/// Idle until the first hover; each hover restores the previous element's
/// outline before marking the new one, and a capture restores and returns to idle.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    state: HighlightState,
    marker: String,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::with_marker(HIGHLIGHT_OUTLINE)
    }

    /// Use a different outline value as the visual marker
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self { state: HighlightState::default(), marker: marker.into() }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn current(&self) -> Option<NodeHandle> {
        self.state.current
    }

    pub fn is_idle(&self) -> bool {
        self.state.current.is_none()
    }

    /// Pointer entered `target`: move the highlight there.
    ///
    /// Fails without touching any state when `target` cannot be reached.
    pub fn hover(&mut self, page: &mut Page, target: NodeHandle) -> Result<()> {
        page.element(target)?;

        self.restore(page);

        let element = page.element_mut(target)?;
        self.state.saved_outline = element.style_property("outline");
        element.set_style_property("outline", &self.marker);
        self.state.current = Some(target);

        log::debug!("Highlighted {:?}", target);
        Ok(())
    }

    /// Put back the highlighted element's outline and go idle.
    /// Returns the element that was highlighted.
    pub fn restore(&mut self, page: &mut Page) -> Option<NodeHandle> {
        let HighlightState { current, saved_outline } = std::mem::take(&mut self.state);
        let handle = current?;

        match page.element_mut(handle) {
            Ok(element) => element.set_style_property("outline", &saved_outline),
            Err(e) => log::debug!("Highlighted element no longer reachable: {}", e),
        }

        Some(handle)
    }
}
