//! Element capture pipeline
//!
//! - PathResolver: absolute URLs for `src`/`href`/`data-src`/`data-href`
//! - ElementCloner: independent copies of element subtrees with resolved URLs
//! - StyleCollector: matching stylesheet rules and linked stylesheet URLs
//! - SelectionTracker: the single hover highlight
//! - CaptureOrchestrator: trigger event to exported artifact
//! - EventAdapter: routes hover/activation events from attached documents

pub mod cloner;
pub mod events;
pub mod orchestrator;
pub mod path_resolver;
pub mod selection;
pub mod style_collector;

pub use cloner::ElementCloner;
pub use events::{EventAdapter, EventOutcome, PageEvent};
pub use orchestrator::{CaptureOrchestrator, TriggerEvent, build_artifact};
pub use path_resolver::{PathResolver, URL_ATTRIBUTES};
pub use selection::{HIGHLIGHT_OUTLINE, HighlightState, SelectionTracker};
pub use style_collector::{StyleSignature, linked_stylesheets, match_rules, matching_rules};
