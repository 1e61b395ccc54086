//! Document model for captured pages
//!
//! This module provides an owned, snapshot representation of a web page:
//! - ElementNode / DomNode: element tree with ordered attributes, text and comments
//! - Document / Page / Frame: a main document and its iframes, with cross-origin access outcomes
//! - StyleSheet / CssRule: the CSSOM view of a document's stylesheets
//! - outer_html: markup serialization
//! - PageSnapshot: the JSON form produced by the live-page extraction script

pub mod document;
pub mod element;
pub mod serialize;
pub mod snapshot;
pub mod stylesheet;

pub use document::{Document, DocumentContext, DocumentRef, Frame, FrameAccess, NodeHandle, Page};
pub use element::{DomNode, ElementNode, NodeId};
pub use serialize::{inner_html, outer_html};
pub use snapshot::{DocumentSnapshot, FrameSnapshot, PageSnapshot, TargetSnapshot};
pub use stylesheet::{CssRule, SheetAccess, StyleSheet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_markup_round_trips_through_serializer() {
        let doc = Document::parse("https://ex.com/", r#"<p class="a">x &amp; <b>y</b><br></p>"#).unwrap();
        let p = doc.first_by_tag("p").unwrap();
        assert_eq!(outer_html(p), r#"<p class="a">x &amp; <b>y</b><br></p>"#);
        assert_eq!(inner_html(p.element_children().next().unwrap()), "y");
    }

    #[test]
    fn test_page_export() {
        let doc = Document::parse("https://ex.com/", "<p>hi</p>").unwrap();
        let page = Page::new(doc);
        assert!(page.frames.is_empty());
        assert!(page.main.first_by_tag("p").is_some());
    }
}
