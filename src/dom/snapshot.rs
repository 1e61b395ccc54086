//! Building [`Document`]s and [`Page`]s from static HTML or live-page snapshots

use crate::dom::document::{Document, DocumentRef, Frame, NodeHandle, Page};
use crate::dom::element::{DomNode, ElementNode, NodeId};
use crate::dom::stylesheet::StyleSheet;
use crate::error::{CaptureError, Result};
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

impl Document {
    /// Parse an HTML string loaded from `url`.
    ///
    /// Inline `<style>` blocks become readable stylesheets. Linked sheets are not
    /// fetched; add them with [`Document::add_stylesheet`] when their text is known.
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        let (document, _) = parse_document(url, html, None)?;
        Ok(document)
    }

    /// Parse an HTML string and locate the first element matching a CSS selector
    pub fn parse_selecting(url: &str, html: &str, selector: &str) -> Result<(Self, Option<NodeId>)> {
        let selector = Selector::parse(selector)
            .map_err(|e| CaptureError::DomParseFailed(format!("Invalid selector '{}': {}", selector, e)))?;
        parse_document(url, html, Some(&selector))
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| CaptureError::MalformedUrl { value: url.to_string(), reason: e.to_string() })
}

fn parse_document(url: &str, html: &str, selector: Option<&Selector>) -> Result<(Document, Option<NodeId>)> {
    let url = parse_url(url)?;
    let parsed = Html::parse_document(html);
    let target = selector.and_then(|s| parsed.select(s).next());

    let mut next = 0;
    let mut found = None;
    let root = convert_element(parsed.root_element(), target, &mut next, &mut found);

    let stylesheets = root
        .elements()
        .filter(|e| e.is_tag("style"))
        .map(|style| {
            let text: String = style
                .children
                .iter()
                .filter_map(|child| match child {
                    DomNode::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            StyleSheet::parse(None, &text)
        })
        .collect();

    log::debug!("Parsed {} with {} elements", url, next);

    Ok((Document::new(url, root, stylesheets), found))
}

fn convert_element<'a>(
    element: ElementRef<'a>,
    target: Option<ElementRef<'a>>,
    next: &mut usize,
    found: &mut Option<NodeId>,
) -> ElementNode {
    let mut node = ElementNode::new(element.value().name());
    for (name, value) in element.value().attrs() {
        node.add_attribute(name, value);
    }

    let id = NodeId(*next);
    *next += 1;
    node.node_id = Some(id);
    if target == Some(element) {
        *found = Some(id);
    }

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    node.add_child(convert_element(child, target, next, found));
                }
            }
            Node::Text(text) => node.add_text(text.text.to_string()),
            Node::Comment(comment) => node.children.push(DomNode::Comment { text: comment.comment.to_string() }),
            _ => {}
        }
    }

    node
}

/// Serialized form of one document, as produced by the page extraction script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub url: String,
    pub root: ElementNode,
    #[serde(default)]
    pub stylesheets: Vec<StyleSheet>,
}

impl DocumentSnapshot {
    pub fn into_document(self) -> Result<Document> {
        Ok(Document::new(parse_url(&self.url)?, self.root, self.stylesheets))
    }
}

/// Serialized iframe: `document` is absent when the frame could not be read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub src: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub document: Option<DocumentSnapshot>,
}

/// Element matched by the extraction script's selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetSnapshot {
    /// Index into the snapshot's frames; absent for the main document
    #[serde(default)]
    pub frame: Option<usize>,
    pub node_id: usize,
}

/// Whole-page snapshot returned by the page extraction script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub main: DocumentSnapshot,
    #[serde(default)]
    pub frames: Vec<FrameSnapshot>,
    #[serde(default)]
    pub target: Option<TargetSnapshot>,
}

impl PageSnapshot {
    /// Convert into a [`Page`] plus the handle of the selected element, if any
    pub fn into_page(self) -> Result<(Page, Option<NodeHandle>)> {
        let mut page = Page::new(self.main.into_document()?);

        for frame in self.frames {
            match frame.document {
                Some(document) => {
                    page.add_frame(Frame::accessible(frame.src, document.into_document()?));
                }
                None => {
                    log::warn!("Cannot access iframe contents: {}", frame.src);
                    page.add_frame(Frame::cross_origin(frame.src, frame.origin));
                }
            }
        }

        let target = self.target.map(|t| {
            let document = t.frame.map_or(DocumentRef::Main, DocumentRef::Frame);
            NodeHandle::new(document, NodeId(t.node_id))
        });

        Ok((page, target))
    }
}
