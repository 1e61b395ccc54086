use crate::dom::element::{ElementNode, NodeId};
use crate::dom::stylesheet::StyleSheet;
use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// A parsed document: its URL, element tree and stylesheet set
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Address the document was loaded from
    pub url: Url,

    /// Root element (normally `<html>`)
    pub root: ElementNode,

    /// Stylesheets in `document.styleSheets` order
    pub stylesheets: Vec<StyleSheet>,
}

impl Document {
    /// Create a document, numbering its elements in pre-order
    pub fn new(url: Url, mut root: ElementNode, stylesheets: Vec<StyleSheet>) -> Self {
        let mut next = 0;
        root.assign_node_ids(&mut next);
        Self { url, root, stylesheets }
    }

    /// Serialized origin of the document URL (e.g. `https://ex.com`)
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Base URL for relative references, honoring the first `<base href>`
    pub fn base_url(&self) -> Url {
        self.root
            .elements()
            .find(|e| e.is_tag("base") && e.has_attribute("href"))
            .and_then(|base| base.get_attribute("href"))
            .and_then(|href| self.url.join(href).ok())
            .unwrap_or_else(|| self.url.clone())
    }

    /// Append a stylesheet (e.g. a linked sheet fetched by the caller)
    pub fn add_stylesheet(&mut self, sheet: StyleSheet) {
        self.stylesheets.push(sheet);
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        self.root.find(id)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        self.root.find_mut(id)
    }

    /// First element with the given tag name
    pub fn first_by_tag(&self, tag: &str) -> Option<&ElementNode> {
        self.root.elements().find(|e| e.is_tag(tag))
    }

    /// Element with the given `id` attribute
    pub fn element_by_id(&self, id: &str) -> Option<&ElementNode> {
        self.root.elements().find(|e| e.id() == Some(id))
    }
}

/// Which document of a page an element lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentRef {
    Main,
    /// Index into [`Page::frames`]
    Frame(usize),
}

/// Address of an element anywhere in a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle {
    pub document: DocumentRef,
    pub node: NodeId,
}

impl NodeHandle {
    pub fn new(document: DocumentRef, node: NodeId) -> Self {
        Self { document, node }
    }

    /// Handle to an element of the main document
    pub fn main(node: NodeId) -> Self {
        Self::new(DocumentRef::Main, node)
    }
}

/// Whether an iframe's document could be read
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAccess {
    Accessible(Document),
    /// `contentDocument` threw or was null
    CrossOrigin { origin: Option<String> },
}

/// An iframe of the main document
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The iframe's `src`
    pub src: String,
    pub access: FrameAccess,
}

impl Frame {
    pub fn accessible(src: impl Into<String>, document: Document) -> Self {
        Self { src: src.into(), access: FrameAccess::Accessible(document) }
    }

    pub fn cross_origin(src: impl Into<String>, origin: Option<String>) -> Self {
        Self { src: src.into(), access: FrameAccess::CrossOrigin { origin } }
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.access {
            FrameAccess::Accessible(document) => Some(document),
            FrameAccess::CrossOrigin { .. } => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.access {
            FrameAccess::Accessible(document) => Some(document),
            FrameAccess::CrossOrigin { .. } => None,
        }
    }
}

/// The owning document of an element, with what a capture needs from it
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    pub document_ref: DocumentRef,
    pub document: &'a Document,
    pub origin: String,
    pub base_url: Url,
}

impl<'a> DocumentContext<'a> {
    pub fn stylesheets(&self) -> &'a [StyleSheet] {
        &self.document.stylesheets
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.document_ref, DocumentRef::Frame(_))
    }
}

/// A page: the main document plus its iframes
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub main: Document,
    pub frames: Vec<Frame>,
}

impl Page {
    pub fn new(main: Document) -> Self {
        Self { main, frames: Vec::new() }
    }

    /// Builder method: add an iframe
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Add an iframe, returning its reference
    pub fn add_frame(&mut self, frame: Frame) -> DocumentRef {
        self.frames.push(frame);
        DocumentRef::Frame(self.frames.len() - 1)
    }

    pub fn document(&self, document: DocumentRef) -> Result<&Document> {
        match document {
            DocumentRef::Main => Ok(&self.main),
            DocumentRef::Frame(index) => {
                let frame = self
                    .frames
                    .get(index)
                    .ok_or_else(|| CaptureError::ElementNotFound(format!("No frame with index {}", index)))?;
                frame
                    .document()
                    .ok_or_else(|| CaptureError::AccessDenied(format!("iframe {} ({})", index, frame.src)))
            }
        }
    }

    pub fn document_mut(&mut self, document: DocumentRef) -> Result<&mut Document> {
        match document {
            DocumentRef::Main => Ok(&mut self.main),
            DocumentRef::Frame(index) => {
                let frame = self
                    .frames
                    .get_mut(index)
                    .ok_or_else(|| CaptureError::ElementNotFound(format!("No frame with index {}", index)))?;
                let src = frame.src.clone();
                frame
                    .document_mut()
                    .ok_or_else(|| CaptureError::AccessDenied(format!("iframe {} ({})", index, src)))
            }
        }
    }

    pub fn element(&self, handle: NodeHandle) -> Result<&ElementNode> {
        self.document(handle.document)?
            .element(handle.node)
            .ok_or_else(|| CaptureError::ElementNotFound(format!("{:?}", handle)))
    }

    pub fn element_mut(&mut self, handle: NodeHandle) -> Result<&mut ElementNode> {
        self.document_mut(handle.document)?
            .element_mut(handle.node)
            .ok_or_else(|| CaptureError::ElementNotFound(format!("{:?}", handle)))
    }

    /// Resolve the owning document of an element
    pub fn context(&self, handle: NodeHandle) -> Result<DocumentContext<'_>> {
        let document = self.document(handle.document)?;
        if document.element(handle.node).is_none() {
            return Err(CaptureError::ElementNotFound(format!("{:?}", handle)));
        }

        Ok(DocumentContext {
            document_ref: handle.document,
            document,
            origin: document.origin(),
            base_url: document.base_url(),
        })
    }

    /// Main document and every readable iframe document
    pub fn accessible_documents(&self) -> impl Iterator<Item = (DocumentRef, &Document)> {
        std::iter::once((DocumentRef::Main, &self.main)).chain(
            self.frames
                .iter()
                .enumerate()
                .filter_map(|(i, frame)| frame.document().map(|doc| (DocumentRef::Frame(i), doc))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(url: &str, root: ElementNode) -> Document {
        Document::new(Url::parse(url).unwrap(), root, Vec::new())
    }

    fn page() -> Page {
        let main = doc(
            "https://ex.com/blog/post.html",
            ElementNode::new("html").with_children(vec![ElementNode::new("body")
                .with_children(vec![ElementNode::new("p").with_attribute("id", "intro")])]),
        );
        let frame = doc("https://ex.com/embed.html", ElementNode::new("html"));

        Page::new(main)
            .with_frame(Frame::accessible("/embed.html", frame))
            .with_frame(Frame::cross_origin("https://ads.example.net/", Some("https://ads.example.net".to_string())))
    }

    #[test]
    fn test_node_ids_are_preorder() {
        let page = page();
        assert_eq!(page.main.root.node_id, Some(NodeId(0)));
        assert_eq!(page.main.element(NodeId(2)).and_then(|e| e.id()), Some("intro"));
        assert_eq!(page.main.element_by_id("intro").and_then(|e| e.node_id), Some(NodeId(2)));
    }

    #[test]
    fn test_origin_and_base_url() {
        let mut page = page();
        assert_eq!(page.main.origin(), "https://ex.com");
        assert_eq!(page.main.base_url().as_str(), "https://ex.com/blog/post.html");

        let head = ElementNode::new("base").with_attribute("href", "/static/");
        page.main.root.add_child(head);
        assert_eq!(page.main.base_url().as_str(), "https://ex.com/static/");
    }

    #[test]
    fn test_cross_origin_frame_is_denied() {
        let page = page();
        assert!(page.document(DocumentRef::Frame(0)).is_ok());
        assert!(matches!(page.document(DocumentRef::Frame(1)), Err(CaptureError::AccessDenied(_))));
        assert!(matches!(page.document(DocumentRef::Frame(7)), Err(CaptureError::ElementNotFound(_))));
    }

    #[test]
    fn test_context_resolution() {
        let page = page();

        let ctx = page.context(NodeHandle::main(NodeId(2))).unwrap();
        assert!(!ctx.is_frame());
        assert_eq!(ctx.origin, "https://ex.com");

        let ctx = page.context(NodeHandle::new(DocumentRef::Frame(0), NodeId(0))).unwrap();
        assert!(ctx.is_frame());
        assert_eq!(ctx.base_url.as_str(), "https://ex.com/embed.html");

        assert!(page.context(NodeHandle::main(NodeId(99))).is_err());
    }

    #[test]
    fn test_accessible_documents_skip_cross_origin() {
        let page = page();
        let refs: Vec<_> = page.accessible_documents().map(|(r, _)| r).collect();
        assert_eq!(refs, vec![DocumentRef::Main, DocumentRef::Frame(0)]);
    }
}
