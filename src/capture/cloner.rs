use crate::capture::path_resolver::PathResolver;
use crate::dom::ElementNode;

/// Deep-copies element subtrees, normalizing URLs at every depth
#[derive(Debug, Clone, Copy)]
pub struct ElementCloner<'a> {
    resolver: &'a PathResolver,
}

impl<'a> ElementCloner<'a> {
    pub fn new(resolver: &'a PathResolver) -> Self {
        Self { resolver }
    }

    /// Return an independent copy of `source` with absolute URLs.
    ///
    /// The copy carries no node ids, so nothing in it points back into the
    /// source document.
    pub fn clone_element(&self, source: &ElementNode) -> ElementNode {
        let mut clone = source.clone();
        clone.clear_node_ids();
        self.normalize(&mut clone);
        clone
    }

    fn normalize(&self, element: &mut ElementNode) {
        self.resolver.normalize_attributes(element);
        for child in element.element_children_mut() {
            self.normalize(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomNode;
    use url::Url;

    fn source() -> ElementNode {
        ElementNode::new("div").with_attribute("class", "card").with_children(vec![
            ElementNode::new("a").with_attribute("href", "/about").with_children(vec![
                ElementNode::new("img").with_attribute("src", "images/a.png"),
            ]),
            ElementNode::new("section").with_children(vec![ElementNode::new("div").with_children(vec![
                ElementNode::new("img")
                    .with_attribute("src", "https://cdn.net/b.png")
                    .with_attribute("data-src", "/lazy/b.png"),
            ])]),
        ])
    }

    #[test]
    fn test_clone_is_non_destructive() {
        let resolver = PathResolver::from_url(Url::parse("https://ex.com/shop/").unwrap());
        let mut original = source();
        let mut next = 0;
        original.assign_node_ids(&mut next);
        let before = original.clone();

        let clone = ElementCloner::new(&resolver).clone_element(&original);

        assert_eq!(original, before);
        assert_ne!(clone, original);
        assert!(clone.elements().all(|e| e.node_id.is_none()));
    }

    #[test]
    fn test_urls_resolved_at_every_depth() {
        let resolver = PathResolver::from_url(Url::parse("https://ex.com/shop/").unwrap());
        let clone = ElementCloner::new(&resolver).clone_element(&source());

        let srcs: Vec<_> = clone.elements().filter_map(|e| e.get_attribute("src")).collect();
        assert_eq!(srcs, vec!["https://ex.com/shop/images/a.png", "https://cdn.net/b.png"]);

        let link = clone.elements().find(|e| e.is_tag("a")).unwrap();
        assert_eq!(link.get_attribute("href"), Some("https://ex.com/about"));

        let lazy = clone.elements().find_map(|e| e.get_attribute("data-src")).unwrap();
        assert_eq!(lazy, "https://ex.com/lazy/b.png");
    }

    #[test]
    fn test_text_and_comments_are_copied() {
        let resolver = PathResolver::from_url(Url::parse("https://ex.com/").unwrap());
        let mut source = ElementNode::new("p").with_text("Hello");
        source.children.push(DomNode::Comment { text: "c".to_string() });

        let clone = ElementCloner::new(&resolver).clone_element(&source);
        assert_eq!(clone.children, source.children);
    }
}
