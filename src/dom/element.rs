use crate::dom::stylesheet::{join_declarations, parse_declarations};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of an element within its owning document (pre-order position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// A child of an element: nested element, text, or comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DomNode {
    Element(ElementNode),
    Text { text: String },
    Comment { text: String },
}

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "img", "a")
    pub tag_name: String,

    /// Element attributes in source order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,

    /// Position of this element in its document, assigned when the document is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            node_id: None,
        }
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder method: append element children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children.extend(children.into_iter().map(DomNode::Element));
        self
    }

    /// Add a single attribute, replacing any previous value
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, keeping the order of the others
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(DomNode::Element(child));
    }

    /// Add a text child
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(DomNode::Text { text: text.into() });
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Element children, skipping text and comments
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|child| match child {
            DomNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Mutable element children, skipping text and comments
    pub fn element_children_mut(&mut self) -> impl Iterator<Item = &mut ElementNode> {
        self.children.iter_mut().filter_map(|child| match child {
            DomNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_list().any(|c| c == class_name)
    }

    /// Classes in attribute order
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class").unwrap_or("").split_whitespace()
    }

    /// Get element ID, treating an empty attribute as absent
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id").filter(|id| !id.is_empty())
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Read one inline style property, empty when not set
    pub fn style_property(&self, name: &str) -> String {
        self.get_attribute("style")
            .map(parse_declarations)
            .unwrap_or_default()
            .into_iter()
            .rev()
            .find(|(property, _)| property.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    /// Set one inline style property. An empty value removes it, and the
    /// `style` attribute goes away with its last declaration.
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        let mut declarations = self.get_attribute("style").map(parse_declarations).unwrap_or_default();
        let value = value.trim();

        let position = declarations.iter().position(|(property, _)| property.eq_ignore_ascii_case(name));

        if value.is_empty() {
            declarations.retain(|(property, _)| !property.eq_ignore_ascii_case(name));
        } else if let Some(pos) = position {
            declarations[pos].1 = value.to_string();
            // later duplicates would otherwise win on read
            let mut index = 0;
            declarations.retain(|(property, _)| {
                let keep = index <= pos || !property.eq_ignore_ascii_case(name);
                index += 1;
                keep
            });
        } else {
            declarations.push((name.to_string(), value.to_string()));
        }

        if declarations.is_empty() {
            self.remove_attribute("style");
        } else {
            self.add_attribute("style", join_declarations(&declarations));
        }
    }

    /// Iterate this element and all descendant elements in pre-order
    pub fn elements(&self) -> Elements<'_> {
        Elements { stack: vec![self] }
    }

    /// Find a descendant (or self) by node id
    pub fn find(&self, id: NodeId) -> Option<&ElementNode> {
        self.elements().find(|element| element.node_id == Some(id))
    }

    /// Find a descendant (or self) by node id, mutably
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        if self.node_id == Some(id) {
            return Some(self);
        }
        self.element_children_mut().find_map(|child| child.find_mut(id))
    }

    /// Number elements in pre-order starting from `next`
    pub(crate) fn assign_node_ids(&mut self, next: &mut usize) {
        self.node_id = Some(NodeId(*next));
        *next += 1;
        for child in self.element_children_mut() {
            child.assign_node_ids(next);
        }
    }

    /// Drop node ids so the subtree no longer refers to its source document
    pub(crate) fn clear_node_ids(&mut self) {
        self.node_id = None;
        for child in self.element_children_mut() {
            child.clear_node_ids();
        }
    }
}

/// Pre-order iterator over elements
pub struct Elements<'a> {
    stack: Vec<&'a ElementNode>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        let children: Vec<_> = element.element_children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(element)
    }
}
