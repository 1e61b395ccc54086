//! Markup serialization for the element model

use crate::dom::element::{DomNode, ElementNode};

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize an element and its subtree, like `Element.outerHTML`
pub fn outer_html(element: &ElementNode) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

/// Serialize only the children of an element, like `Element.innerHTML`
pub fn inner_html(element: &ElementNode) -> String {
    let mut out = String::new();
    write_children(element, &mut out);
    out
}

/// Escape an attribute value for a double-quoted context
pub fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

fn write_element(element: &ElementNode, out: &mut String) {
    let tag = element.tag_name.to_ascii_lowercase();

    out.push('<');
    out.push_str(&tag);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag.as_str()) {
        return;
    }

    write_children(element, out);

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn write_children(element: &ElementNode, out: &mut String) {
    let raw = RAW_TEXT_ELEMENTS.iter().any(|t| element.is_tag(t));

    for child in &element.children {
        match child {
            DomNode::Element(child) => write_element(child, out),
            DomNode::Text { text } if raw => out.push_str(text),
            DomNode::Text { text } => out.push_str(&html_escape::encode_text(text)),
            DomNode::Comment { text } => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_markup() {
        let element = ElementNode::new("div")
            .with_attribute("class", "card")
            .with_children(vec![
                ElementNode::new("img").with_attribute("src", "https://ex.com/a.png"),
                ElementNode::new("p").with_text("Hi"),
            ]);

        assert_eq!(
            outer_html(&element),
            r#"<div class="card"><img src="https://ex.com/a.png"><p>Hi</p></div>"#
        );
    }

    #[test]
    fn test_escaping() {
        let element = ElementNode::new("a")
            .with_attribute("href", "https://ex.com/?a=1&b=\"2\"")
            .with_text("1 < 2 & 3");

        let html = outer_html(&element);
        assert!(html.contains("href=\"https://ex.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(html.contains(">1 &lt; 2 &amp; 3</a>"));
    }

    #[test]
    fn test_raw_text_and_comments() {
        let mut script = ElementNode::new("script");
        script.add_text("if (a < b) {}");
        let mut div = ElementNode::new("div");
        div.children.push(DomNode::Comment { text: " note ".to_string() });
        div.add_child(script);

        assert_eq!(outer_html(&div), "<div><!-- note --><script>if (a < b) {}</script></div>");
        assert_eq!(inner_html(&div), "<!-- note --><script>if (a < b) {}</script>");
    }
}
