//! Stylesheet rule discovery for captured elements
//!
//! Rule inclusion is a plain substring test: a rule is kept when its selector
//! text contains the element's signature key as a substring. The key is
//! `#id.class...` for elements with an id or classes and the bare tag name
//! otherwise. There is no cascade or specificity resolution, and a class such
//! as `card` also pulls in `.card-header` rules.

use crate::dom::{CssRule, Document, ElementNode, StyleSheet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag/id/class composite used as the rule-matching key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSignature {
    pub tag: String,
    /// Empty when the element has no id
    pub id: String,
    pub class_list: Vec<String>,
}

impl StyleSignature {
    pub fn of(element: &ElementNode) -> Self {
        Self {
            tag: element.tag_name.to_ascii_lowercase(),
            id: element.id().unwrap_or_default().to_string(),
            class_list: element.class_list().map(str::to_string).collect(),
        }
    }

    /// `tag#id.class1.class2`, with absent parts omitted
    pub fn selector(&self) -> String {
        let mut selector = self.tag.clone();
        if !self.id.is_empty() {
            selector.push('#');
            selector.push_str(&self.id);
        }
        for class in &self.class_list {
            selector.push('.');
            selector.push_str(class);
        }
        selector
    }

    /// Substring looked for in selector text.
    ///
    /// The type selector is left out when an id or class is present, so that
    /// `.card` and `div.card` both match a `<div class="card">`.
    pub fn match_key(&self) -> String {
        if self.id.is_empty() && self.class_list.is_empty() {
            return self.tag.clone();
        }
        let selector = self.selector();
        selector[self.tag.len()..].to_string()
    }

    /// Whether a rule's selector text mentions this signature
    pub fn matches(&self, rule: &CssRule) -> bool {
        let key = self.match_key();
        rule.selector_text.as_deref().is_some_and(|text| text.contains(&key))
    }
}

impl fmt::Display for StyleSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

/// Rules of readable stylesheets that mention the signature, in sheet-then-rule order.
/// Unreadable (cross-origin) sheets are skipped with a warning.
pub fn matching_rules<'a>(signature: &StyleSignature, stylesheets: &'a [StyleSheet]) -> Vec<&'a CssRule> {
    let mut matched = Vec::new();

    for sheet in stylesheets {
        let Some(rules) = sheet.rules() else {
            log::warn!("Cannot access CSS stylesheet: {}", sheet.label());
            continue;
        };

        for rule in rules {
            if rule.selector_text.is_none() {
                log::trace!("Skipping rule without selector text in {}", sheet.label());
            } else if signature.matches(rule) {
                matched.push(rule);
            }
        }
    }

    matched
}

/// Concatenated text (one rule per line) of every rule mentioning the element
pub fn match_rules(element: &ElementNode, stylesheets: &[StyleSheet]) -> String {
    let signature = StyleSignature::of(element);
    let rules = matching_rules(&signature, stylesheets);
    log::debug!("Matched {} CSS rules for {}", rules.len(), signature);

    let mut css = String::new();
    for rule in rules {
        css.push_str(&rule.css_text);
        css.push('\n');
    }
    css
}

/// Absolute `href` of every `<link rel="stylesheet">` in document order.
/// Links without an `href` are skipped.
pub fn linked_stylesheets(document: &Document) -> Vec<String> {
    let base = document.base_url();

    document
        .root
        .elements()
        .filter(|e| e.is_tag("link") && is_stylesheet_link(e))
        .filter_map(|link| {
            let href = link.get_attribute("href").filter(|h| !h.trim().is_empty())?;
            Some(match base.join(href.trim()) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    log::warn!("Keeping unresolvable stylesheet href '{}': {}", href, e);
                    href.to_string()
                }
            })
        })
        .collect()
}

fn is_stylesheet_link(link: &ElementNode) -> bool {
    link.get_attribute("rel")
        .is_some_and(|rel| rel.trim().eq_ignore_ascii_case("stylesheet"))
}
