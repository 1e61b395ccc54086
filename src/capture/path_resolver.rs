use crate::dom::{DocumentContext, ElementNode};
use crate::error::{CaptureError, Result};
use url::Url;

/// Attributes whose values are rewritten to absolute URLs
pub const URL_ATTRIBUTES: &[&str] = &["src", "href", "data-src", "data-href"];

/// Rewrites relative and root-relative attribute values to absolute URLs
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Serialized origin, prefixed to root-relative values
    origin: String,
    /// Base for standard relative resolution
    base: Url,
}

impl PathResolver {
    pub fn new(origin: impl Into<String>, base: Url) -> Self {
        Self { origin: origin.into(), base }
    }

    /// Resolver for the document an element belongs to
    pub fn for_context(context: &DocumentContext<'_>) -> Self {
        Self::new(context.origin.clone(), context.base_url.clone())
    }

    /// Resolver using the URL's own origin and the URL itself as base
    pub fn from_url(base: Url) -> Self {
        Self::new(base.origin().ascii_serialization(), base)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve one attribute value.
    ///
    /// `/x` becomes `origin + /x`; anything not starting with `http` is joined
    /// onto the base URL; `http...` values come back unchanged.
    pub fn resolve(&self, value: &str) -> Result<String> {
        if value.starts_with('/') {
            Ok(format!("{}{}", self.origin, value))
        } else if !value.starts_with("http") {
            self.join(value)
        } else {
            Ok(value.to_string())
        }
    }

    /// Resolve, keeping the original value when it cannot be resolved
    pub fn resolve_or_keep(&self, value: &str) -> String {
        match self.resolve(value) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::warn!("Leaving URL unresolved: {}", e);
                value.to_string()
            }
        }
    }

    /// Rewrite the URL-bearing attributes of a single element (not its children)
    pub fn normalize_attributes(&self, element: &mut ElementNode) {
        for &attribute in URL_ATTRIBUTES {
            if let Some(value) = element.get_attribute(attribute) {
                let resolved = self.resolve_or_keep(value);
                element.add_attribute(attribute, resolved);
            }
        }

        if element.is_tag("img") {
            self.force_image_src(element);
        }
    }

    /// Second pass for `<img src>`: anything still not absolute is joined onto the base
    fn force_image_src(&self, element: &mut ElementNode) {
        let Some(src) = element.get_attribute("src") else {
            return;
        };
        let needs_pass = src.starts_with('/') || !src.starts_with("http");
        if src.is_empty() || !needs_pass {
            return;
        }

        match self.join(src) {
            Ok(resolved) => element.add_attribute("src", resolved),
            Err(e) => log::warn!("Leaving image source unresolved: {}", e),
        }
    }

    fn join(&self, value: &str) -> Result<String> {
        self.base
            .join(value)
            .map(String::from)
            .map_err(|e| CaptureError::MalformedUrl { value: value.to_string(), reason: e.to_string() })
    }
}
