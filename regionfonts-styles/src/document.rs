//! In-memory document head acting as a `ResourceSink`.
//!
//! Mirrors how a browser document behaves for the engine's purposes: font
//! sources are `<link rel="stylesheet">` elements found by an endpoint
//! substring in their `href`, the rule resource is a `<style>` element found
//! by id. Elements installed through `ResourceSink` also remember their kind,
//! so they are removed even when their `href` does not carry the marker.
//! Elements the engine did not create are left alone unless they match the
//! markers.

use crate::sink::{RULES_ELEMENT_ID, ResourceHandle, ResourceKind, ResourceSink};
use regionfonts_config::defaults::FONT_ENDPOINT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadElement {
    Link {
        handle: ResourceHandle,
        href: String,
        /// Set when installed through `ResourceSink::install`.
        owner: Option<ResourceKind>,
    },
    Style {
        handle: ResourceHandle,
        id: Option<String>,
        text: String,
        owner: Option<ResourceKind>,
    },
}

impl HeadElement {
    pub fn handle(&self) -> ResourceHandle {
        match self {
            HeadElement::Link { handle, .. } | HeadElement::Style { handle, .. } => *handle,
        }
    }

    pub fn owner(&self) -> Option<ResourceKind> {
        match self {
            HeadElement::Link { owner, .. } | HeadElement::Style { owner, .. } => *owner,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleDocument {
    /// Substring identifying font-source links.
    marker: String,
    elements: Vec<HeadElement>,
    next_handle: u64,
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::for_endpoint(FONT_ENDPOINT)
    }
}

impl StyleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose font-source marker is the host of `endpoint`.
    ///
    /// Falls back to the whole endpoint string when it has no host.
    pub fn for_endpoint(endpoint: &str) -> Self {
        let marker = url::Url::parse(endpoint)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| endpoint.to_string());
        Self {
            marker,
            elements: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    /// Add a stylesheet link the engine does not own (e.g. host theme CSS).
    pub fn push_link(&mut self, href: impl Into<String>) -> ResourceHandle {
        self.add_link(href.into(), None)
    }

    /// Add an inline style element the engine does not own.
    pub fn push_style(&mut self, id: Option<&str>, text: impl Into<String>) -> ResourceHandle {
        self.add_style(id.map(str::to_string), text.into(), None)
    }

    fn add_link(&mut self, href: String, owner: Option<ResourceKind>) -> ResourceHandle {
        let handle = self.next();
        self.elements.push(HeadElement::Link {
            handle,
            href,
            owner,
        });
        handle
    }

    fn add_style(
        &mut self,
        id: Option<String>,
        text: String,
        owner: Option<ResourceKind>,
    ) -> ResourceHandle {
        let handle = self.next();
        self.elements.push(HeadElement::Style {
            handle,
            id,
            text,
            owner,
        });
        handle
    }

    /// `href` of every font-source link: installed as one, or matching the marker.
    pub fn font_source_links(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| self.is_of_kind(e, ResourceKind::FontSource))
            .filter_map(|e| match e {
                HeadElement::Link { href, .. } => Some(href.as_str()),
                HeadElement::Style { .. } => None,
            })
            .collect()
    }

    /// Text of every rule resource: installed as one, or carrying `RULES_ELEMENT_ID`.
    pub fn rule_styles(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| self.is_of_kind(e, ResourceKind::Rules))
            .filter_map(|e| match e {
                HeadElement::Style { text, .. } => Some(text.as_str()),
                HeadElement::Link { .. } => None,
            })
            .collect()
    }

    /// Text of the rule resource, if installed.
    pub fn rules_text(&self) -> Option<&str> {
        self.rule_styles().into_iter().next()
    }

    /// Render the head as an HTML fragment, one element per line.
    pub fn render_head(&self) -> String {
        let mut html = String::new();
        for element in &self.elements {
            match element {
                HeadElement::Link { href, .. } => {
                    html.push_str(&format!(
                        "<link rel=\"stylesheet\" href=\"{}\">\n",
                        escape_attr(href)
                    ));
                }
                HeadElement::Style { id, text, .. } => {
                    match id {
                        Some(id) => html.push_str(&format!("<style id=\"{}\">", escape_attr(id))),
                        None => html.push_str("<style>"),
                    }
                    if !text.is_empty() {
                        html.push('\n');
                        html.push_str(&text.replace("</style", "<\\/style"));
                    }
                    html.push_str("</style>\n");
                }
            }
        }
        html
    }

    fn is_of_kind(&self, element: &HeadElement, kind: ResourceKind) -> bool {
        if element.owner() == Some(kind) {
            return true;
        }
        match (kind, element) {
            (ResourceKind::FontSource, HeadElement::Link { href, .. }) => {
                href.contains(&self.marker)
            }
            (ResourceKind::Rules, HeadElement::Style { id, .. }) => is_rules_id(id.as_deref()),
            _ => false,
        }
    }

    fn next(&mut self) -> ResourceHandle {
        let handle = ResourceHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl ResourceSink for StyleDocument {
    fn install(&mut self, kind: ResourceKind, content: &str) -> ResourceHandle {
        let handle = match kind {
            ResourceKind::FontSource => self.add_link(content.to_string(), Some(kind)),
            ResourceKind::Rules => self.add_style(
                Some(RULES_ELEMENT_ID.to_string()),
                content.to_string(),
                Some(kind),
            ),
        };
        log::debug!("Installed {:?} resource {:?}", kind, handle);
        handle
    }

    fn remove_all_of_kind(&mut self, kind: ResourceKind) -> usize {
        let before = self.elements.len();
        let elements = std::mem::take(&mut self.elements);
        self.elements = elements
            .into_iter()
            .filter(|e| !self.is_of_kind(e, kind))
            .collect();
        let removed = before - self.elements.len();
        if removed > 0 {
            log::debug!("Removed {} {:?} resource(s)", removed, kind);
        }
        removed
    }
}

fn is_rules_id(id: Option<&str>) -> bool {
    id == Some(RULES_ELEMENT_ID)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_endpoint_host() {
        assert_eq!(StyleDocument::new().marker(), "fonts.googleapis.com");
        assert_eq!(
            StyleDocument::for_endpoint("https://cdn.example.org/fonts/css").marker(),
            "cdn.example.org"
        );
        assert_eq!(StyleDocument::for_endpoint("fonts/css2").marker(), "fonts/css2");
    }

    #[test]
    fn test_remove_font_sources_by_marker_only() {
        let mut doc = StyleDocument::new();
        doc.push_link("https://fonts.googleapis.com/css2?family=Old");
        doc.push_link("/styles/theme.css");
        doc.install(
            ResourceKind::FontSource,
            "https://fonts.googleapis.com/css2?family=Lato",
        );

        assert_eq!(doc.remove_all_of_kind(ResourceKind::FontSource), 2);
        assert!(doc.font_source_links().is_empty());
        assert_eq!(doc.elements().len(), 1);
    }

    #[test]
    fn test_remove_rules_by_id_only() {
        let mut doc = StyleDocument::new();
        doc.push_style(None, "body { color: red; }");
        doc.push_style(Some("theme"), ".x {}");
        doc.install(ResourceKind::Rules, ".a { font-family: x; }");

        assert_eq!(doc.remove_all_of_kind(ResourceKind::Rules), 1);
        assert_eq!(doc.rules_text(), None);
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn test_installed_link_removed_without_marker_match() {
        let mut doc = StyleDocument::new();
        doc.push_link("https://cdn.example.org/theme.css");
        doc.install(
            ResourceKind::FontSource,
            "https://cdn.example.org/css2?family=Lato&display=swap",
        );
        assert_eq!(doc.font_source_links().len(), 1);
        assert_eq!(doc.elements()[1].owner(), Some(ResourceKind::FontSource));

        assert_eq!(doc.remove_all_of_kind(ResourceKind::FontSource), 1);
        assert!(doc.font_source_links().is_empty());
        assert_eq!(doc.elements().len(), 1, "foreign link on the same host stays");
    }

    #[test]
    fn test_handles_are_unique() {
        let mut doc = StyleDocument::new();
        let a = doc.install(ResourceKind::Rules, "");
        let b = doc.install(ResourceKind::Rules, "");
        assert_ne!(a, b);
        assert_eq!(doc.elements()[1].handle(), b);
    }

    #[test]
    fn test_render_head() {
        let mut doc = StyleDocument::new();
        doc.install(
            ResourceKind::FontSource,
            "https://fonts.googleapis.com/css2?family=Lato&display=swap",
        );
        doc.install(ResourceKind::Rules, ".a {}\n");
        doc.install(ResourceKind::Rules, "");
        assert_eq!(
            doc.render_head(),
            "<link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css2?family=Lato&amp;display=swap\">\n\
             <style id=\"regionfonts-custom-styles\">\n.a {}\n</style>\n\
             <style id=\"regionfonts-custom-styles\"></style>\n"
        );
    }
}
