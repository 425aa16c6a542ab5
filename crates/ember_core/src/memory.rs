//! In-memory document
//!
//! A complete [`Document`] backed by a slot map. Used by the integration
//! tests and the headless example to run the engine without a browser.
//! Every mutation performed through the trait is appended to a log so
//! callers can assert on exactly what the engine did.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::dom::{Bounds, Document, ElementId, Viewport};
use crate::selector::Selector;

/// One observable change made through the [`Document`] trait
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    ClassAdded { el: ElementId, class: String },
    ClassRemoved { el: ElementId, class: String },
    StyleSet { el: ElementId, property: String, value: String },
    AttributeSet { el: ElementId, name: String, value: Option<String> },
    TextSet { el: ElementId, text: String },
    ValueSet { el: ElementId, value: String },
    Created { el: ElementId },
    Removed { el: ElementId },
    Scrolled { top: f32 },
}

impl Mutation {
    /// Element the mutation applies to, if any
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Mutation::ClassAdded { el, .. }
            | Mutation::ClassRemoved { el, .. }
            | Mutation::StyleSet { el, .. }
            | Mutation::AttributeSet { el, .. }
            | Mutation::TextSet { el, .. }
            | Mutation::ValueSet { el, .. }
            | Mutation::Created { el }
            | Mutation::Removed { el } => Some(*el),
            Mutation::Scrolled { .. } => None,
        }
    }

    /// Whether this is a class-list change
    pub fn is_class_change(&self) -> bool {
        matches!(
            self,
            Mutation::ClassAdded { .. } | Mutation::ClassRemoved { .. }
        )
    }
}

#[derive(Debug, Default)]
struct Node {
    classes: Vec<String>,
    attributes: FxHashMap<String, String>,
    style: IndexMap<String, String>,
    text: String,
    value: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    bounds: Bounds,
}

/// Slot-map backed document with a mutation log
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    body: ElementId,
    viewport: Viewport,
    visible: bool,
    mutations: Vec<Mutation>,
}

impl MemoryDocument {
    /// Create a document containing only a body
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::default());
        Self {
            nodes,
            body,
            viewport: Viewport::default(),
            visible: true,
            mutations: Vec::new(),
        }
    }

    // ========================================================================
    // Page construction (not recorded in the mutation log)
    // ========================================================================

    /// Append an element while building the page
    pub fn append(&mut self, parent: ElementId, html_id: Option<&str>, classes: &[&str]) -> ElementId {
        let mut node = Node {
            parent: Some(parent),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        };
        if let Some(id) = html_id {
            node.attributes.insert("id".to_string(), id.to_string());
        }
        let el = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(el);
        }
        el
    }

    /// Set an attribute while building the page
    pub fn with_attribute(&mut self, el: ElementId, name: &str, value: &str) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Set initial text while building the page
    pub fn with_text(&mut self, el: ElementId, text: &str) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(el) {
            node.text = text.to_string();
        }
        self
    }

    /// Place an element in the document flow
    pub fn set_bounds(&mut self, el: ElementId, bounds: Bounds) {
        if let Some(node) = self.nodes.get_mut(el) {
            node.bounds = bounds;
        }
    }

    /// Simulate the user scrolling (host side, not logged)
    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    /// Simulate a window resize (host side, not logged)
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Simulate the user typing into a form control (not logged)
    pub fn type_value(&mut self, el: ElementId, value: &str) {
        if let Some(node) = self.nodes.get_mut(el) {
            node.value = value.to_string();
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Drain the mutation log
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn classes(&self, el: ElementId) -> Vec<String> {
        self.nodes
            .get(el)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(el)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Number of live elements, body included
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    fn record(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    fn matches(node: &Node, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Id(id) => node.attributes.get("id").is_some_and(|v| v == id),
            Selector::Attribute(name) => node.attributes.contains_key(name),
            Selector::AttributePrefix { name, prefix } => node
                .attributes
                .get(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        }
    }

    /// Depth-first walk below `root` (exclusive) in document order
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .nodes
            .get(root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(el) = stack.pop() {
            if let Some(node) = self.nodes.get(el) {
                out.push(el);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> ElementId {
        self.body
    }

    fn get_by_id(&self, id: &str) -> Option<ElementId> {
        let selector = Selector::Id(id.to_string());
        self.descendants(self.body)
            .into_iter()
            .find(|el| Self::matches(&self.nodes[*el], &selector))
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|el| Self::matches(&self.nodes[*el], selector))
            .collect()
    }

    fn query_within(&self, parent: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(parent)
            .into_iter()
            .find(|el| Self::matches(&self.nodes[*el], selector))
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.get(el).and_then(|n| n.parent)
    }

    fn is_connected(&self, el: ElementId) -> bool {
        self.nodes.contains_key(el)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.nodes
            .get(el)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> bool {
        let Some(node) = self.nodes.get_mut(el) else {
            return false;
        };
        if node.classes.iter().any(|c| c == class) {
            return false;
        }
        node.classes.push(class.to_string());
        self.record(Mutation::ClassAdded {
            el,
            class: class.to_string(),
        });
        true
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> bool {
        let Some(node) = self.nodes.get_mut(el) else {
            return false;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() == before {
            return false;
        }
        self.record(Mutation::ClassRemoved {
            el,
            class: class.to_string(),
        });
        true
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.nodes.get(el).and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: Option<&str>) {
        let Some(node) = self.nodes.get_mut(el) else {
            return;
        };
        match value {
            Some(v) => {
                node.attributes.insert(name.to_string(), v.to_string());
            }
            None => {
                node.attributes.remove(name);
            }
        }
        self.record(Mutation::AttributeSet {
            el,
            name: name.to_string(),
            value: value.map(str::to_string),
        });
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.nodes.get(el).and_then(|n| n.style.get(property).cloned())
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(el) else {
            return;
        };
        node.style.insert(property.to_string(), value.to_string());
        self.record(Mutation::StyleSet {
            el,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn text(&self, el: ElementId) -> Option<String> {
        self.nodes.get(el).map(|n| n.text.clone())
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        let Some(node) = self.nodes.get_mut(el) else {
            return;
        };
        node.text = text.to_string();
        self.record(Mutation::TextSet {
            el,
            text: text.to_string(),
        });
    }

    fn value(&self, el: ElementId) -> Option<String> {
        self.nodes.get(el).map(|n| n.value.clone())
    }

    fn set_value(&mut self, el: ElementId, value: &str) {
        let Some(node) = self.nodes.get_mut(el) else {
            return;
        };
        node.value = value.to_string();
        self.record(Mutation::ValueSet {
            el,
            value: value.to_string(),
        });
    }

    fn create_element(&mut self, parent: ElementId, classes: &[&str]) -> ElementId {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            self.body
        };
        let el = self.append(parent, None, classes);
        self.record(Mutation::Created { el });
        el
    }

    fn remove(&mut self, el: ElementId) {
        if el == self.body || !self.nodes.contains_key(el) {
            return;
        }
        if let Some(parent) = self.nodes[el].parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != el);
            }
        }
        for child in self.descendants(el) {
            self.nodes.remove(child);
        }
        self.nodes.remove(el);
        self.record(Mutation::Removed { el });
    }

    fn clear_children(&mut self, el: ElementId) {
        for child in self.children(el) {
            self.remove(child);
        }
    }

    fn bounds(&self, el: ElementId) -> Option<Bounds> {
        self.nodes.get(el).map(|n| n.bounds)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top: f32) {
        let top = top.max(0.0);
        self.viewport.scroll_y = top;
        self.record(Mutation::Scrolled { top });
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.append(body, Some("skills"), &["section"]);
        let a = doc.append(list, None, &["skill-item"]);
        let b = doc.append(list, None, &["skill-item"]);
        let c = doc.append(body, None, &["skill-item"]);

        assert_eq!(doc.query_all(&Selector::class("skill-item")), vec![a, b, c]);
        assert_eq!(doc.get_by_id("skills"), Some(list));
        assert_eq!(doc.query_within(list, &Selector::class("skill-item")), Some(a));
    }

    #[test]
    fn test_class_mutations_logged_once() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &[]);

        assert!(doc.add_class(el, "active"));
        assert!(!doc.add_class(el, "active"));
        assert!(doc.remove_class(el, "active"));
        assert!(!doc.remove_class(el, "active"));

        assert_eq!(doc.mutations().len(), 2);
        assert!(doc.mutations().iter().all(Mutation::is_class_change));
    }

    #[test]
    fn test_toggle_class() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &[]);
        assert!(doc.toggle_class(el, "active"));
        assert!(doc.has_class(el, "active"));
        assert!(!doc.toggle_class(el, "active"));
        assert!(!doc.has_class(el, "active"));
    }

    #[test]
    fn test_removed_handles_are_stale() {
        let mut doc = MemoryDocument::new();
        let container = doc.append(doc.body(), Some("hero-particles"), &[]);
        let child = doc.append(container, None, &["ember-particle"]);

        doc.clear_children(container);

        assert!(!doc.is_connected(child));
        assert!(!doc.add_class(child, "x"));
        doc.set_style(child, "top", "10px");
        assert_eq!(doc.style(child, "top"), None);
        assert!(doc.children(container).is_empty());
    }

    #[test]
    fn test_closest_with_class() {
        let mut doc = MemoryDocument::new();
        let card = doc.append(doc.body(), None, &["project-card"]);
        let inner = doc.append(card, None, &["project-card-inner"]);
        let title = doc.append(inner, None, &["title"]);

        assert_eq!(doc.closest_with_class(title, "project-card"), Some(card));
        assert_eq!(doc.closest_with_class(title, "missing"), None);
    }

    #[test]
    fn test_attribute_prefix_query() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let anchor = doc.append(body, None, &[]);
        doc.with_attribute(anchor, "href", "#about");
        let external = doc.append(body, None, &[]);
        doc.with_attribute(external, "href", "https://example.com");

        let found = doc.query_all(&Selector::parse("[href^=\"#\"]").unwrap());
        assert_eq!(found, vec![anchor]);
    }
}
