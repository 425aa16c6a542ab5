//! Document collaborator
//!
//! The engine never touches markup directly. Everything it needs from the
//! page goes through the [`Document`] trait: lookups, class-list toggles,
//! inline styles, element creation/removal and a little geometry.
//!
//! Handles are [`ElementId`] slot-map keys. A handle whose element has been
//! removed is *stale*: every query on it returns `None`/`false` and every
//! mutation is a no-op. Handlers rely on that instead of checking first.

use slotmap::new_key_type;

use crate::selector::Selector;

new_key_type! {
    /// Opaque handle to an element of the document
    pub struct ElementId;
}

/// Document-relative box of an element (offsetTop / offsetHeight)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Scrollable viewport state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset
    pub scroll_y: f32,
    /// Viewport width (innerWidth)
    pub width: f32,
    /// Viewport height (innerHeight)
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// The page the engine manipulates
pub trait Document {
    /// Root `<body>` element
    fn body(&self) -> ElementId;

    /// Element by `id` attribute
    fn get_by_id(&self, id: &str) -> Option<ElementId>;

    /// All matching elements in document order
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// First matching descendant of `parent`
    fn query_within(&self, parent: ElementId, selector: &Selector) -> Option<ElementId>;

    /// First match in document order
    fn query(&self, selector: &Selector) -> Option<ElementId> {
        match selector {
            Selector::Id(id) => self.get_by_id(id),
            _ => self.query_all(selector).into_iter().next(),
        }
    }

    /// Parent element, `None` for the body or stale handles
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Whether the handle still refers to an element attached to the document
    fn is_connected(&self, el: ElementId) -> bool;

    fn has_class(&self, el: ElementId, class: &str) -> bool;

    /// Add a class; returns `true` if the class list changed
    fn add_class(&mut self, el: ElementId, class: &str) -> bool;

    /// Remove a class; returns `true` if the class list changed
    fn remove_class(&mut self, el: ElementId, class: &str) -> bool;

    /// Toggle a class; returns whether the class is present afterwards
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class)
        }
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an attribute
    fn set_attribute(&mut self, el: ElementId, name: &str, value: Option<&str>);

    fn style(&self, el: ElementId, property: &str) -> Option<String>;

    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn text(&self, el: ElementId) -> Option<String>;

    fn set_text(&mut self, el: ElementId, text: &str);

    /// Current value of a form control
    fn value(&self, el: ElementId) -> Option<String>;

    fn set_value(&mut self, el: ElementId, value: &str);

    /// Create an element with the given classes and append it to `parent`
    fn create_element(&mut self, parent: ElementId, classes: &[&str]) -> ElementId;

    /// Detach an element (and its subtree); stale afterwards
    fn remove(&mut self, el: ElementId);

    /// Remove every child of `el`
    fn clear_children(&mut self, el: ElementId);

    /// Layout box, `None` for stale handles
    fn bounds(&self, el: ElementId) -> Option<Bounds>;

    fn viewport(&self) -> Viewport;

    /// Programmatic scroll (window.scrollTo)
    fn scroll_to(&mut self, top: f32);

    /// Page visibility (document.visibilityState == "visible")
    fn is_visible(&self) -> bool {
        true
    }

    /// Walk from `el` up to the body, returning the first element with `class`
    fn closest_with_class(&self, el: ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(el);
        while let Some(node) = current {
            if self.has_class(node, class) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }
}
