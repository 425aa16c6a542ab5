//! Navigation: mobile menu, in-page links and card flipping

use ember_core::{Breakpoints, ClassNames, Document, ElementId, Selector};

/// Navigation handlers bound to the page's class vocabulary
#[derive(Clone, Debug)]
pub struct Navigation {
    classes: ClassNames,
    breakpoints: Breakpoints,
    header_offset: f32,
}

impl Navigation {
    pub fn new(classes: ClassNames, breakpoints: Breakpoints, header_offset: f32) -> Self {
        Self {
            classes,
            breakpoints,
            header_offset,
        }
    }

    fn toggle_button(&self, doc: &dyn Document) -> Option<ElementId> {
        doc.get_by_id(&self.classes.nav_toggle_id)
    }

    fn menu(&self, doc: &dyn Document) -> Option<ElementId> {
        doc.get_by_id(&self.classes.nav_menu_id)
    }

    /// Whether the mobile menu is open
    pub fn is_open(&self, doc: &dyn Document) -> bool {
        self.menu(doc)
            .is_some_and(|menu| doc.has_class(menu, &self.classes.active))
    }

    /// Whether `target` is the menu toggle or inside it
    pub fn is_toggle(&self, doc: &dyn Document, target: ElementId) -> bool {
        let Some(toggle) = self.toggle_button(doc) else {
            return false;
        };
        let mut current = Some(target);
        while let Some(el) = current {
            if el == toggle {
                return true;
            }
            current = doc.parent(el);
        }
        false
    }

    /// Flip the mobile menu; returns whether it is now open
    pub fn toggle(&self, doc: &mut dyn Document) -> bool {
        if let Some(toggle) = self.toggle_button(doc) {
            doc.toggle_class(toggle, &self.classes.active);
        }
        let open = match self.menu(doc) {
            Some(menu) => doc.toggle_class(menu, &self.classes.active),
            None => false,
        };
        let body = doc.body();
        doc.toggle_class(body, &self.classes.nav_open);
        tracing::debug!("Navigation: menu {}", if open { "opened" } else { "closed" });
        open
    }

    /// Close the mobile menu if it is open
    pub fn close(&self, doc: &mut dyn Document) -> bool {
        if !self.is_open(doc) {
            return false;
        }
        for el in [self.toggle_button(doc), self.menu(doc)].into_iter().flatten() {
            doc.remove_class(el, &self.classes.active);
        }
        let body = doc.body();
        doc.remove_class(body, &self.classes.nav_open);
        true
    }

    /// Section id a clicked element points at
    ///
    /// Navigation links name it in their section attribute; other anchors use
    /// `href="#id"`. A bare `#` points nowhere.
    pub fn link_target(&self, doc: &dyn Document, el: ElementId) -> Option<String> {
        if doc.has_class(el, &self.classes.nav_link) {
            if let Some(section) = doc.attribute(el, &self.classes.section_attr) {
                return Some(section);
            }
        }
        let href = doc.attribute(el, "href")?;
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        Some(id.to_string())
    }

    /// Handle a click on a navigation link or in-page anchor
    ///
    /// Scrolls so the target sits below the fixed header. Navigation links
    /// also close the mobile menu. Returns `false` for clicks that are not
    /// in-page links.
    pub fn navigate(&self, doc: &mut dyn Document, el: ElementId) -> bool {
        let Some(section) = self.link_target(doc, el) else {
            return false;
        };
        let bounds = doc.get_by_id(&section).and_then(|target| doc.bounds(target));
        match bounds {
            Some(bounds) => doc.scroll_to(bounds.top - self.header_offset),
            None => tracing::debug!("Navigation: no element #{}, skipping", section),
        }
        if doc.has_class(el, &self.classes.nav_link) {
            self.close(doc);
        }
        true
    }

    /// Close the menu once the viewport is wide enough for the desktop bar
    pub fn on_resize(&self, doc: &mut dyn Document) -> bool {
        if doc.viewport().width > self.breakpoints.desktop_min_width {
            return self.close(doc);
        }
        false
    }

    /// Flip the project card containing `target` on narrow viewports
    ///
    /// Returns the new flipped state, or `None` if nothing was flipped.
    pub fn flip_card(&self, doc: &mut dyn Document, target: ElementId) -> Option<bool> {
        if doc.viewport().width > self.breakpoints.mobile_max_width {
            return None;
        }
        let card = doc.closest_with_class(target, &self.classes.card)?;
        let inner = doc.query_within(card, &Selector::class(self.classes.card_inner.clone()))?;
        let flipped = doc.style(inner, "transform").as_deref() != Some("rotateY(180deg)");
        let transform = if flipped { "rotateY(180deg)" } else { "rotateY(0deg)" };
        doc.set_style(inner, "transform", transform);
        Some(flipped)
    }
}
