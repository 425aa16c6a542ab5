//! Navigation section highlighter
//!
//! Picks the section the reader is in from the scroll offset and keeps a
//! single `active` marker on the matching navigation link. Sections are
//! scanned top to bottom; the last one whose top (less the header offset)
//! is at or above `scroll + lookahead` wins.

use ember_core::{ClassNames, Document, Selector};

/// Scroll position tracking plus active nav marker
#[derive(Clone, Debug)]
pub struct SectionHighlighter {
    sections: Vec<String>,
    header_offset: f32,
    lookahead: f32,
    nav_link: Selector,
    section_attr: String,
    active_class: String,
    current: Option<String>,
    last_offset: Option<f32>,
}

impl SectionHighlighter {
    pub fn new(sections: Vec<String>, header_offset: f32, lookahead: f32, classes: &ClassNames) -> Self {
        Self {
            sections,
            header_offset,
            lookahead,
            nav_link: Selector::class(classes.nav_link.clone()),
            section_attr: classes.section_attr.clone(),
            active_class: classes.active.clone(),
            current: None,
            last_offset: None,
        }
    }

    /// Currently highlighted section
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Last scroll offset handled
    pub fn last_offset(&self) -> Option<f32> {
        self.last_offset
    }

    /// Section that should be active at `scroll_y`
    pub fn select(&self, doc: &dyn Document, scroll_y: f32) -> Option<String> {
        let probe = scroll_y + self.lookahead;
        let mut selected = None;
        for section in &self.sections {
            let Some(bounds) = doc.get_by_id(section).and_then(|el| doc.bounds(el)) else {
                continue;
            };
            if bounds.top - self.header_offset <= probe {
                selected = Some(section.clone());
            }
        }
        selected
    }

    /// Handle a scroll position, updating nav links if the section changed
    ///
    /// Returns the newly active section, or `None` when nothing changed.
    pub fn update(&mut self, doc: &mut dyn Document, scroll_y: f32) -> Option<String> {
        self.last_offset = Some(scroll_y);
        let selected = self.select(doc, scroll_y)?;
        if self.current.as_deref() == Some(selected.as_str()) {
            return None;
        }

        for link in doc.query_all(&self.nav_link) {
            let is_target = doc.attribute(link, &self.section_attr).as_deref() == Some(selected.as_str());
            if is_target {
                doc.add_class(link, &self.active_class);
            } else {
                doc.remove_class(link, &self.active_class);
            }
        }

        tracing::debug!(
            "Highlighter: {:?} -> {} at scroll {}",
            self.current,
            selected,
            scroll_y
        );
        self.current = Some(selected.clone());
        Some(selected)
    }
}
