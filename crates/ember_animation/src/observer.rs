//! Viewport observer
//!
//! Tracks which observed elements are inside the visible viewport and
//! reports *changes* only, the way an IntersectionObserver does. The host
//! calls [`ViewportObserver::on_viewport_change`] whenever its native signal
//! fires (scroll, resize, initial layout); there is no polling loop.
//!
//! The viewport is shrunk from the top by a margin so elements hidden under
//! the fixed header do not count as visible. An element is intersecting when
//! the visible fraction of its height reaches its threshold.
//!
//! Elements that have been removed from the document are dropped from
//! observation silently.

use indexmap::IndexMap;

use ember_core::{Bounds, Document, ElementId, Viewport};

/// Visibility transition of one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityChange {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element's height
    pub ratio: f32,
}

#[derive(Clone, Copy, Debug)]
struct Observation {
    threshold: f32,
    margin_top: f32,
    intersecting: bool,
}

/// Fraction of `bounds` inside the viewport, after removing `margin_top`
pub fn intersection_ratio(bounds: Bounds, viewport: Viewport, margin_top: f32) -> f32 {
    let visible_top = viewport.scroll_y + margin_top;
    let visible_bottom = viewport.scroll_y + viewport.height;
    if visible_bottom <= visible_top {
        return 0.0;
    }
    if bounds.height <= 0.0 {
        let inside = bounds.top >= visible_top && bounds.top <= visible_bottom;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = bounds.bottom().min(visible_bottom) - bounds.top.max(visible_top);
    (overlap / bounds.height).clamp(0.0, 1.0)
}

/// Emits visibility changes for observed elements
#[derive(Debug)]
pub struct ViewportObserver {
    observed: IndexMap<ElementId, Observation>,
    threshold: f32,
    margin_top: f32,
}

impl ViewportObserver {
    /// Create an observer with a default threshold and header margin
    pub fn new(threshold: f32, margin_top: f32) -> Self {
        Self {
            observed: IndexMap::new(),
            threshold: threshold.clamp(0.0, 1.0),
            margin_top,
        }
    }

    /// Observe with the default threshold and margin
    pub fn observe(&mut self, element: ElementId) {
        self.observe_with(element, self.threshold, self.margin_top);
    }

    /// Observe with a per-element threshold and margin
    ///
    /// Re-observing an element updates its settings but keeps its last
    /// known visibility.
    pub fn observe_with(&mut self, element: ElementId, threshold: f32, margin_top: f32) {
        let threshold = threshold.clamp(0.0, 1.0);
        self.observed
            .entry(element)
            .and_modify(|o| {
                o.threshold = threshold;
                o.margin_top = margin_top;
            })
            .or_insert(Observation {
                threshold,
                margin_top,
                intersecting: false,
            });
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Forget last known visibility so visible elements are reported again
    pub fn reset(&mut self) {
        for o in self.observed.values_mut() {
            o.intersecting = false;
        }
    }

    /// Stop observing everything
    pub fn clear(&mut self) {
        self.observed.clear();
    }

    /// Recompute visibility after the viewport moved or resized
    ///
    /// Returns the elements whose intersecting state changed, in
    /// observation order.
    pub fn on_viewport_change(&mut self, doc: &dyn Document) -> Vec<VisibilityChange> {
        let viewport = doc.viewport();
        let mut changes = Vec::new();
        let mut stale = Vec::new();

        for (&element, observation) in self.observed.iter_mut() {
            let Some(bounds) = doc.bounds(element).filter(|_| doc.is_connected(element)) else {
                stale.push(element);
                continue;
            };
            let ratio = intersection_ratio(bounds, viewport, observation.margin_top);
            let is_intersecting = ratio > 0.0 && ratio >= observation.threshold;
            if is_intersecting != observation.intersecting {
                observation.intersecting = is_intersecting;
                changes.push(VisibilityChange {
                    element,
                    is_intersecting,
                    ratio,
                });
            }
        }

        for element in stale {
            tracing::trace!("Observer: dropping detached element {:?}", element);
            self.observed.shift_remove(&element);
        }

        changes
    }
}
