//! Host events
//!
//! Browser-originated events the engine reacts to. The host translates its
//! native events into these and feeds them to the engine one at a time.
//! Scroll and resize carry no payload: the new offsets are read back from
//! [`Document::viewport`](crate::dom::Document::viewport).

use crate::dom::ElementId;

/// An event delivered by the host page
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Window `load` fired
    Load,
    /// Window scrolled
    Scroll,
    /// Window resized
    Resize,
    /// Element clicked
    Click(ElementId),
    /// Touch started on an element
    TouchStart(ElementId),
    /// Form submitted
    Submit(ElementId),
    /// Form control gained focus
    Focus(ElementId),
    /// Form control lost focus
    Blur(ElementId),
    /// Key pressed, as a `KeyboardEvent.code` string (`"ArrowUp"`, `"KeyB"`)
    KeyDown(String),
    /// Page visibility changed
    VisibilityChange,
}

impl HostEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Load => "load",
            HostEvent::Scroll => "scroll",
            HostEvent::Resize => "resize",
            HostEvent::Click(_) => "click",
            HostEvent::TouchStart(_) => "touchstart",
            HostEvent::Submit(_) => "submit",
            HostEvent::Focus(_) => "focus",
            HostEvent::Blur(_) => "blur",
            HostEvent::KeyDown(_) => "keydown",
            HostEvent::VisibilityChange => "visibilitychange",
        }
    }
}
