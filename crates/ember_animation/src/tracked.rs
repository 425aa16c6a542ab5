//! Tracked element records

use ember_core::ElementId;

use crate::ramp::CounterTarget;

/// What kind of one-shot animation an element plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Progress bar growing to its level
    SkillBar,
    /// Number counting up to its target
    Counter,
    /// Project card fading in
    Card,
    /// Page section or `[data-animate]` element
    Section,
}

/// Kind-specific animation target
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackedTarget {
    None,
    /// Skill level in percent, 0-100
    Level(u8),
    Counter(CounterTarget),
}

/// Registry entry for one observed element
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedElement {
    pub element: ElementId,
    pub kind: AnimationKind,
    /// Set exactly once per registration epoch
    pub has_animated: bool,
    pub target: TrackedTarget,
    /// Position within its kind group, document order
    pub group_index: usize,
}

impl TrackedElement {
    pub fn new(element: ElementId, kind: AnimationKind, target: TrackedTarget, group_index: usize) -> Self {
        Self {
            element,
            kind,
            has_animated: false,
            target,
            group_index,
        }
    }
}

/// Parse a `data-level` attribute into a clamped percentage
pub fn parse_level(raw: &str) -> Option<u8> {
    let value: f32 = raw.trim().trim_end_matches('%').parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("80"), Some(80));
        assert_eq!(parse_level(" 95% "), Some(95));
        assert_eq!(parse_level("120"), Some(100));
        assert_eq!(parse_level("-3"), Some(0));
        assert_eq!(parse_level("72.6"), Some(73));
        assert_eq!(parse_level("high"), None);
        assert_eq!(parse_level("NaN"), None);
    }
}
