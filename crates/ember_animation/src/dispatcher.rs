//! Animation trigger dispatcher
//!
//! Turns visibility changes into one-shot animation commands. Each
//! registered element carries a `has_animated` flag in the dispatcher's
//! registry; the first intersecting event flips it and yields exactly one
//! command, later ones are ignored until the epoch is reset.
//!
//! Commands are descriptions, not actions. The caller applies them to the
//! document and schedules the delays.

use std::time::Duration;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use ember_core::{Document, ElementId};

use crate::observer::VisibilityChange;
use crate::ramp::CounterTarget;
use crate::stagger::StaggerSequencer;
use crate::tracked::{AnimationKind, TrackedElement, TrackedTarget};

/// A start-animation request for one element
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationCommand {
    /// Add the reveal class after `delay`
    Reveal {
        element: ElementId,
        kind: AnimationKind,
        delay: Duration,
    },
    /// Reveal after `delay`, reset the bar to 0%, then grow it to `level`
    /// after the settle delay
    SkillBar {
        element: ElementId,
        level: u8,
        delay: Duration,
        settle: Duration,
    },
    /// Start a counter ramp after `delay`
    Counter {
        element: ElementId,
        target: CounterTarget,
        delay: Duration,
    },
}

impl AnimationCommand {
    pub fn element(&self) -> ElementId {
        match self {
            AnimationCommand::Reveal { element, .. }
            | AnimationCommand::SkillBar { element, .. }
            | AnimationCommand::Counter { element, .. } => *element,
        }
    }

    /// Stagger delay before the animation starts
    pub fn delay(&self) -> Duration {
        match self {
            AnimationCommand::Reveal { delay, .. }
            | AnimationCommand::SkillBar { delay, .. }
            | AnimationCommand::Counter { delay, .. } => *delay,
        }
    }
}

/// Registry of tracked elements and their one-shot state
#[derive(Debug)]
pub struct AnimationDispatcher {
    registry: IndexMap<ElementId, TrackedElement>,
    group_sizes: FxHashMap<AnimationKind, usize>,
    stagger: StaggerSequencer,
    settle: Duration,
    epoch: u64,
}

impl AnimationDispatcher {
    pub fn new(stagger: StaggerSequencer, settle: Duration) -> Self {
        Self {
            registry: IndexMap::new(),
            group_sizes: FxHashMap::default(),
            stagger,
            settle,
            epoch: 0,
        }
    }

    /// Register an element as the next member of its kind group
    ///
    /// Registering an element twice keeps the original record. Returns the
    /// element's index within its group.
    pub fn register(&mut self, element: ElementId, kind: AnimationKind, target: TrackedTarget) -> usize {
        if let Some(existing) = self.registry.get(&element) {
            return existing.group_index;
        }
        let size = self.group_sizes.entry(kind).or_insert(0);
        let index = *size;
        *size += 1;
        self.registry
            .insert(element, TrackedElement::new(element, kind, target, index));
        index
    }

    pub fn get(&self, element: ElementId) -> Option<&TrackedElement> {
        self.registry.get(&element)
    }

    /// Registered elements in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TrackedElement> {
        self.registry.values()
    }

    pub fn has_animated(&self, element: ElementId) -> bool {
        self.registry
            .get(&element)
            .is_some_and(|t| t.has_animated)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Current registration epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stagger(&self) -> &StaggerSequencer {
        &self.stagger
    }

    /// Handle one visibility change
    ///
    /// Returns a command only for the first intersecting event of a
    /// registered element in the current epoch.
    pub fn on_visibility(&mut self, change: VisibilityChange) -> Option<AnimationCommand> {
        if !change.is_intersecting {
            return None;
        }
        let tracked = self.registry.get_mut(&change.element)?;
        if tracked.has_animated {
            return None;
        }
        tracked.has_animated = true;

        let delay = self.stagger.delay(tracked.kind, tracked.group_index);
        let element = tracked.element;
        tracing::debug!(
            "Dispatcher: {:?} {:?} (#{}) triggered, delay={:?}, epoch={}",
            tracked.kind,
            element,
            tracked.group_index,
            delay,
            self.epoch
        );

        let command = match (&tracked.kind, &tracked.target) {
            (AnimationKind::SkillBar, TrackedTarget::Level(level)) => AnimationCommand::SkillBar {
                element,
                level: *level,
                delay,
                settle: self.settle,
            },
            (AnimationKind::SkillBar, _) => AnimationCommand::SkillBar {
                element,
                level: 0,
                delay,
                settle: self.settle,
            },
            (AnimationKind::Counter, TrackedTarget::Counter(target)) => AnimationCommand::Counter {
                element,
                target: target.clone(),
                delay,
            },
            (kind, _) => AnimationCommand::Reveal {
                element,
                kind: *kind,
                delay,
            },
        };
        Some(command)
    }

    /// Allow every registered element to animate again
    pub fn reset_epoch(&mut self) {
        for tracked in self.registry.values_mut() {
            tracked.has_animated = false;
        }
        self.epoch += 1;
        tracing::debug!("Dispatcher: reset to epoch {}", self.epoch);
    }

    /// Drop every registration and start a new epoch
    pub fn clear(&mut self) {
        self.registry.clear();
        self.group_sizes.clear();
        self.epoch += 1;
    }

    /// Forget elements that are no longer in the document
    pub fn retain_connected(&mut self, doc: &dyn Document) {
        self.registry.retain(|el, _| doc.is_connected(*el));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::MemoryDocument;

    fn visible(element: ElementId) -> VisibilityChange {
        VisibilityChange {
            element,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    fn hidden(element: ElementId) -> VisibilityChange {
        VisibilityChange {
            element,
            is_intersecting: false,
            ratio: 0.0,
        }
    }

    fn dispatcher() -> AnimationDispatcher {
        AnimationDispatcher::new(StaggerSequencer::default(), Duration::from_millis(300))
    }

    #[test]
    fn test_fires_once() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &["skill-item"]);
        let mut d = dispatcher();
        d.register(el, AnimationKind::SkillBar, TrackedTarget::Level(80));

        let cmd = d.on_visibility(visible(el)).unwrap();
        assert_eq!(
            cmd,
            AnimationCommand::SkillBar {
                element: el,
                level: 80,
                delay: Duration::ZERO,
                settle: Duration::from_millis(300),
            }
        );
        assert!(d.has_animated(el));

        for _ in 0..5 {
            assert!(d.on_visibility(hidden(el)).is_none());
            assert!(d.on_visibility(visible(el)).is_none());
        }
    }

    #[test]
    fn test_hidden_does_not_consume() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &[]);
        let mut d = dispatcher();
        d.register(el, AnimationKind::Card, TrackedTarget::None);

        assert!(d.on_visibility(hidden(el)).is_none());
        assert!(!d.has_animated(el));
        assert!(d.on_visibility(visible(el)).is_some());
    }

    #[test]
    fn test_unregistered_ignored() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &[]);
        let mut d = dispatcher();
        assert!(d.on_visibility(visible(el)).is_none());
    }

    #[test]
    fn test_group_index_drives_delay() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let cards: Vec<_> = (0..3).map(|_| doc.append(body, None, &["project-card"])).collect();
        let mut d = dispatcher();
        for card in &cards {
            d.register(*card, AnimationKind::Card, TrackedTarget::None);
        }
        // Registering again keeps the index
        assert_eq!(d.register(cards[1], AnimationKind::Card, TrackedTarget::None), 1);

        let delays: Vec<_> = cards
            .iter()
            .map(|c| d.on_visibility(visible(*c)).unwrap().delay())
            .collect();
        assert_eq!(
            delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(150),
                Duration::from_millis(300)
            ]
        );
    }

    #[test]
    fn test_counter_command_carries_target() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &["stat-number"]);
        let mut d = dispatcher();
        let target = CounterTarget::parse("50+");
        d.register(el, AnimationKind::Counter, TrackedTarget::Counter(target.clone()));

        match d.on_visibility(visible(el)) {
            Some(AnimationCommand::Counter { target: t, .. }) => assert_eq!(t, target),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_reset_epoch_allows_replay() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.body(), None, &[]);
        let mut d = dispatcher();
        d.register(el, AnimationKind::Section, TrackedTarget::None);

        assert!(d.on_visibility(visible(el)).is_some());
        assert!(d.on_visibility(visible(el)).is_none());

        d.reset_epoch();
        assert_eq!(d.epoch(), 1);
        assert!(!d.has_animated(el));
        assert!(d.on_visibility(visible(el)).is_some());
        assert!(d.on_visibility(visible(el)).is_none());
    }

    #[test]
    fn test_retain_connected() {
        let mut doc = MemoryDocument::new();
        let kept = doc.append(doc.body(), None, &[]);
        let gone = doc.append(doc.body(), None, &[]);
        let mut d = dispatcher();
        d.register(kept, AnimationKind::Card, TrackedTarget::None);
        d.register(gone, AnimationKind::Card, TrackedTarget::None);

        doc.remove(gone);
        d.retain_connected(&doc);
        assert_eq!(d.len(), 1);
        assert!(d.get(kept).is_some());
    }
}
