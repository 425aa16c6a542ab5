//! Staggered reveal offsets
//!
//! Group members reveal one after another instead of all at once. The delay
//! of a member is `index × step(kind)`; it is a pure function, and the
//! sequencer never schedules anything itself.

use std::time::Duration;

use ember_core::StaggerConfig;

use crate::tracked::AnimationKind;

/// Computes cascade delays for grouped elements
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaggerSequencer {
    skill_bar: Duration,
    counter: Duration,
    card: Duration,
    section: Duration,
}

impl StaggerSequencer {
    pub fn new(config: &StaggerConfig) -> Self {
        Self {
            skill_bar: Duration::from_millis(config.skill_bar_ms),
            counter: Duration::from_millis(config.counter_ms),
            card: Duration::from_millis(config.card_ms),
            section: Duration::from_millis(config.section_ms),
        }
    }

    /// Per-item step for a kind
    pub fn step(&self, kind: AnimationKind) -> Duration {
        match kind {
            AnimationKind::SkillBar => self.skill_bar,
            AnimationKind::Counter => self.counter,
            AnimationKind::Card => self.card,
            AnimationKind::Section => self.section,
        }
    }

    /// Delay of the member at `index` (document order) within its group
    pub fn delay(&self, kind: AnimationKind, index: usize) -> Duration {
        self.step(kind) * index as u32
    }
}

impl Default for StaggerSequencer {
    fn default() -> Self {
        Self::new(&StaggerConfig::default())
    }
}
