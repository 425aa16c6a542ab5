//! Ember Animation Triggers
//!
//! Scroll-driven, one-shot animation logic, independent of any live page:
//!
//! - **Viewport Observer**: intersection changes with threshold and header margin
//! - **Trigger Dispatcher**: per-element `has_animated` registry, one command per epoch
//! - **Staggered Sequencer**: `index × step` cascade delays
//! - **Integer Ramp**: counters that count up in a constant number of frames
//! - **Section Highlighter**: single active nav marker from scroll offset
//! - **Throttle**: leading-edge rate limit for scroll handlers
//! - **Particle Field**: rising, fading ember decoration
//!
//! None of these schedule timers; they return delays and commands and the
//! caller drives time.

pub mod dispatcher;
pub mod highlight;
pub mod observer;
pub mod particles;
pub mod ramp;
pub mod stagger;
pub mod throttle;
pub mod tracked;

pub use dispatcher::{AnimationCommand, AnimationDispatcher};
pub use highlight::SectionHighlighter;
pub use observer::{intersection_ratio, ViewportObserver, VisibilityChange};
pub use particles::{EmberParticle, ParticleField, ParticleFrame, ParticleId};
pub use ramp::{CounterRamp, CounterTarget};
pub use stagger::StaggerSequencer;
pub use throttle::Throttle;
pub use tracked::{parse_level, AnimationKind, TrackedElement, TrackedTarget};
