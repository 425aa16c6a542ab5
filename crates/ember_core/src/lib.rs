//! Ember Core
//!
//! Foundations shared by the Ember scroll-animation engine:
//!
//! - **Document collaborator**: the [`Document`] trait the engine drives,
//!   plus [`MemoryDocument`], a complete in-memory implementation
//! - **Deferred tasks**: [`TaskScheduler`], a virtual-clock timer queue
//!   standing in for setTimeout / requestAnimationFrame
//! - **Host events**: [`HostEvent`]
//! - **Variant configuration**: [`VariantConfig`], loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ember_core::TaskScheduler;
//!
//! let mut scheduler = TaskScheduler::new();
//! scheduler.run_after(Duration::from_millis(300), "settle");
//!
//! assert!(scheduler.pop_due(Duration::from_millis(299)).is_none());
//! let (_, task) = scheduler.pop_due(Duration::from_millis(300)).unwrap();
//! assert_eq!(task, "settle");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod memory;
pub mod scheduler;
pub mod selector;

pub use config::{
    Breakpoints, ClassNames, FormFields, LoadingConfig, NotificationConfig, ObserverConfig,
    ParticleConfig, ScrollEffectsConfig, SectionReveal, StaggerConfig, TimingConfig,
    VariantConfig,
};
pub use dom::{Bounds, Document, ElementId, Viewport};
pub use error::{EngineError, Result};
pub use events::HostEvent;
pub use memory::{MemoryDocument, Mutation};
pub use scheduler::{TaskId, TaskScheduler, DEFAULT_FRAME_INTERVAL};
pub use selector::Selector;
