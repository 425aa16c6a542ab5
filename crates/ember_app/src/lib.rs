//! Ember Page Engine
//!
//! The scroll-driven animation and notification engine of a single-page
//! portfolio, driven entirely through a [`Document`] collaborator:
//!
//! - [`Portfolio`]: owns the page, routes host events, runs deferred tasks
//! - [`NotificationManager`]: toast lifecycle with single-active or stacking
//!   behaviour
//! - [`ContactForm`]: validation and the simulated submission
//! - [`Navigation`]: mobile menu, in-page links, card flipping
//! - [`KonamiDetector`]: the easter egg
//!
//! Two site variants ship as configuration: [`VariantConfig::ember`] and
//! [`VariantConfig::classic`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ember_app::{fixture, HostEvent, Portfolio, Severity, VariantConfig};
//!
//! let (doc, _page) = fixture::reference_page(&VariantConfig::ember());
//! let mut portfolio = Portfolio::new(doc, VariantConfig::ember()).unwrap();
//!
//! let id = portfolio.show_notification("The bonfire is lit", Severity::Success);
//! portfolio.advance(Duration::from_millis(100));
//! assert!(portfolio.notifications().get(id).is_some());
//! ```

pub mod engine;
pub mod fixture;
pub mod form;
pub mod konami;
pub mod nav;
pub mod notification;

pub use engine::{ParticleHost, Portfolio, Task};
pub use form::{is_valid_email, ContactForm, ContactSubmission, FormError};
pub use konami::{KonamiDetector, KONAMI_CODE};
pub use nav::Navigation;
pub use notification::{
    Notification, NotificationEvent, NotificationId, NotificationManager, NotificationState,
    NotificationTask, Severity,
};

pub use ember_core::{Document, HostEvent, MemoryDocument, Mutation, VariantConfig};
