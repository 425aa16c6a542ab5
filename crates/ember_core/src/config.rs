//! Variant configuration
//!
//! The two portfolio sites run the same engine and differ only in class-name
//! vocabulary, timing constants and two behavioural switches (single-active
//! notifications and reset-on-resize). All of that lives here as data.
//!
//! Configuration can be built in code ([`VariantConfig::ember`],
//! [`VariantConfig::classic`]) or loaded from TOML. Every field has a
//! default, so a TOML file only needs the values it overrides:
//!
//! ```toml
//! name = "my-site"
//! reset_on_resize = true
//!
//! [timing]
//! settle_delay_ms = 250
//!
//! [notifications]
//! single_active = true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================================
// VariantConfig
// =============================================================================

/// Complete configuration of one site variant
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Variant name, for logging
    pub name: String,
    /// Ordered section ids, top to bottom
    pub sections: Vec<String>,
    /// Start a new animation epoch when the window is resized
    pub reset_on_resize: bool,
    pub classes: ClassNames,
    pub timing: TimingConfig,
    pub observer: ObserverConfig,
    pub notifications: NotificationConfig,
    pub particles: ParticleConfig,
    pub scroll_effects: ScrollEffectsConfig,
    pub loading: LoadingConfig,
    pub breakpoints: Breakpoints,
    pub form: FormFields,
    /// Extra reveals applied when a section first enters the viewport
    pub reveals: Vec<SectionReveal>,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::ember()
    }
}

impl VariantConfig {
    /// The ember-themed site: stacking notifications, no reset on resize
    pub fn ember() -> Self {
        Self {
            name: "ember".to_string(),
            sections: ["home", "about", "skills", "projects", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            reset_on_resize: false,
            classes: ClassNames::default(),
            timing: TimingConfig::default(),
            observer: ObserverConfig::default(),
            notifications: NotificationConfig::default(),
            particles: ParticleConfig::default(),
            scroll_effects: ScrollEffectsConfig::default(),
            loading: LoadingConfig::default(),
            breakpoints: Breakpoints::default(),
            form: FormFields::default(),
            reveals: vec![
                SectionReveal::new("about", "about-text", "animate-left", 0),
                SectionReveal::new("about", "about-image", "animate-right", 0),
                SectionReveal::new("about", "stat-item", "animate-in", 200),
                SectionReveal::new("contact", "contact-info", "animate-left", 0),
                SectionReveal::new("contact", "contact-form", "animate-right", 0),
            ],
        }
    }

    /// The classic site: single active toast, animations replay after resize
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            reset_on_resize: true,
            classes: ClassNames {
                nav_link: "nav__link".to_string(),
                active: "is-active".to_string(),
                nav_open: "menu-open".to_string(),
                skill_item: "skill".to_string(),
                skill_progress: "skill__bar".to_string(),
                counter: "counter".to_string(),
                card: "portfolio-card".to_string(),
                card_inner: "portfolio-card__inner".to_string(),
                reveal: "is-visible".to_string(),
                notification: "toast".to_string(),
                notification_modifier: "toast--".to_string(),
                notification_shown: "toast--visible".to_string(),
                notification_close: "toast__close".to_string(),
                notification_message: "toast__message".to_string(),
                notification_icon: "toast__icon".to_string(),
                particle: "spark".to_string(),
                ..ClassNames::default()
            },
            timing: TimingConfig {
                stagger: StaggerConfig {
                    skill_bar_ms: 150,
                    counter_ms: 150,
                    card_ms: 200,
                    section_ms: 0,
                },
                scroll_throttle_ms: 100,
                ..TimingConfig::default()
            },
            observer: ObserverConfig {
                section_threshold: 0.1,
                element_threshold: 0.1,
                root_margin_top: 80.0,
            },
            notifications: NotificationConfig {
                single_active: true,
                auto_dismiss_ms: 5000,
                ..NotificationConfig::default()
            },
            scroll_effects: ScrollEffectsConfig {
                header_offset: 80.0,
                ..ScrollEffectsConfig::default()
            },
            reveals: vec![
                SectionReveal::new("about", "about-text", "slide-left", 0),
                SectionReveal::new("about", "about-image", "slide-right", 0),
                SectionReveal::new("contact", "contact-info", "slide-left", 0),
                SectionReveal::new("contact", "contact-form", "slide-right", 0),
            ],
            ..Self::ember()
        }
    }

    /// Parse a variant from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: VariantConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a variant from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loading variant configuration from {}", path.as_ref().display());
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        for (label, t) in [
            ("observer.section_threshold", self.observer.section_threshold),
            ("observer.element_threshold", self.observer.element_threshold),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(EngineError::Config(format!(
                    "{label} must be within 0.0..=1.0, got {t}"
                )));
            }
        }
        if self.timing.counter_steps == 0 {
            return Err(EngineError::Config(
                "timing.counter_steps must be at least 1".to_string(),
            ));
        }
        if self.timing.frame_interval_ms == 0 {
            return Err(EngineError::Config(
                "timing.frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.sections.is_empty() {
            return Err(EngineError::Config("sections must not be empty".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Class vocabulary
// =============================================================================

/// Element ids, class names and attribute names shared with the markup
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassNames {
    pub nav_header_id: String,
    pub nav_toggle_id: String,
    pub nav_menu_id: String,
    pub nav_link: String,
    /// Attribute on nav links naming their section
    pub section_attr: String,
    pub active: String,
    /// Body class while the mobile menu is open
    pub nav_open: String,
    pub skill_item: String,
    pub skill_progress: String,
    /// Skill level attribute (0-100)
    pub level_attr: String,
    pub counter: String,
    pub card: String,
    pub card_inner: String,
    /// Attribute marking generic scroll-revealed elements
    pub animate_attr: String,
    /// Class applied when an element is revealed
    pub reveal: String,
    pub notification: String,
    /// Severity modifier prefix, e.g. `notification--` + `success`
    pub notification_modifier: String,
    pub notification_shown: String,
    pub notification_close: String,
    pub notification_message: String,
    pub notification_icon: String,
    pub particle: String,
    pub particle_container_id: String,
    pub contact_form_id: String,
    pub form_control: String,
    pub focused: String,
    pub submit_button: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            nav_header_id: "nav-header".to_string(),
            nav_toggle_id: "nav-toggle".to_string(),
            nav_menu_id: "nav-menu".to_string(),
            nav_link: "nav-link".to_string(),
            section_attr: "data-section".to_string(),
            active: "active".to_string(),
            nav_open: "nav-open".to_string(),
            skill_item: "skill-item".to_string(),
            skill_progress: "skill-progress".to_string(),
            level_attr: "data-level".to_string(),
            counter: "stat-number".to_string(),
            card: "project-card".to_string(),
            card_inner: "project-card-inner".to_string(),
            animate_attr: "data-animate".to_string(),
            reveal: "animate-in".to_string(),
            notification: "notification".to_string(),
            notification_modifier: "notification--".to_string(),
            notification_shown: "notification--show".to_string(),
            notification_close: "notification-close".to_string(),
            notification_message: "notification-message".to_string(),
            notification_icon: "notification-icon".to_string(),
            particle: "ember-particle".to_string(),
            particle_container_id: "hero-particles".to_string(),
            contact_form_id: "contact-form".to_string(),
            form_control: "form-control".to_string(),
            focused: "focused".to_string(),
            submit_button: "btn-submit".to_string(),
        }
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Per-kind stagger step in milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub skill_bar_ms: u64,
    pub counter_ms: u64,
    pub card_ms: u64,
    pub section_ms: u64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            skill_bar_ms: 100,
            counter_ms: 200,
            card_ms: 150,
            section_ms: 0,
        }
    }
}

/// Timing constants, all in milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause between resetting a skill bar to 0% and animating it
    pub settle_delay_ms: u64,
    /// Total duration of a counter ramp
    pub counter_duration_ms: u64,
    /// Number of visual steps in a counter ramp
    pub counter_steps: u64,
    pub stagger: StaggerConfig,
    /// Minimum spacing between scroll-derived handler runs
    pub scroll_throttle_ms: u64,
    /// Animation frame interval
    pub frame_interval_ms: u64,
    /// Simulated contact-form network latency
    pub submit_latency_ms: u64,
    /// Delay before recreating particles after a resize
    pub resize_rebuild_ms: u64,
    /// How long the easter-egg body filter stays applied
    pub easter_egg_filter_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            counter_duration_ms: 1500,
            counter_steps: 30,
            stagger: StaggerConfig::default(),
            scroll_throttle_ms: 16,
            frame_interval_ms: 16,
            submit_latency_ms: 2000,
            resize_rebuild_ms: 100,
            easter_egg_filter_ms: 2000,
        }
    }
}

impl TimingConfig {
    pub fn settle_delay(&self) -> Duration {
        ms(self.settle_delay_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        ms(self.counter_duration_ms)
    }

    pub fn scroll_throttle(&self) -> Duration {
        ms(self.scroll_throttle_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        ms(self.frame_interval_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        ms(self.submit_latency_ms)
    }

    pub fn resize_rebuild(&self) -> Duration {
        ms(self.resize_rebuild_ms)
    }

    pub fn easter_egg_filter(&self) -> Duration {
        ms(self.easter_egg_filter_ms)
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Viewport intersection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Visible fraction required for page sections and tracked groups
    pub section_threshold: f32,
    /// Visible fraction required for `[data-animate]` elements
    pub element_threshold: f32,
    /// Pixels hidden under the fixed header
    pub root_margin_top: f32,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            section_threshold: 0.3,
            element_threshold: 0.1,
            root_margin_top: 70.0,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Toast lifecycle settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// A new toast supersedes the current one instead of stacking
    pub single_active: bool,
    /// Yield between attaching a toast and showing it
    pub display_yield_ms: u64,
    pub auto_dismiss_ms: u64,
    /// Exit transition length before the element is detached
    pub exit_ms: u64,
    pub success_icon: String,
    pub error_icon: String,
    pub info_icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            single_active: false,
            display_yield_ms: 100,
            auto_dismiss_ms: 4000,
            exit_ms: 300,
            success_icon: "\u{1F525}".to_string(),
            error_icon: "\u{26A1}".to_string(),
            info_icon: "\u{2139}".to_string(),
        }
    }
}

impl NotificationConfig {
    pub fn display_yield(&self) -> Duration {
        ms(self.display_yield_ms)
    }

    pub fn auto_dismiss(&self) -> Duration {
        ms(self.auto_dismiss_ms)
    }

    pub fn exit(&self) -> Duration {
        ms(self.exit_ms)
    }
}

// =============================================================================
// Particles
// =============================================================================

/// Ember particle decoration settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub enabled: bool,
    /// Particles spawned when the field is (re)created
    pub initial_count: usize,
    pub spawn_stagger_ms: u64,
    /// Period of the background spawner
    pub spawn_interval_ms: u64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub easter_egg_count: usize,
    pub easter_egg_stagger_ms: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_count: 20,
            spawn_stagger_ms: 200,
            spawn_interval_ms: 3000,
            seed: None,
            easter_egg_count: 50,
            easter_egg_stagger_ms: 50,
        }
    }
}

impl ParticleConfig {
    pub fn spawn_stagger(&self) -> Duration {
        ms(self.spawn_stagger_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        ms(self.spawn_interval_ms)
    }

    pub fn easter_egg_stagger(&self) -> Duration {
        ms(self.easter_egg_stagger_ms)
    }
}

// =============================================================================
// Scroll effects
// =============================================================================

/// Header fade, parallax and section highlighting
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollEffectsConfig {
    /// Fixed header height subtracted from section tops
    pub header_offset: f32,
    /// Look-ahead added to the scroll position when picking a section
    pub highlight_lookahead: f32,
    /// Scroll distance over which the header fades in
    pub header_fade_distance: f32,
    pub header_max_opacity: f32,
    pub header_rgb: [u8; 3],
    pub parallax_class: String,
    pub parallax_factor: f32,
}

impl Default for ScrollEffectsConfig {
    fn default() -> Self {
        Self {
            header_offset: 70.0,
            highlight_lookahead: 100.0,
            header_fade_distance: 100.0,
            header_max_opacity: 0.95,
            header_rgb: [27, 26, 23],
            parallax_class: "hero-bonfire".to_string(),
            parallax_factor: 0.5,
        }
    }
}

// =============================================================================
// Loading screen & hero intro
// =============================================================================

/// Loading screen and hero entrance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub screen_id: String,
    pub hidden_class: String,
    /// Loading screen is dismissed after this long even without `load`
    pub simulated_delay_ms: u64,
    /// Fade-out before the screen is taken out of the layout
    pub fade_ms: u64,
    /// Hero element classes, revealed in order
    pub hero: Vec<String>,
    pub hero_step_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            screen_id: "loading-screen".to_string(),
            hidden_class: "hidden".to_string(),
            simulated_delay_ms: 2500,
            fade_ms: 500,
            hero: ["hero-title", "hero-subtitle", "hero-description", "hero-actions"]
                .into_iter()
                .map(String::from)
                .collect(),
            hero_step_ms: 300,
        }
    }
}

impl LoadingConfig {
    pub fn simulated_delay(&self) -> Duration {
        ms(self.simulated_delay_ms)
    }

    pub fn fade(&self) -> Duration {
        ms(self.fade_ms)
    }

    /// Reveal time of the `index`-th hero element (first one waits one step)
    pub fn hero_delay(&self, index: usize) -> Duration {
        ms(self.hero_step_ms * (index as u64 + 1))
    }
}

// =============================================================================
// Breakpoints & form
// =============================================================================

/// Responsive breakpoints in CSS pixels
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Cards flip on click at or below this width
    pub mobile_max_width: f32,
    /// The mobile menu is force-closed above this width
    pub desktop_min_width: f32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            desktop_min_width: 968.0,
        }
    }
}

/// Element ids of the contact form fields
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormFields {
    pub name_id: String,
    pub email_id: String,
    pub subject_id: String,
    pub message_id: String,
    pub sending_label: String,
    pub success_message: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name_id: "name".to_string(),
            email_id: "email".to_string(),
            subject_id: "subject".to_string(),
            message_id: "message".to_string(),
            sending_label: "Sending Message...".to_string(),
            success_message: "Message sent! The bonfire has been lit.".to_string(),
        }
    }
}

// =============================================================================
// Section reveals
// =============================================================================

/// Class to add to descendants of a section when it first becomes visible
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SectionReveal {
    /// Section id
    pub section: String,
    /// Class of the elements to reveal
    pub target: String,
    /// Class to add
    pub class: String,
    /// Per-element stagger among matching targets
    #[serde(default)]
    pub stagger_ms: u64,
}

impl SectionReveal {
    pub fn new(section: &str, target: &str, class: &str, stagger_ms: u64) -> Self {
        Self {
            section: section.to_string(),
            target: target.to_string(),
            class: class.to_string(),
            stagger_ms,
        }
    }

    /// Delay for the `index`-th matching target
    pub fn delay(&self, index: usize) -> Duration {
        ms(self.stagger_ms * index as u64)
    }
}
