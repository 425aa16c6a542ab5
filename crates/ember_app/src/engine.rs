//! Portfolio engine
//!
//! [`Portfolio`] owns the document, the deferred-task scheduler and every
//! component, and is the only thing the host talks to. The host forwards its
//! native events through [`Portfolio::handle_event`] and advances time with
//! [`Portfolio::advance`]; everything else happens in response.
//!
//! All deferred work is a [`Task`] value queued on the scheduler. Tasks that
//! belong to a superseded animation epoch or particle generation, or that
//! address elements no longer in the document, do nothing when they fire.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ember_app::{fixture, HostEvent, Portfolio, VariantConfig};
//!
//! let (doc, page) = fixture::reference_page(&VariantConfig::ember());
//! let mut portfolio = Portfolio::new(doc, VariantConfig::ember()).unwrap();
//!
//! portfolio.handle_event(HostEvent::Load);
//! portfolio.document_mut().set_scroll(1700.0);
//! portfolio.handle_event(HostEvent::Scroll);
//! portfolio.advance(Duration::from_secs(1));
//!
//! assert!(portfolio.dispatcher().has_animated(page.skill_items[0]));
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;

use ember_animation::{
    parse_level, AnimationCommand, AnimationDispatcher, AnimationKind, CounterRamp, CounterTarget,
    ParticleField, ParticleFrame, ParticleId, SectionHighlighter, StaggerSequencer, Throttle,
    TrackedTarget, ViewportObserver,
};
use ember_core::{Document, ElementId, HostEvent, Result, Selector, TaskId, TaskScheduler, VariantConfig};

use crate::form::ContactForm;
use crate::konami::KonamiDetector;
use crate::nav::Navigation;
use crate::notification::{NotificationId, NotificationManager, NotificationTask, Severity};

const EASTER_EGG_MESSAGE: &str = "You Died... Just kidding!";
const EASTER_EGG_FILTER: &str = "sepia(1) hue-rotate(30deg)";

// =============================================================================
// Tasks
// =============================================================================

/// Where a particle lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleHost {
    /// The hero particle container, rebuilt on resize
    Hero,
    /// The page body (easter egg)
    Body,
}

/// Deferred engine work
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    /// Simulated loading delay elapsed
    HideLoading,
    /// Take the faded loading screen out of the layout
    CollapseLoading(ElementId),
    AddClass {
        element: ElementId,
        class: String,
    },
    /// Stagger delay of a triggered animation elapsed
    StartAnimation {
        epoch: u64,
        command: AnimationCommand,
    },
    /// Settle delay of a skill bar elapsed
    FillSkillBar {
        epoch: u64,
        bar: ElementId,
        level: u8,
    },
    CounterTick {
        epoch: u64,
        element: ElementId,
    },
    SpawnParticle {
        host: ParticleHost,
        generation: u64,
    },
    /// Periodic hero spawner
    SpawnInterval {
        generation: u64,
    },
    ParticleFrame {
        host: ParticleHost,
        id: ParticleId,
    },
    /// Recreate the hero particles after a resize
    RebuildParticles {
        generation: u64,
    },
    Notification(NotificationTask),
    CompleteSubmission,
    RestoreFilter,
    /// Re-apply scroll effects for an offset the throttle dropped
    TrailingScroll,
}

impl From<NotificationTask> for Task {
    fn from(task: NotificationTask) -> Self {
        Task::Notification(task)
    }
}

// =============================================================================
// Portfolio
// =============================================================================

/// The page engine
pub struct Portfolio<D: Document> {
    doc: D,
    config: VariantConfig,
    scheduler: TaskScheduler<Task>,
    observer: ViewportObserver,
    dispatcher: AnimationDispatcher,
    highlighter: SectionHighlighter,
    throttle: Throttle,
    counters: FxHashMap<ElementId, CounterRamp>,
    /// Counter targets as first read from the markup; kept across resets
    counter_targets: FxHashMap<ElementId, CounterTarget>,
    embers: ParticleField,
    fireworks: ParticleField,
    notifications: NotificationManager,
    nav: Navigation,
    form: ContactForm,
    konami: KonamiDetector,
    loading_timer: Option<TaskId>,
    loaded: bool,
    trailing_scroll: bool,
}

impl<D: Document> Portfolio<D> {
    /// Attach the engine to a page
    ///
    /// Registers every tracked element, starts the hero particles and the
    /// simulated loading delay, and runs the initial visibility pass.
    pub fn new(doc: D, config: VariantConfig) -> Result<Self> {
        config.validate()?;

        let classes = &config.classes;
        let effects = &config.scroll_effects;
        let mut portfolio = Self {
            scheduler: TaskScheduler::with_frame_interval(config.timing.frame_interval()),
            observer: ViewportObserver::new(
                config.observer.section_threshold,
                config.observer.root_margin_top,
            ),
            dispatcher: AnimationDispatcher::new(
                StaggerSequencer::new(&config.timing.stagger),
                config.timing.settle_delay(),
            ),
            highlighter: SectionHighlighter::new(
                config.sections.clone(),
                effects.header_offset,
                effects.highlight_lookahead,
                classes,
            ),
            throttle: Throttle::new(config.timing.scroll_throttle()),
            counters: FxHashMap::default(),
            counter_targets: FxHashMap::default(),
            embers: ParticleField::new(config.particles.seed),
            fireworks: ParticleField::new(config.particles.seed.map(|s| s.wrapping_add(1))),
            notifications: NotificationManager::new(config.notifications.clone(), classes.clone()),
            nav: Navigation::new(classes.clone(), config.breakpoints.clone(), effects.header_offset),
            form: ContactForm::new(config.form.clone(), classes),
            konami: KonamiDetector::new(),
            loading_timer: None,
            loaded: false,
            trailing_scroll: false,
            doc,
            config,
        };

        tracing::debug!("Portfolio: starting variant {:?}", portfolio.config.name);
        portfolio.loading_timer = Some(
            portfolio
                .scheduler
                .run_after(portfolio.config.loading.simulated_delay(), Task::HideLoading),
        );
        portfolio.register_tracked();
        portfolio.start_particles(portfolio.embers.generation());
        portfolio.refresh_visibility();
        Ok(portfolio)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable document, for the host to move the viewport or type into fields
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Section currently highlighted in the navigation
    pub fn current_section(&self) -> Option<&str> {
        self.highlighter.current()
    }

    pub fn dispatcher(&self) -> &AnimationDispatcher {
        &self.dispatcher
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Live hero particles
    pub fn particle_count(&self) -> usize {
        self.embers.len()
    }

    pub fn particle_generation(&self) -> u64 {
        self.embers.generation()
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Handle one host event to completion
    pub fn handle_event(&mut self, event: HostEvent) {
        tracing::trace!("Portfolio: {} event", event.name());
        match event {
            HostEvent::Load => self.hide_loading(),
            HostEvent::Scroll => self.on_scroll(),
            HostEvent::Resize => self.on_resize(),
            HostEvent::Click(target) => self.on_click(target),
            HostEvent::TouchStart(target) => {
                self.nav.flip_card(&mut self.doc, target);
            }
            HostEvent::Submit(target) => self.on_submit(target),
            HostEvent::Focus(target) => {
                self.form.on_focus(&mut self.doc, target);
            }
            HostEvent::Blur(target) => {
                self.form.on_blur(&mut self.doc, target);
            }
            HostEvent::KeyDown(code) => {
                if self.konami.push(&code) {
                    self.trigger_easter_egg();
                }
            }
            HostEvent::VisibilityChange => {
                tracing::debug!("Portfolio: page visible = {}", self.doc.is_visible());
            }
        }
    }

    /// Advance virtual time by `dt`, running every task that comes due
    pub fn advance(&mut self, dt: Duration) {
        let target = self.scheduler.now() + dt;
        while let Some((_, task)) = self.scheduler.pop_due(target) {
            self.run_task(task);
        }
        self.scheduler.advance_clock_to(target);
    }

    /// Show a notification
    pub fn show_notification(&mut self, message: &str, severity: Severity) -> NotificationId {
        self.notifications
            .show(&mut self.doc, &mut self.scheduler, message, severity)
    }

    /// Dismiss a notification early
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(&mut self.doc, &mut self.scheduler, id)
    }

    fn run_task(&mut self, task: Task) {
        tracing::trace!("Portfolio: running {:?} at {:?}", task, self.scheduler.now());
        match task {
            Task::HideLoading => {
                self.loading_timer = None;
                self.hide_loading();
            }
            Task::CollapseLoading(screen) => self.doc.set_style(screen, "display", "none"),
            Task::AddClass { element, class } => {
                self.doc.add_class(element, &class);
            }
            Task::StartAnimation { epoch, command } => {
                if epoch == self.dispatcher.epoch() {
                    self.start_animation(command);
                }
            }
            Task::FillSkillBar { epoch, bar, level } => {
                if epoch == self.dispatcher.epoch() {
                    self.doc.set_style(bar, "width", &format!("{level}%"));
                }
            }
            Task::CounterTick { epoch, element } => {
                if epoch == self.dispatcher.epoch() {
                    self.counter_tick(element);
                }
            }
            Task::SpawnParticle { host, generation } => self.spawn_particle(host, generation),
            Task::SpawnInterval { generation } => {
                if generation != self.embers.generation() {
                    return;
                }
                if self.doc.is_visible() {
                    self.spawn_particle(ParticleHost::Hero, generation);
                }
                let interval = self.spawn_interval();
                self.scheduler
                    .run_after(interval, Task::SpawnInterval { generation });
            }
            Task::ParticleFrame { host, id } => self.particle_frame(host, id),
            Task::RebuildParticles { generation } => {
                if generation == self.embers.generation() {
                    self.start_particles(generation);
                }
            }
            Task::Notification(task) => {
                self.notifications
                    .handle(&mut self.doc, &mut self.scheduler, task);
            }
            Task::CompleteSubmission => {
                if self.form.is_in_flight() {
                    let message = self.config.form.success_message.clone();
                    self.show_notification(&message, Severity::Success);
                    self.form.complete(&mut self.doc);
                }
            }
            Task::RestoreFilter => {
                let body = self.doc.body();
                self.doc.set_style(body, "filter", "none");
            }
            Task::TrailingScroll => {
                self.trailing_scroll = false;
                self.throttled_scroll_effects();
            }
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    fn hide_loading(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        if let Some(timer) = self.loading_timer.take() {
            self.scheduler.cancel(timer);
        }

        let loading = &self.config.loading;
        match self.doc.get_by_id(&loading.screen_id) {
            Some(screen) => {
                self.doc.add_class(screen, &loading.hidden_class);
                self.scheduler
                    .run_after(loading.fade(), Task::CollapseLoading(screen));
            }
            None => tracing::debug!("Portfolio: no #{} element", loading.screen_id),
        }

        for (index, class) in loading.hero.iter().enumerate() {
            let Some(element) = self.doc.query(&Selector::class(class.clone())) else {
                continue;
            };
            self.scheduler.run_after(
                loading.hero_delay(index),
                Task::AddClass {
                    element,
                    class: self.config.classes.reveal.clone(),
                },
            );
        }
        tracing::debug!("Portfolio: loaded at {:?}", self.scheduler.now());
    }

    // =========================================================================
    // Scroll-triggered animations
    // =========================================================================

    /// Register every tracked element with the dispatcher and observer
    fn register_tracked(&mut self) {
        let classes = &self.config.classes;
        let doc = &self.doc;

        for id in &self.config.sections {
            match doc.get_by_id(id) {
                Some(section) => {
                    self.dispatcher
                        .register(section, AnimationKind::Section, TrackedTarget::None);
                    self.observer.observe(section);
                }
                None => tracing::debug!("Portfolio: section #{} not found, skipping", id),
            }
        }

        for item in doc.query_all(&Selector::class(classes.skill_item.clone())) {
            let raw = doc.attribute(item, &classes.level_attr).unwrap_or_default();
            let level = parse_level(&raw).unwrap_or_else(|| {
                tracing::warn!("Portfolio: bad {} value {:?}, using 0", classes.level_attr, raw);
                0
            });
            self.dispatcher
                .register(item, AnimationKind::SkillBar, TrackedTarget::Level(level));
            self.observer.observe(item);
        }

        for counter in doc.query_all(&Selector::class(classes.counter.clone())) {
            // After a reset the text may be a partial ramp value
            let target = self
                .counter_targets
                .entry(counter)
                .or_insert_with(|| CounterTarget::parse(&doc.text(counter).unwrap_or_default()))
                .clone();
            self.dispatcher
                .register(counter, AnimationKind::Counter, TrackedTarget::Counter(target));
            self.observer.observe(counter);
        }

        for card in doc.query_all(&Selector::class(classes.card.clone())) {
            self.dispatcher
                .register(card, AnimationKind::Card, TrackedTarget::None);
            self.observer.observe(card);
        }

        let element_threshold = self.config.observer.element_threshold;
        let margin = self.config.observer.root_margin_top;
        for element in doc.query_all(&Selector::attribute(classes.animate_attr.clone())) {
            self.dispatcher
                .register(element, AnimationKind::Section, TrackedTarget::None);
            self.observer.observe_with(element, element_threshold, margin);
        }

        tracing::debug!(
            "Portfolio: tracking {} elements (epoch {})",
            self.dispatcher.len(),
            self.dispatcher.epoch()
        );
    }

    /// Feed the current viewport to the observer and queue triggered animations
    fn refresh_visibility(&mut self) {
        let epoch = self.dispatcher.epoch();
        for change in self.observer.on_viewport_change(&self.doc) {
            if let Some(command) = self.dispatcher.on_visibility(change) {
                self.scheduler
                    .run_after(command.delay(), Task::StartAnimation { epoch, command });
            }
        }
    }

    fn start_animation(&mut self, command: AnimationCommand) {
        let reveal = self.config.classes.reveal.clone();
        match command {
            AnimationCommand::Reveal { element, kind, .. } => {
                self.doc.add_class(element, &reveal);
                if kind == AnimationKind::Section {
                    self.apply_section_reveals(element);
                }
            }
            AnimationCommand::SkillBar {
                element,
                level,
                settle,
                ..
            } => {
                self.doc.add_class(element, &reveal);
                let progress = Selector::class(self.config.classes.skill_progress.clone());
                let bar = self.doc.query_within(element, &progress).unwrap_or(element);
                self.doc.set_style(bar, "width", "0%");
                let epoch = self.dispatcher.epoch();
                self.scheduler
                    .run_after(settle, Task::FillSkillBar { epoch, bar, level });
            }
            AnimationCommand::Counter { element, target, .. } => {
                let ramp = CounterRamp::new(
                    &target,
                    self.config.timing.counter_duration(),
                    self.config.timing.counter_steps,
                );
                match ramp {
                    Some(ramp) => {
                        self.doc.set_text(element, &ramp.initial_text());
                        let epoch = self.dispatcher.epoch();
                        self.scheduler
                            .run_after(ramp.interval(), Task::CounterTick { epoch, element });
                        self.counters.insert(element, ramp);
                    }
                    None => self.doc.set_text(element, &target.final_text()),
                }
            }
        }
    }

    fn counter_tick(&mut self, element: ElementId) {
        if !self.doc.is_connected(element) {
            self.counters.remove(&element);
            return;
        }
        let Some(ramp) = self.counters.get_mut(&element) else {
            return;
        };
        if let Some(text) = ramp.tick() {
            self.doc.set_text(element, &text);
        }
        if ramp.is_complete() {
            self.counters.remove(&element);
        } else {
            let interval = ramp.interval();
            let epoch = self.dispatcher.epoch();
            self.scheduler
                .run_after(interval, Task::CounterTick { epoch, element });
        }
    }

    /// Apply the configured descendant reveals of a section
    fn apply_section_reveals(&mut self, section: ElementId) {
        let Some(id) = self.doc.attribute(section, "id") else {
            return;
        };
        for rule in self.config.reveals.iter().filter(|r| r.section == id) {
            let targets: Vec<_> = self
                .doc
                .query_all(&Selector::class(rule.target.clone()))
                .into_iter()
                .filter(|el| is_inside(&self.doc, *el, section))
                .collect();
            for (index, element) in targets.into_iter().enumerate() {
                if self.doc.has_class(element, &rule.class) {
                    continue;
                }
                let delay = rule.delay(index);
                if delay.is_zero() {
                    self.doc.add_class(element, &rule.class);
                } else {
                    self.scheduler.run_after(
                        delay,
                        Task::AddClass {
                            element,
                            class: rule.class.clone(),
                        },
                    );
                }
            }
        }
    }

    /// Start a new epoch so every tracked element can animate again
    fn reset_animations(&mut self) {
        let reveal = &self.config.classes.reveal;
        for tracked in self.dispatcher.iter().filter(|t| t.has_animated) {
            self.doc.remove_class(tracked.element, reveal);
        }
        self.dispatcher.clear();
        self.counters.clear();
        self.observer.clear();
        self.register_tracked();
    }

    // =========================================================================
    // Host events
    // =========================================================================

    fn on_scroll(&mut self) {
        self.refresh_visibility();
        if !self.loaded {
            return;
        }
        self.throttled_scroll_effects();
    }

    /// Apply scroll effects if the throttle admits it, otherwise make sure
    /// one trailing pass picks up the final offset
    fn throttled_scroll_effects(&mut self) {
        if self.throttle.admit(self.scheduler.now()) {
            self.apply_scroll_effects();
            return;
        }
        if !self.trailing_scroll {
            self.trailing_scroll = true;
            self.scheduler
                .run_after(self.config.timing.scroll_throttle(), Task::TrailingScroll);
        }
    }

    fn apply_scroll_effects(&mut self) {
        let viewport = self.doc.viewport();
        let scroll = viewport.scroll_y;
        let effects = &self.config.scroll_effects;

        if let Some(header) = self.doc.get_by_id(&self.config.classes.nav_header_id) {
            let opacity = (scroll / effects.header_fade_distance).min(effects.header_max_opacity);
            let [r, g, b] = effects.header_rgb;
            self.doc
                .set_style(header, "background", &format!("rgba({r}, {g}, {b}, {opacity})"));
        }

        if scroll < viewport.height {
            let parallax = Selector::class(effects.parallax_class.clone());
            if let Some(bonfire) = self.doc.query(&parallax) {
                let offset = scroll * effects.parallax_factor;
                self.doc
                    .set_style(bonfire, "transform", &format!("translateY({offset}px)"));
            }
        }

        self.highlighter.update(&mut self.doc, scroll);
    }

    fn on_resize(&mut self) {
        self.nav.on_resize(&mut self.doc);
        if self.config.reset_on_resize {
            tracing::debug!("Portfolio: resize starts a new animation epoch");
            self.reset_animations();
        }
        self.refresh_visibility();
        if self.loaded {
            self.rebuild_particles();
        }
    }

    fn on_click(&mut self, target: ElementId) {
        if let Some(id) = self.notifications.close_target(&self.doc, target) {
            self.dismiss_notification(id);
            return;
        }
        if self.nav.is_toggle(&self.doc, target) {
            self.nav.toggle(&mut self.doc);
            return;
        }
        let mut current = Some(target);
        while let Some(el) = current {
            if self.nav.navigate(&mut self.doc, el) {
                return;
            }
            current = self.doc.parent(el);
        }
        self.nav.flip_card(&mut self.doc, target);
    }

    fn on_submit(&mut self, target: ElementId) {
        if self.doc.get_by_id(&self.config.classes.contact_form_id) != Some(target) {
            return;
        }
        match self.form.submit(&mut self.doc, target) {
            Ok(Some(_)) => {
                self.scheduler
                    .run_after(self.config.timing.submit_latency(), Task::CompleteSubmission);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!("Portfolio: contact form rejected: {}", err);
                self.show_notification(&err.to_string(), Severity::Error);
            }
        }
    }

    fn trigger_easter_egg(&mut self) {
        tracing::info!("Portfolio: konami code entered");
        self.show_notification(EASTER_EGG_MESSAGE, Severity::Success);

        let body = self.doc.body();
        self.doc.set_style(body, "filter", EASTER_EGG_FILTER);
        self.scheduler
            .run_after(self.config.timing.easter_egg_filter(), Task::RestoreFilter);

        if !self.config.particles.enabled {
            return;
        }
        let generation = self.fireworks.generation();
        let stagger = self.config.particles.easter_egg_stagger();
        for i in 0..self.config.particles.easter_egg_count {
            self.scheduler.run_after(
                stagger * i as u32,
                Task::SpawnParticle {
                    host: ParticleHost::Body,
                    generation,
                },
            );
        }
    }

    // =========================================================================
    // Particles
    // =========================================================================

    fn spawn_interval(&self) -> Duration {
        self.config
            .particles
            .spawn_interval()
            .max(self.scheduler.frame_interval())
    }

    fn start_particles(&mut self, generation: u64) {
        let particles = &self.config.particles;
        if !particles.enabled {
            return;
        }
        if self.doc.get_by_id(&self.config.classes.particle_container_id).is_none() {
            tracing::debug!("Portfolio: no particle container, skipping particles");
            return;
        }
        let stagger = particles.spawn_stagger();
        for i in 0..particles.initial_count {
            self.scheduler.run_after(
                stagger * i as u32,
                Task::SpawnParticle {
                    host: ParticleHost::Hero,
                    generation,
                },
            );
        }
        let interval = self.spawn_interval();
        self.scheduler
            .run_after(interval, Task::SpawnInterval { generation });
    }

    fn spawn_particle(&mut self, host: ParticleHost, generation: u64) {
        let (field, parent) = match host {
            ParticleHost::Hero => (
                &mut self.embers,
                self.doc.get_by_id(&self.config.classes.particle_container_id),
            ),
            ParticleHost::Body => (&mut self.fireworks, Some(self.doc.body())),
        };
        if generation != field.generation() {
            return;
        }
        let Some(parent) = parent else {
            return;
        };

        let element = self
            .doc
            .create_element(parent, &[self.config.classes.particle.as_str()]);
        let id = field.spawn(element, self.doc.viewport());
        if let Some(particle) = field.get(id) {
            for (property, value) in particle.initial_style() {
                self.doc.set_style(element, property, &value);
            }
        }
        self.scheduler
            .run_on_next_frame(Task::ParticleFrame { host, id });
    }

    fn particle_frame(&mut self, host: ParticleHost, id: ParticleId) {
        let field = match host {
            ParticleHost::Hero => &mut self.embers,
            ParticleHost::Body => &mut self.fireworks,
        };
        match field.step(id) {
            Some(ParticleFrame::Moved {
                element,
                top,
                left,
                opacity,
            }) => {
                if !self.doc.is_connected(element) {
                    field.remove(id);
                    return;
                }
                self.doc.set_style(element, "top", &top);
                self.doc.set_style(element, "left", &left);
                self.doc.set_style(element, "opacity", &opacity);
                self.scheduler
                    .run_on_next_frame(Task::ParticleFrame { host, id });
            }
            Some(ParticleFrame::Expired { element }) => self.doc.remove(element),
            None => {}
        }
    }

    fn rebuild_particles(&mut self) {
        let Some(container) = self.doc.get_by_id(&self.config.classes.particle_container_id) else {
            return;
        };
        self.doc.clear_children(container);
        let generation = self.embers.next_generation();
        tracing::debug!("Portfolio: rebuilding particles, generation {}", generation);
        self.scheduler.run_after(
            self.config.timing.resize_rebuild(),
            Task::RebuildParticles { generation },
        );
    }
}

/// Whether `el` is `ancestor` or one of its descendants
fn is_inside(doc: &dyn Document, el: ElementId, ancestor: ElementId) -> bool {
    let mut current = Some(el);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = doc.parent(node);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{reference_page, PageHandles};
    use ember_core::{MemoryDocument, Mutation};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn portfolio(mut config: VariantConfig) -> (Portfolio<MemoryDocument>, PageHandles) {
        config.particles.seed = Some(11);
        let (doc, page) = reference_page(&config);
        (Portfolio::new(doc, config).unwrap(), page)
    }

    #[test]
    fn test_loading_once() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        assert!(!p.is_loaded());

        p.handle_event(HostEvent::Load);
        assert!(p.is_loaded());
        assert!(p.document().has_class(page.loading_screen, "hidden"));

        p.advance(ms(500));
        assert_eq!(
            p.document().style(page.loading_screen, "display").as_deref(),
            Some("none")
        );

        // The simulated delay was cancelled and a second load is ignored
        p.handle_event(HostEvent::Load);
        p.advance(ms(3000));
        let hidden_adds = p
            .document()
            .mutations()
            .iter()
            .filter(|m| matches!(m, Mutation::ClassAdded { el, class } if *el == page.loading_screen && class == "hidden"))
            .count();
        assert_eq!(hidden_adds, 1);
    }

    #[test]
    fn test_simulated_loading_delay() {
        let (mut p, _) = portfolio(VariantConfig::ember());
        p.advance(ms(2499));
        assert!(!p.is_loaded());
        p.advance(ms(1));
        assert!(p.is_loaded());
    }

    #[test]
    fn test_hero_reveal_steps() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        p.handle_event(HostEvent::Load);

        p.advance(ms(300));
        assert!(p.document().has_class(page.hero[0], "animate-in"));
        assert!(!p.document().has_class(page.hero[1], "animate-in"));
        p.advance(ms(900));
        assert!(page.hero.iter().all(|h| p.document().has_class(*h, "animate-in")));
    }

    #[test]
    fn test_scroll_effects_wait_for_load() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        p.document_mut().set_scroll(50.0);
        p.handle_event(HostEvent::Scroll);
        assert_eq!(p.document().style(page.header, "background"), None);

        p.handle_event(HostEvent::Load);
        p.advance(ms(20));
        p.handle_event(HostEvent::Scroll);
        assert_eq!(
            p.document().style(page.header, "background").as_deref(),
            Some("rgba(27, 26, 23, 0.5)")
        );
        assert_eq!(
            p.document().style(page.bonfire, "transform").as_deref(),
            Some("translateY(25px)")
        );
    }

    #[test]
    fn test_header_opacity_caps() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        p.handle_event(HostEvent::Load);
        p.document_mut().set_scroll(3000.0);
        p.handle_event(HostEvent::Scroll);
        assert_eq!(
            p.document().style(page.header, "background").as_deref(),
            Some("rgba(27, 26, 23, 0.95)")
        );
        // Past the viewport height the parallax is left alone
        assert_eq!(p.document().style(page.bonfire, "transform"), None);
    }

    #[test]
    fn test_particles_spawn_and_expire() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        p.advance(Duration::ZERO);
        assert_eq!(p.document().children(page.particles).len(), 1);

        // Spawned at 0, 200, ... 1000; none has risen out of view yet
        p.advance(ms(1000));
        assert_eq!(p.document().children(page.particles).len(), 6);
        assert_eq!(p.particle_count(), 6);

        // A particle crosses the viewport in at most ~4s, so only the
        // periodic spawner's most recent embers remain
        p.advance(Duration::from_secs(60));
        assert!(p.document().children(page.particles).len() <= 3);
    }

    #[test]
    fn test_hidden_page_skips_periodic_spawn() {
        let mut config = VariantConfig::ember();
        config.particles.initial_count = 0;
        let (mut p, page) = portfolio(config);

        p.document_mut().set_visible(false);
        p.handle_event(HostEvent::VisibilityChange);
        p.advance(ms(9000));
        assert!(p.document().children(page.particles).is_empty());

        p.document_mut().set_visible(true);
        p.advance(ms(3000));
        assert_eq!(p.document().children(page.particles).len(), 1);
    }

    #[test]
    fn test_resize_rebuilds_particles() {
        let (mut p, page) = portfolio(VariantConfig::ember());
        p.handle_event(HostEvent::Load);
        p.advance(ms(1000));
        assert!(!p.document().children(page.particles).is_empty());

        p.handle_event(HostEvent::Resize);
        assert!(p.document().children(page.particles).is_empty());
        assert_eq!(p.particle_generation(), 1);

        p.advance(ms(100));
        assert_eq!(p.document().children(page.particles).len(), 1);
        p.advance(ms(1000));
        assert_eq!(p.document().children(page.particles).len(), 6);
    }

    #[test]
    fn test_easter_egg() {
        let (mut p, _) = portfolio(VariantConfig::ember());
        for code in crate::konami::KONAMI_CODE {
            p.handle_event(HostEvent::KeyDown(code.to_string()));
        }
        let body = p.document().body();
        assert_eq!(
            p.document().style(body, "filter").as_deref(),
            Some("sepia(1) hue-rotate(30deg)")
        );
        let messages: Vec<_> = p.notifications().live().map(|n| n.message.clone()).collect();
        assert_eq!(messages, vec!["You Died... Just kidding!".to_string()]);

        p.advance(ms(2000));
        assert_eq!(p.document().style(body, "filter").as_deref(), Some("none"));
    }
}
