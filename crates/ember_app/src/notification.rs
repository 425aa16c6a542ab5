//! Notification lifecycle
//!
//! Transient toast messages attached to the body. Each notification moves
//! through a small state machine:
//!
//! ```text
//! Entering ──REVEAL──▶ Visible ──DISMISS──▶ Leaving ──EXIT_COMPLETE──▶ Disposed
//!     │                                        ▲
//!     └────────────────DISMISS─────────────────┘
//! ```
//!
//! Timers (display yield, auto-dismiss, exit transition) are scheduled on the
//! caller's [`TaskScheduler`] as [`NotificationTask`]s and routed back through
//! [`NotificationManager::handle`]. A task addressing a notification that has
//! moved on (or been disposed) is a no-op, so every `show` ends in exactly one
//! disposal.
//!
//! In single-active mode a new notification supersedes every live one: the
//! old ones are taken straight through `Leaving` to `Disposed` with their
//! timers cancelled.

use std::fmt;
use std::time::Duration;

use indexmap::IndexSet;
use slotmap::{new_key_type, SlotMap};

use ember_core::{ClassNames, Document, ElementId, NotificationConfig, TaskId, TaskScheduler};

new_key_type! {
    /// Handle to a notification
    pub struct NotificationId;
}

// =============================================================================
// Severity
// =============================================================================

/// Visual severity of a notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
}

impl Severity {
    /// Modifier suffix used in the class name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    fn icon<'a>(&self, config: &'a NotificationConfig) -> &'a str {
        match self {
            Severity::Success => &config.success_icon,
            Severity::Error => &config.error_icon,
            Severity::Info => &config.info_icon,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// State machine
// =============================================================================

/// Lifecycle state of a notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationState {
    /// Attached, waiting for the display yield
    #[default]
    Entering,
    /// Shown class applied
    Visible,
    /// Exit transition playing
    Leaving,
    /// Element detached, record dropped
    Disposed,
}

/// Inputs driving [`NotificationState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationEvent {
    /// Display yield elapsed
    Reveal,
    /// Auto-dismiss timer, close control, or explicit dismiss
    Dismiss,
    /// Exit transition finished
    ExitComplete,
    /// Replaced by a newer notification in single-active mode
    Supersede,
}

impl NotificationState {
    /// Next state for `event`, or `None` when the event does not apply
    pub fn on_event(&self, event: NotificationEvent) -> Option<Self> {
        use NotificationEvent::*;
        use NotificationState::*;

        match (self, event) {
            (Entering, Reveal) => Some(Visible),

            (Entering, Dismiss) | (Visible, Dismiss) => Some(Leaving),

            (Leaving, ExitComplete) => Some(Disposed),

            // Superseded notifications skip the exit transition
            (Entering, Supersede) | (Visible, Supersede) | (Leaving, Supersede) => Some(Disposed),

            _ => None,
        }
    }

    /// Whether the element is still attached
    pub fn is_live(&self) -> bool {
        !matches!(self, NotificationState::Disposed)
    }
}

// =============================================================================
// Records & tasks
// =============================================================================

/// One live notification
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub state: NotificationState,
    /// Scheduler time at which it was shown
    pub created_at: Duration,
    pub element: ElementId,
    pub close: ElementId,
    reveal_timer: Option<TaskId>,
    dismiss_timer: Option<TaskId>,
    exit_timer: Option<TaskId>,
}

impl Notification {
    fn timers(&self) -> impl Iterator<Item = TaskId> {
        [self.reveal_timer, self.dismiss_timer, self.exit_timer]
            .into_iter()
            .flatten()
    }
}

/// Deferred work for the notification manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationTask {
    Reveal(NotificationId),
    AutoDismiss(NotificationId),
    Dispose(NotificationId),
}

// =============================================================================
// Manager
// =============================================================================

/// Owns every live notification and drives its lifecycle
pub struct NotificationManager {
    config: NotificationConfig,
    classes: ClassNames,
    records: SlotMap<NotificationId, Notification>,
    /// Live notifications in show order
    order: IndexSet<NotificationId>,
    shown: u64,
    disposed: u64,
}

impl NotificationManager {
    pub fn new(config: NotificationConfig, classes: ClassNames) -> Self {
        Self {
            config,
            classes,
            records: SlotMap::with_key(),
            order: IndexSet::new(),
            shown: 0,
            disposed: 0,
        }
    }

    /// Show a new notification
    pub fn show<T: From<NotificationTask>>(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut TaskScheduler<T>,
        message: &str,
        severity: Severity,
    ) -> NotificationId {
        if self.config.single_active {
            let live: Vec<_> = self.order.iter().copied().collect();
            for id in live {
                self.supersede(doc, scheduler, id);
            }
        }

        let body = doc.body();
        let modifier = format!("{}{}", self.classes.notification_modifier, severity);
        let element = doc.create_element(body, &[self.classes.notification.as_str(), modifier.as_str()]);
        doc.set_style(element, "transform", "translateX(100%)");

        let icon = doc.create_element(element, &[self.classes.notification_icon.as_str()]);
        doc.set_text(icon, severity.icon(&self.config));
        let text = doc.create_element(element, &[self.classes.notification_message.as_str()]);
        doc.set_text(text, message);
        let close = doc.create_element(element, &[self.classes.notification_close.as_str()]);
        doc.set_text(close, "\u{00D7}");

        let created_at = scheduler.now();
        let id = self.records.insert_with_key(|id| Notification {
            id,
            message: message.to_string(),
            severity,
            state: NotificationState::Entering,
            created_at,
            element,
            close,
            reveal_timer: None,
            dismiss_timer: None,
            exit_timer: None,
        });
        self.order.insert(id);
        self.shown += 1;

        let reveal = scheduler.run_after(self.config.display_yield(), NotificationTask::Reveal(id).into());
        let dismiss = scheduler.run_after(self.config.auto_dismiss(), NotificationTask::AutoDismiss(id).into());
        if let Some(record) = self.records.get_mut(id) {
            record.reveal_timer = Some(reveal);
            record.dismiss_timer = Some(dismiss);
        }

        tracing::debug!("Notification {:?} shown ({}): {}", id, severity, message);
        id
    }

    /// Start the exit transition
    ///
    /// Returns `false` if the notification is already leaving or gone.
    pub fn dismiss<T: From<NotificationTask>>(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut TaskScheduler<T>,
        id: NotificationId,
    ) -> bool {
        let Some(record) = self.records.get_mut(id) else {
            return false;
        };
        let Some(next) = record.state.on_event(NotificationEvent::Dismiss) else {
            return false;
        };
        record.state = next;

        for timer in [record.reveal_timer.take(), record.dismiss_timer.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(timer);
        }
        doc.remove_class(record.element, &self.classes.notification_shown);
        doc.set_style(record.element, "transform", "translateX(100%)");
        record.exit_timer = Some(scheduler.run_after(self.config.exit(), NotificationTask::Dispose(id).into()));

        tracing::debug!("Notification {:?} leaving", id);
        true
    }

    /// Route a fired timer
    pub fn handle<T: From<NotificationTask>>(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut TaskScheduler<T>,
        task: NotificationTask,
    ) {
        match task {
            NotificationTask::Reveal(id) => {
                let Some(record) = self.records.get_mut(id) else {
                    return;
                };
                record.reveal_timer = None;
                if let Some(next) = record.state.on_event(NotificationEvent::Reveal) {
                    record.state = next;
                    doc.add_class(record.element, &self.classes.notification_shown);
                    doc.set_style(record.element, "transform", "translateX(0)");
                }
            }
            NotificationTask::AutoDismiss(id) => {
                if let Some(record) = self.records.get_mut(id) {
                    record.dismiss_timer = None;
                }
                self.dismiss(doc, scheduler, id);
            }
            NotificationTask::Dispose(id) => {
                let Some(record) = self.records.get_mut(id) else {
                    return;
                };
                record.exit_timer = None;
                if record.state.on_event(NotificationEvent::ExitComplete).is_some() {
                    self.dispose(doc, id);
                }
            }
        }
    }

    /// Notification whose close control is `target` or contains it
    pub fn close_target(&self, doc: &dyn Document, target: ElementId) -> Option<NotificationId> {
        let close = if doc.has_class(target, &self.classes.notification_close) {
            target
        } else {
            doc.closest_with_class(target, &self.classes.notification_close)?
        };
        self.order
            .iter()
            .copied()
            .find(|id| self.records.get(*id).is_some_and(|r| r.close == close))
    }

    /// Current state; `Disposed` for unknown ids
    pub fn state(&self, id: NotificationId) -> NotificationState {
        self.records
            .get(id)
            .map(|r| r.state)
            .unwrap_or(NotificationState::Disposed)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.records.get(id)
    }

    /// Live notifications in show order
    pub fn live(&self) -> impl Iterator<Item = &Notification> {
        self.order.iter().filter_map(|id| self.records.get(*id))
    }

    pub fn live_count(&self) -> usize {
        self.order.len()
    }

    pub fn shown_count(&self) -> u64 {
        self.shown
    }

    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    fn supersede<T>(&mut self, doc: &mut dyn Document, scheduler: &mut TaskScheduler<T>, id: NotificationId) {
        let Some(record) = self.records.get(id) else {
            return;
        };
        if record.state.on_event(NotificationEvent::Supersede).is_none() {
            return;
        }
        for timer in record.timers() {
            scheduler.cancel(timer);
        }
        tracing::debug!("Notification {:?} superseded", id);
        self.dispose(doc, id);
    }

    fn dispose(&mut self, doc: &mut dyn Document, id: NotificationId) {
        let Some(record) = self.records.remove(id) else {
            return;
        };
        self.order.shift_remove(&id);
        doc.remove(record.element);
        self.disposed += 1;
        tracing::debug!("Notification {:?} disposed", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::MemoryDocument;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Run every task due up to `until`
    fn run_until(
        manager: &mut NotificationManager,
        doc: &mut MemoryDocument,
        scheduler: &mut TaskScheduler<NotificationTask>,
        until: Duration,
    ) {
        while let Some((_, task)) = scheduler.pop_due(until) {
            manager.handle(doc, scheduler, task);
        }
        scheduler.advance_clock_to(until);
    }

    fn manager(single_active: bool) -> NotificationManager {
        NotificationManager::new(
            NotificationConfig {
                single_active,
                ..NotificationConfig::default()
            },
            ClassNames::default(),
        )
    }

    #[test]
    fn test_state_transitions() {
        use NotificationEvent::*;
        use NotificationState::*;

        assert_eq!(Entering.on_event(Reveal), Some(Visible));
        assert_eq!(Visible.on_event(Dismiss), Some(Leaving));
        assert_eq!(Entering.on_event(Dismiss), Some(Leaving));
        assert_eq!(Leaving.on_event(ExitComplete), Some(Disposed));
        assert_eq!(Leaving.on_event(Dismiss), None);
        assert_eq!(Visible.on_event(Reveal), None);
        assert_eq!(Disposed.on_event(Supersede), None);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut doc = MemoryDocument::new();
        let mut scheduler = TaskScheduler::new();
        let mut m = manager(false);

        let id = m.show(&mut doc, &mut scheduler, "Hello", Severity::Success);
        let el = m.get(id).unwrap().element;
        assert!(doc.has_class(el, "notification--success"));
        assert_eq!(m.state(id), NotificationState::Entering);

        run_until(&mut m, &mut doc, &mut scheduler, ms(100));
        assert_eq!(m.state(id), NotificationState::Visible);
        assert!(doc.has_class(el, "notification--show"));

        run_until(&mut m, &mut doc, &mut scheduler, ms(4000));
        assert_eq!(m.state(id), NotificationState::Leaving);

        run_until(&mut m, &mut doc, &mut scheduler, ms(4299));
        assert!(doc.is_connected(el));
        run_until(&mut m, &mut doc, &mut scheduler, ms(4300));
        assert_eq!(m.state(id), NotificationState::Disposed);
        assert!(!doc.is_connected(el));
        assert_eq!(m.disposed_count(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_dismiss_short_circuits_auto_dismiss() {
        let mut doc = MemoryDocument::new();
        let mut scheduler = TaskScheduler::new();
        let mut m = manager(false);

        let id = m.show(&mut doc, &mut scheduler, "Bye", Severity::Info);
        run_until(&mut m, &mut doc, &mut scheduler, ms(500));
        assert!(m.dismiss(&mut doc, &mut scheduler, id));
        assert!(!m.dismiss(&mut doc, &mut scheduler, id));

        run_until(&mut m, &mut doc, &mut scheduler, ms(10_000));
        assert_eq!(m.disposed_count(), 1);
        assert_eq!(m.shown_count(), 1);
    }

    #[test]
    fn test_dismiss_while_entering_cancels_reveal() {
        let mut doc = MemoryDocument::new();
        let mut scheduler = TaskScheduler::new();
        let mut m = manager(false);

        let id = m.show(&mut doc, &mut scheduler, "Quick", Severity::Error);
        let el = m.get(id).unwrap().element;
        assert!(m.dismiss(&mut doc, &mut scheduler, id));

        run_until(&mut m, &mut doc, &mut scheduler, ms(200));
        assert!(!doc.has_class(el, "notification--show"));
        run_until(&mut m, &mut doc, &mut scheduler, ms(300));
        assert_eq!(m.state(id), NotificationState::Disposed);
    }

    #[test]
    fn test_stacking_mode_keeps_all() {
        let mut doc = MemoryDocument::new();
        let mut scheduler: TaskScheduler<NotificationTask> = TaskScheduler::new();
        let mut m = manager(false);

        m.show(&mut doc, &mut scheduler, "one", Severity::Success);
        m.show(&mut doc, &mut scheduler, "two", Severity::Success);
        assert_eq!(m.live_count(), 2);
        let messages: Vec<_> = m.live().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two"]);
    }

    #[test]
    fn test_single_active_supersedes() {
        let mut doc = MemoryDocument::new();
        let mut scheduler = TaskScheduler::new();
        let mut m = manager(true);

        let first = m.show(&mut doc, &mut scheduler, "one", Severity::Success);
        let first_el = m.get(first).unwrap().element;
        run_until(&mut m, &mut doc, &mut scheduler, ms(1000));

        let second = m.show(&mut doc, &mut scheduler, "two", Severity::Error);
        assert_eq!(m.state(first), NotificationState::Disposed);
        assert!(!doc.is_connected(first_el));
        assert_eq!(m.live_count(), 1);

        run_until(&mut m, &mut doc, &mut scheduler, ms(20_000));
        assert_eq!(m.state(second), NotificationState::Disposed);
        assert_eq!(m.disposed_count(), 2);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_close_target_lookup() {
        let mut doc = MemoryDocument::new();
        let mut scheduler: TaskScheduler<NotificationTask> = TaskScheduler::new();
        let mut m = manager(false);

        let id = m.show(&mut doc, &mut scheduler, "x", Severity::Success);
        let close = m.get(id).unwrap().close;
        assert_eq!(m.close_target(&doc, close), Some(id));
        let element = m.get(id).unwrap().element;
        assert_eq!(m.close_target(&doc, element), None);
    }
}
