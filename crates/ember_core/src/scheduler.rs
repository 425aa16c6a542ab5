//! Deferred-task scheduler
//!
//! All suspension in the engine goes through this scheduler: "run after a
//! delay" (setTimeout) and "run on the next frame" (requestAnimationFrame).
//! Tasks are plain data owned by the scheduler until they come due; the
//! owner pops them with [`TaskScheduler::pop_due`] and dispatches them
//! itself, so nothing here holds callbacks or references into the engine.
//!
//! Time is virtual. The host advances the clock (from real frame timestamps
//! in a browser, by fixed steps in tests), which keeps every animation
//! deterministic.
//!
//! Ordering: tasks run by due time, and tasks due at the same instant run in
//! the order they were scheduled.

use std::collections::BTreeMap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending task, used for cancellation
    pub struct TaskId;
}

/// Default frame interval (~60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct PendingTask<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

/// Virtual-clock scheduler for deferred engine tasks
pub struct TaskScheduler<T> {
    tasks: SlotMap<TaskId, PendingTask<T>>,
    /// (due, seq) -> task, for ordered popping
    queue: BTreeMap<(u64, u64), TaskId>,
    now_ms: u64,
    next_seq: u64,
    frame_ms: u64,
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Create a scheduler whose "next frame" is `frame` away
    pub fn with_frame_interval(frame: Duration) -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BTreeMap::new(),
            now_ms: 0,
            next_seq: 0,
            frame_ms: (frame.as_millis() as u64).max(1),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Run `task` once `delay` has elapsed
    pub fn run_after(&mut self, delay: Duration, task: T) -> TaskId {
        let due_ms = self.now_ms.saturating_add(delay.as_millis() as u64);
        self.insert(due_ms, task)
    }

    /// Run `task` on the next frame boundary
    pub fn run_on_next_frame(&mut self, task: T) -> TaskId {
        let next_frame = (self.now_ms / self.frame_ms + 1) * self.frame_ms;
        self.insert(next_frame, task)
    }

    fn insert(&mut self, due_ms: u64, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tasks.insert(PendingTask { due_ms, seq, task });
        self.queue.insert((due_ms, seq), id);
        id
    }

    /// Cancel a pending task, returning it if it had not run yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let pending = self.tasks.remove(id)?;
        self.queue.remove(&(pending.due_ms, pending.seq));
        Some(pending.task)
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Time at which the earliest pending task comes due
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| Duration::from_millis(*due))
    }

    /// Pop the earliest task due at or before `deadline`
    ///
    /// The clock moves forward to the task's due time, so tasks scheduled
    /// while handling it are timed relative to when it actually fired.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TaskId, T)> {
        let deadline_ms = deadline.as_millis() as u64;
        let (&key, &id) = self.queue.iter().next()?;
        if key.0 > deadline_ms {
            return None;
        }
        self.queue.remove(&key);
        let pending = self.tasks.remove(id)?;
        self.now_ms = self.now_ms.max(pending.due_ms);
        Some((id, pending.task))
    }

    /// Move the clock forward without running anything
    ///
    /// The clock never goes backwards.
    pub fn advance_clock_to(&mut self, time: Duration) {
        self.now_ms = self.now_ms.max(time.as_millis() as u64);
    }
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
