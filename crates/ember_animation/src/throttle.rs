//! Leading-edge throttle for high-frequency host events
//!
//! The first event of a window runs; everything else inside the window is
//! dropped, not queued.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Throttle {
    window: Duration,
    last_run: Option<Duration>,
    dropped: u64,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            dropped: 0,
        }
    }

    /// Whether a handler may run at `now`; records the run if so
    pub fn admit(&mut self, now: Duration) -> bool {
        match self.last_run {
            Some(last) if now < last + self.window => {
                self.dropped += 1;
                false
            }
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Events dropped so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
