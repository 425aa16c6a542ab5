//! Integer ramp for counters
//!
//! A counter such as `50+` counts up from `0+` in a fixed number of visual
//! steps regardless of its magnitude: the increment is `ceil(N / steps)` and
//! the tick interval is `duration / (N / increment)`. The last tick is
//! clamped to `N`. The suffix (`+`) is kept on every frame.

use std::time::Duration;

/// What a counter element should display
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterTarget {
    /// Digits with an optional trailing `+`
    Numeric { value: u64, suffix: String },
    /// Anything else, shown as-is without animating
    Literal(String),
}

impl CounterTarget {
    /// Classify the element text
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let (digits, suffix) = match trimmed.strip_suffix('+') {
            Some(rest) => (rest, "+"),
            None => (trimmed, ""),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CounterTarget::Literal(trimmed.to_string());
        }
        match digits.parse::<u64>() {
            Ok(value) => CounterTarget::Numeric {
                value,
                suffix: suffix.to_string(),
            },
            Err(_) => CounterTarget::Literal(trimmed.to_string()),
        }
    }

    /// Final text of the counter
    pub fn final_text(&self) -> String {
        match self {
            CounterTarget::Numeric { value, suffix } => format!("{value}{suffix}"),
            CounterTarget::Literal(text) => text.clone(),
        }
    }
}

/// Stepping state of one counter animation
#[derive(Clone, Debug, PartialEq)]
pub struct CounterRamp {
    target: u64,
    suffix: String,
    increment: u64,
    interval: Duration,
    current: u64,
}

impl CounterRamp {
    /// Build a ramp for a numeric target
    ///
    /// Returns `None` when there is nothing to animate (literal text or a
    /// zero target); the caller shows [`CounterTarget::final_text`] directly.
    pub fn new(target: &CounterTarget, duration: Duration, steps: u64) -> Option<Self> {
        let CounterTarget::Numeric { value, suffix } = target else {
            return None;
        };
        if *value == 0 {
            return None;
        }
        let increment = value.div_ceil(steps.max(1));
        // duration / (value / increment), kept in integer nanoseconds
        let nanos = duration.as_nanos() * increment as u128 / *value as u128;
        let interval = Duration::from_nanos(nanos as u64);
        Some(Self {
            target: *value,
            suffix: suffix.clone(),
            increment,
            interval,
            current: 0,
        })
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    /// Time between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks after the initial frame
    pub fn tick_count(&self) -> u64 {
        self.target.div_ceil(self.increment)
    }

    /// Text shown before the first tick
    pub fn initial_text(&self) -> String {
        format!("0{}", self.suffix)
    }

    pub fn current_text(&self) -> String {
        format!("{}{}", self.current, self.suffix)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// Advance one tick, returning the text to display
    ///
    /// Returns `None` once the ramp has reached its target.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        self.current = (self.current + self.increment).min(self.target);
        Some(self.current_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(text: &str) -> CounterRamp {
        CounterRamp::new(&CounterTarget::parse(text), Duration::from_millis(1500), 30).unwrap()
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!(
            CounterTarget::parse("50+"),
            CounterTarget::Numeric {
                value: 50,
                suffix: "+".into()
            }
        );
        assert_eq!(
            CounterTarget::parse(" 7 "),
            CounterTarget::Numeric {
                value: 7,
                suffix: String::new()
            }
        );
        assert_eq!(CounterTarget::parse("∞"), CounterTarget::Literal("∞".into()));
        assert_eq!(CounterTarget::parse("24/7"), CounterTarget::Literal("24/7".into()));
        assert_eq!(CounterTarget::parse("+"), CounterTarget::Literal("+".into()));
        assert_eq!(CounterTarget::parse("5++"), CounterTarget::Literal("5++".into()));
    }

    #[test]
    fn test_fifty_plus_sequence() {
        let mut r = ramp("50+");
        assert_eq!(r.increment(), 2);
        assert_eq!(r.interval(), Duration::from_millis(60));
        assert_eq!(r.initial_text(), "0+");

        let mut frames = vec![r.initial_text()];
        while let Some(text) = r.tick() {
            frames.push(text);
        }
        assert_eq!(frames.first().unwrap(), "0+");
        assert_eq!(frames.last().unwrap(), "50+");

        let values: Vec<u64> = frames
            .iter()
            .map(|f| f.trim_end_matches('+').parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));

        // Completes within the duration, give or take one step
        let elapsed = r.interval() * r.tick_count() as u32;
        let duration = Duration::from_millis(1500);
        assert!(elapsed <= duration + r.interval());
        assert!(elapsed + r.interval() >= duration);
    }

    #[test]
    fn test_final_tick_is_clamped() {
        let mut r = ramp("47");
        assert_eq!(r.increment(), 2);
        let mut last = String::new();
        while let Some(text) = r.tick() {
            last = text;
        }
        assert_eq!(last, "47");
        assert_eq!(r.tick_count(), 24);
    }

    #[test]
    fn test_step_count_is_constant() {
        // Roughly 30 frames whatever the magnitude
        for n in [30u64, 300, 3000, 12345] {
            let r = ramp(&n.to_string());
            assert!((29..=31).contains(&r.tick_count()), "n={n}");
        }
        // Small targets get one frame per unit
        assert_eq!(ramp("5").tick_count(), 5);
    }

    #[test]
    fn test_nothing_to_animate() {
        let d = Duration::from_millis(1500);
        assert!(CounterRamp::new(&CounterTarget::parse("0+"), d, 30).is_none());
        assert!(CounterRamp::new(&CounterTarget::parse("many"), d, 30).is_none());
        assert_eq!(CounterTarget::parse("many").final_text(), "many");
    }
}
