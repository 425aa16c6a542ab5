//! Konami code detector

use std::collections::VecDeque;

/// `↑ ↑ ↓ ↓ ← → ← → B A` as `KeyboardEvent.code` values
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Sliding window over the most recent key codes
#[derive(Clone, Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<String>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns `true` when the sequence completes
    ///
    /// The window is cleared after a match.
    pub fn push(&mut self, code: &str) -> bool {
        self.recent.push_back(code.to_string());
        if self.recent.len() > KONAMI_CODE.len() {
            self.recent.pop_front();
        }
        if self.recent.iter().map(String::as_str).eq(KONAMI_CODE.iter().copied()) {
            self.recent.clear();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sequence() {
        let mut k = KonamiDetector::new();
        let hits: Vec<_> = KONAMI_CODE.iter().map(|c| k.push(c)).collect();
        assert_eq!(hits.iter().filter(|h| **h).count(), 1);
        assert!(*hits.last().unwrap());
    }

    #[test]
    fn test_leading_noise_is_ignored() {
        let mut k = KonamiDetector::new();
        for code in ["KeyX", "ArrowUp", "Enter"] {
            assert!(!k.push(code));
        }
        let last = KONAMI_CODE.iter().map(|c| k.push(c)).last();
        assert_eq!(last, Some(true));
    }

    #[test]
    fn test_buffer_cleared_after_match() {
        let mut k = KonamiDetector::new();
        for code in KONAMI_CODE {
            k.push(code);
        }
        // The tail of the previous match does not count towards a new one
        for code in &KONAMI_CODE[..9] {
            assert!(!k.push(code));
        }
        assert!(k.push("KeyA"));
    }
}
