//! Reveal-on-scroll tracking
//!
//! Models the page's one-shot reveal animation: an element transitions
//! Pending -> Revealed the first time its visibility ratio reaches the
//! threshold, and never goes back. The caller stops observing an element as
//! soon as `intersect` says it revealed, so repeated scrolling cannot
//! restart the animation.

use std::collections::HashMap;

pub const DEFAULT_THRESHOLD: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Tracks reveal state per element key.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    elements: HashMap<String, RevealState>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            elements: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start tracking an element. Re-observing a revealed element does not
    /// reset it.
    pub fn observe(&mut self, element: impl Into<String>) {
        self.elements
            .entry(element.into())
            .or_insert(RevealState::Pending);
    }

    /// Report a visibility ratio for an element. Returns true exactly once
    /// per element, on the first ratio at or above the threshold; the caller
    /// should then apply the show class and stop observing. Unknown elements
    /// and sub-threshold ratios do nothing.
    pub fn intersect(&mut self, element: &str, ratio: f64) -> bool {
        if ratio < self.threshold {
            return false;
        }
        match self.elements.get_mut(element) {
            Some(state @ RevealState::Pending) => {
                *state = RevealState::Revealed;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self, element: &str) -> Option<RevealState> {
        self.elements.get(element).copied()
    }

    pub fn is_revealed(&self, element: &str) -> bool {
        self.state(element) == Some(RevealState::Revealed)
    }
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new()
    }
}
