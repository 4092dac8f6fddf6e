//! Click suppression after a drag.
//!
//! Browsers deliver a `click` right after the `pointerup` that ends a drag.
//! The gate swallows clicks while a drag is in progress and for a short
//! window after a drag that actually moved.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::input::DragSession;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickGate {
    suppress_until_ms: Option<u64>,
}

impl ClickGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the suppression window at `now_ms`.
    pub fn arm(&mut self, now_ms: u64, window_ms: u64) {
        self.suppress_until_ms = Some(now_ms.saturating_add(window_ms));
    }

    /// Whether a click at `now_ms` should register.
    #[must_use]
    pub fn allows(&self, session: &DragSession, now_ms: u64) -> bool {
        if session.is_active() {
            return false;
        }
        self.suppress_until_ms.map_or(true, |until| now_ms >= until)
    }

    /// Whether the post-drag window is still open at `now_ms`.
    #[must_use]
    pub fn is_suppressing(&self, now_ms: u64) -> bool {
        self.suppress_until_ms.is_some_and(|until| now_ms < until)
    }
}
