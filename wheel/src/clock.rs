//! Game countdown with pause accounting.
//!
//! All timestamps are milliseconds on the host's wall clock (`Date.now()` in
//! the browser). The clock stores no reference to time itself; every query
//! takes `now_ms`.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub duration_ms: u64,
    pub started_at_ms: Option<u64>,
    pub paused_at_ms: Option<u64>,
    /// Total time spent paused before the current pause, if any.
    pub accumulated_pause_ms: u64,
}

impl GameClock {
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms, started_at_ms: None, paused_at_ms: None, accumulated_pause_ms: 0 }
    }

    /// A clock for a room whose limit is given in whole minutes.
    #[must_use]
    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(minutes.saturating_mul(60_000))
    }

    /// Mark the start instant. Later calls keep the first one.
    pub fn start(&mut self, now_ms: u64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Freeze the countdown at `now_ms`. Ignored before start.
    pub fn pause(&mut self, now_ms: u64) {
        if self.started_at_ms.is_some() && self.paused_at_ms.is_none() {
            self.paused_at_ms = Some(now_ms);
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at_ms.is_some()
    }

    /// Time left at `now_ms`. A clock that has not started reports its full
    /// duration; a paused clock is frozen at the pause instant.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let Some(started) = self.started_at_ms else {
            return self.duration_ms;
        };
        let effective_now = self.paused_at_ms.unwrap_or(now_ms);
        let elapsed = effective_now.saturating_sub(started).saturating_sub(self.accumulated_pause_ms);
        self.duration_ms.saturating_sub(elapsed)
    }

    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.started_at_ms.is_some() && self.remaining_ms(now_ms) == 0
    }
}

/// `m:ss` with seconds rounded down.
#[must_use]
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
