//! Countdown timer for session pacing.
//!
//! The timer is driven by whoever owns the event loop: call
//! [`Countdown::tick`] with the time elapsed since the previous tick. It
//! never touches drill or score state.

use std::time::Duration;

/// Result of advancing a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running, with this much time left.
    Remaining(Duration),
    /// The limit was reached during this tick.
    Expired,
    /// The countdown had already expired before this tick.
    Idle,
}

/// A countdown from a fixed limit to zero.
#[derive(Debug, Clone)]
pub struct Countdown {
    limit: Duration,
    elapsed: Duration,
}

impl Countdown {
    /// Start a countdown of `limit`.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `delta`.
    pub fn tick(&mut self, delta: Duration) -> Tick {
        if self.is_expired() {
            return Tick::Idle;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.is_expired() {
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining())
        }
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    /// Whether the limit has been reached.
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.limit
    }

    /// Start over from the full limit.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// The configured limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// Format a duration as `mm:ss`, rounding partial seconds up.
pub fn format_clock(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
