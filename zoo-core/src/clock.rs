//! Session countdown clock.
//!
//! A play session lasts a fixed time (30 minutes by default) shown on the
//! HUD as `mm:ss`. The clock saturates at zero and ignores ticks after that.

use std::fmt;
use std::time::Duration;

use crate::config::SessionConfig;

/// Countdown for a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    total: Duration,
    remaining: Duration,
}

impl SessionClock {
    /// A clock with `total` time left.
    #[must_use]
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    /// A clock sized from configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.duration())
    }

    /// Time left.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Full session length.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Whether the countdown has reached zero.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Count down by `elapsed`. Returns `true` if this tick expired the clock.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.is_expired() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.is_expired()
    }
}

impl fmt::Display for SessionClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.remaining.as_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}
