//! Session events the host renders as notifications.
//!
//! Events are appended to a bounded [`EventLog`] shared between the zoo and
//! any open play sessions, and drained by the host once per frame.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use zoo_core::reward::PerformanceScore;
use zoo_core::types::AnimalId;

use crate::games::GameKind;

/// Events kept before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Something the player should hear about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A mini-game was opened for an animal.
    GameStarted {
        /// Session number.
        session: u64,
        /// The animal being played with.
        animal: AnimalId,
        /// The game.
        game: GameKind,
    },
    /// A running game reported progress.
    Progress {
        /// Session number.
        session: u64,
        /// Clamped score.
        score: PerformanceScore,
    },
    /// A finished game paid out.
    RewardApplied {
        /// Session number.
        session: u64,
        /// The animal that was cared for.
        animal: AnimalId,
        /// Stars credited.
        stars: u32,
        /// Balance afterwards.
        balance: u32,
    },
    /// An animal was bought.
    Unlocked {
        /// The new animal.
        animal: AnimalId,
        /// Price paid.
        cost: u32,
        /// Balance afterwards.
        balance: u32,
    },
    /// The decay process ran a pass.
    DecayTick {
        /// Passes so far.
        pass: u64,
    },
    /// The session countdown reached zero.
    ClockExpired,
}

/// Bounded, shareable event queue.
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Arc<Mutex<VecDeque<SessionEvent>>>,
    capacity: usize,
}

impl EventLog {
    /// Empty log holding at most `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Append an event, dropping the oldest one when full.
    pub fn push(&self, event: SessionEvent) {
        let mut queue = self.inner.lock();
        if queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back(event);
    }

    /// Take every pending event, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.inner.lock().drain(..).collect()
    }

    /// Pending event count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let log = EventLog::with_capacity(2);
        log.push(SessionEvent::DecayTick { pass: 1 });
        log.push(SessionEvent::DecayTick { pass: 2 });
        log.push(SessionEvent::DecayTick { pass: 3 });
        assert_eq!(
            log.drain(),
            vec![SessionEvent::DecayTick { pass: 2 }, SessionEvent::DecayTick { pass: 3 }]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let log = EventLog::default();
        let other = log.clone();
        other.push(SessionEvent::ClockExpired);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_string(&SessionEvent::Unlocked {
            animal: AnimalId(4),
            cost: 8,
            balance: 2,
        })
        .expect("json");
        assert_eq!(json, r#"{"event":"unlocked","animal":4,"cost":8,"balance":2}"#);
    }
}
