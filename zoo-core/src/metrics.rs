//! Runtime counters for the zoo engine.
//!
//! Lock-free `AtomicU64` counters, incremented by the host around engine
//! calls and read on export. A snapshot can be rendered as Prometheus text.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters for engine events.
#[derive(Debug)]
pub struct EngineCounters {
    /// Rewards applied to animals.
    pub rewards_applied: AtomicU64,
    /// Stars credited (rewards and grants).
    pub stars_granted: AtomicU64,
    /// Stars spent on unlocks.
    pub stars_spent: AtomicU64,
    /// Successful unlocks.
    pub unlocks: AtomicU64,
    /// Unlock attempts rejected for any reason.
    pub unlocks_rejected: AtomicU64,
    /// Decay passes completed.
    pub decay_passes: AtomicU64,
    /// Profile saves completed.
    pub saves_completed: AtomicU64,
}

impl EngineCounters {
    /// Zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rewards_applied: AtomicU64::new(0),
            stars_granted: AtomicU64::new(0),
            stars_spent: AtomicU64::new(0),
            unlocks: AtomicU64::new(0),
            unlocks_rejected: AtomicU64::new(0),
            decay_passes: AtomicU64::new(0),
            saves_completed: AtomicU64::new(0),
        }
    }

    /// Add `n` to a counter.
    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Increment a counter by one.
    pub fn incr(counter: &AtomicU64) {
        Self::add(counter, 1);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            rewards_applied: self.rewards_applied.load(Ordering::Relaxed),
            stars_granted: self.stars_granted.load(Ordering::Relaxed),
            stars_spent: self.stars_spent.load(Ordering::Relaxed),
            unlocks: self.unlocks.load(Ordering::Relaxed),
            unlocks_rejected: self.unlocks_rejected.load(Ordering::Relaxed),
            decay_passes: self.decay_passes.load(Ordering::Relaxed),
            saves_completed: self.saves_completed.load(Ordering::Relaxed),
        }
    }
}

impl Default for EngineCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter values at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Rewards applied.
    pub rewards_applied: u64,
    /// Stars credited.
    pub stars_granted: u64,
    /// Stars spent.
    pub stars_spent: u64,
    /// Successful unlocks.
    pub unlocks: u64,
    /// Rejected unlocks.
    pub unlocks_rejected: u64,
    /// Decay passes.
    pub decay_passes: u64,
    /// Profile saves.
    pub saves_completed: u64,
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let rows = [
            ("zoo_rewards_applied_total", "Mini-game rewards applied", self.rewards_applied),
            ("zoo_stars_granted_total", "Stars credited", self.stars_granted),
            ("zoo_stars_spent_total", "Stars spent on unlocks", self.stars_spent),
            ("zoo_unlocks_total", "Animals unlocked", self.unlocks),
            ("zoo_unlocks_rejected_total", "Unlock attempts rejected", self.unlocks_rejected),
            ("zoo_decay_passes_total", "Decay passes completed", self.decay_passes),
            ("zoo_saves_completed_total", "Profile saves completed", self.saves_completed),
        ];
        let mut out = String::new();
        for (name, help, value) in rows {
            out.push_str(&format!(
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"
            ));
        }
        out
    }
}
