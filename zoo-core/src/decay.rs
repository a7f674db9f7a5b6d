//! Stats Decay — periodic, population-wide vital loss.
//!
//! On every interval each animal loses a fixed amount of each vital,
//! floored at zero:
//!
//!   happiness −2, hunger −3, energy −1   (defaults)
//!
//! Hunger drops fastest to keep the care loop active; energy is the most
//! stable. Decay applies to locked animals too. It never raises a vital.
//!
//! [`DecayProcess`] is the two-state (`Running` / `Stopped`) process that
//! turns elapsed wall-clock time into passes. Hosts either feed it elapsed
//! time via [`DecayProcess::advance`] or fire it from their own timer via
//! [`DecayProcess::fire`].

use std::time::Duration;

use tracing::{debug, info};

use crate::config::DecayConfig;
use crate::registry::Registry;
use crate::types::Vitals;

/// Per-pass vital losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayRates {
    /// Happiness lost per pass.
    pub happiness: u8,
    /// Hunger lost per pass.
    pub hunger: u8,
    /// Energy lost per pass.
    pub energy: u8,
}

impl From<&DecayConfig> for DecayRates {
    fn from(config: &DecayConfig) -> Self {
        Self {
            happiness: config.happiness,
            hunger: config.hunger,
            energy: config.energy,
        }
    }
}

impl Default for DecayRates {
    fn default() -> Self {
        Self::from(&DecayConfig::default())
    }
}

/// Apply one pass of decay to a set of vitals.
#[must_use]
pub fn decay_vitals(vitals: &Vitals, rates: DecayRates) -> Vitals {
    Vitals {
        happiness: vitals.happiness.saturating_sub(rates.happiness),
        hunger: vitals.hunger.saturating_sub(rates.hunger),
        energy: vitals.energy.saturating_sub(rates.energy),
    }
}

/// Run one decay pass over every animal in the registry.
///
/// Returns the number of animals whose vitals changed.
pub fn decay_pass(registry: &mut Registry, rates: DecayRates) -> usize {
    let mut changed = 0;
    for vitals in registry.vitals_mut() {
        let next = decay_vitals(vitals, rates);
        if next != *vitals {
            *vitals = next;
            changed += 1;
        }
    }
    changed
}

/// Lifecycle of the decay process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Passes are applied as time elapses.
    Running,
    /// Torn down; no further passes.
    Stopped,
}

/// The periodic decay process.
///
/// Starts in [`ProcessState::Running`]; [`DecayProcess::stop`] is terminal.
#[derive(Debug, Clone)]
pub struct DecayProcess {
    state: ProcessState,
    interval: Duration,
    rates: DecayRates,
    carry: Duration,
    passes: u64,
}

impl DecayProcess {
    /// Create a running process.
    #[must_use]
    pub fn new(interval: Duration, rates: DecayRates) -> Self {
        Self {
            state: ProcessState::Running,
            interval,
            rates,
            carry: Duration::ZERO,
            passes: 0,
        }
    }

    /// Create a running process from configuration.
    #[must_use]
    pub fn from_config(config: &DecayConfig) -> Self {
        Self::new(config.interval(), DecayRates::from(config))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Whether passes are still being applied.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == ProcessState::Running
    }

    /// Interval between passes.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total passes applied since creation.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Account for `elapsed` wall-clock time, applying one pass per full
    /// interval. Leftover time carries over to the next call.
    ///
    /// Once a pass changes nothing every later pass is a no-op, so the
    /// remaining passes are only counted. Returns the number of passes
    /// accounted for, saturating at `u32::MAX`.
    pub fn advance(&mut self, elapsed: Duration, registry: &mut Registry) -> u32 {
        if !self.is_running() || self.interval.is_zero() {
            return 0;
        }
        let total = self.carry.saturating_add(elapsed);
        let interval = self.interval.as_nanos();
        let due = total.as_nanos() / interval;
        self.carry = nanos_to_duration(total.as_nanos() % interval);

        let mut applied: u128 = 0;
        while applied < due {
            applied += 1;
            if self.apply(registry) == 0 {
                break;
            }
        }
        let idle = u64::try_from(due - applied).unwrap_or(u64::MAX);
        if idle > 0 {
            self.passes = self.passes.saturating_add(idle);
            debug!(idle, total = self.passes, "Decay passes skipped at the floor");
        }
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    /// Apply exactly one pass now, for hosts that own the timer.
    ///
    /// Returns `false` once the process is stopped.
    pub fn fire(&mut self, registry: &mut Registry) -> bool {
        if !self.is_running() {
            return false;
        }
        self.apply(registry);
        true
    }

    /// Transition to [`ProcessState::Stopped`].
    pub fn stop(&mut self) {
        if self.state == ProcessState::Running {
            self.state = ProcessState::Stopped;
            info!(passes = self.passes, "Decay process stopped");
        }
    }

    fn apply(&mut self, registry: &mut Registry) -> usize {
        let changed = decay_pass(registry, self.rates);
        self.passes = self.passes.saturating_add(1);
        debug!(pass = self.passes, changed, "Decay pass");
        changed
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    let sub = u32::try_from(nanos % NANOS_PER_SEC).unwrap_or(0);
    Duration::new(secs, sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::animal;
    use crate::types::AnimalId;

    fn registry() -> Registry {
        Registry::new(vec![
            animal(1, true, 0, Vitals::new(80, 70, 90)),
            animal(2, false, 5, Vitals::new(1, 2, 0)),
        ])
        .expect("registry")
    }

    #[test]
    fn rates_are_asymmetric() {
        let v = decay_vitals(&Vitals::new(80, 70, 90), DecayRates::default());
        assert_eq!(v, Vitals::new(78, 67, 89));
    }

    #[test]
    fn decay_floors_at_zero() {
        let v = decay_vitals(&Vitals::new(1, 2, 0), DecayRates::default());
        assert_eq!(v, Vitals::EMPTY);
        assert_eq!(decay_vitals(&Vitals::EMPTY, DecayRates::default()), Vitals::EMPTY);
    }

    #[test]
    fn pass_touches_locked_animals_too() {
        let mut reg = registry();
        let changed = decay_pass(&mut reg, DecayRates::default());
        assert_eq!(changed, 2);
        assert_eq!(reg.get(AnimalId(2)).expect("get").vitals, Vitals::EMPTY);
    }

    #[test]
    fn advance_applies_one_pass_per_interval() {
        let mut reg = registry();
        let mut process = DecayProcess::new(Duration::from_secs(30), DecayRates::default());
        assert_eq!(process.advance(Duration::from_secs(29), &mut reg), 0);
        assert_eq!(process.advance(Duration::from_secs(1), &mut reg), 1);
        assert_eq!(process.advance(Duration::from_secs(65), &mut reg), 2);
        assert_eq!(process.passes(), 3);
        assert_eq!(reg.get(AnimalId(1)).expect("get").vitals, Vitals::new(74, 61, 87));
    }

    #[test]
    fn huge_gap_floors_vitals_without_looping() {
        let mut reg = registry();
        let mut process = DecayProcess::new(Duration::from_secs(30), DecayRates::default());
        assert_eq!(process.advance(Duration::from_secs(45), &mut reg), 1);
        assert_eq!(process.advance(Duration::MAX, &mut reg), u32::MAX);
        assert_eq!(reg.get(AnimalId(1)).expect("get").vitals, Vitals::EMPTY);
        assert!(process.passes() > u64::from(u32::MAX));
        // Carry stays below one interval.
        assert_eq!(process.advance(Duration::ZERO, &mut reg), 0);
    }

    #[test]
    fn stopped_process_is_inert() {
        let mut reg = registry();
        let mut process = DecayProcess::from_config(&DecayConfig::default());
        assert_eq!(process.state(), ProcessState::Running);
        process.stop();
        assert_eq!(process.state(), ProcessState::Stopped);
        assert_eq!(process.advance(Duration::from_secs(600), &mut reg), 0);
        assert!(!process.fire(&mut reg));
        assert_eq!(reg.get(AnimalId(1)).expect("get").vitals, Vitals::new(80, 70, 90));
    }

    #[test]
    fn fire_applies_single_pass() {
        let mut reg = registry();
        let mut process = DecayProcess::from_config(&DecayConfig::default());
        assert!(process.fire(&mut reg));
        assert_eq!(reg.get(AnimalId(1)).expect("get").vitals, Vitals::new(78, 67, 89));
    }
}
