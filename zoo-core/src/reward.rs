//! Reward policies — how a mini-game's performance score turns into vitals
//! restoration and stars.
//!
//! The shipped game restores every vital to full and pays a flat star grant
//! per game session, whatever the score. That behaviour is
//! [`FullRestore`]. [`ScoreScaled`] is the alternative that lets the score
//! drive both. Hosts pick one through [`RewardConfig`] or inject their own
//! [`RewardPolicy`].

use serde::{Deserialize, Serialize};

use crate::config::{RewardConfig, RewardMode};
use crate::types::{VITAL_MAX, Vitals};

/// A mini-game performance score, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct PerformanceScore(f64);

impl PerformanceScore {
    /// A perfect score.
    pub const PERFECT: Self = Self(100.0);

    /// Clamp a raw progress value. Non-finite input counts as zero.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_finite() {
            Self(raw.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// The score as a number in `[0, 100]`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The score as a fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl From<f64> for PerformanceScore {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

/// What a reward does to one animal and the star balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    /// The animal's vitals after the reward.
    pub vitals: Vitals,
    /// Stars to credit.
    pub stars: u32,
}

/// Converts a performance score into a reward.
///
/// Implementations must never return vitals lower than `current`.
pub trait RewardPolicy: Send + Sync + std::fmt::Debug {
    /// Assess a game session.
    fn assess(&self, score: PerformanceScore, current: &Vitals) -> RewardOutcome;

    /// When the host should settle a game session with this policy.
    fn settlement(&self) -> Settlement {
        Settlement::OnFinish
    }
}

/// The point in a game session at which the reward is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Pay as soon as the game opens; the score is not consulted.
    OnStart,
    /// Pay when the game closes, with its last reported score.
    OnFinish,
}

/// Restore every vital to `ceiling` and pay `stars`, ignoring the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullRestore {
    /// Restoration target.
    pub ceiling: u8,
    /// Flat grant per game session.
    pub stars: u32,
}

impl Default for FullRestore {
    fn default() -> Self {
        Self {
            ceiling: VITAL_MAX,
            stars: 3,
        }
    }
}

impl RewardPolicy for FullRestore {
    fn assess(&self, _score: PerformanceScore, current: &Vitals) -> RewardOutcome {
        RewardOutcome {
            vitals: Vitals {
                happiness: current.happiness.max(self.ceiling),
                hunger: current.hunger.max(self.ceiling),
                energy: current.energy.max(self.ceiling),
            },
            stars: self.stars,
        }
    }

    fn settlement(&self) -> Settlement {
        Settlement::OnStart
    }
}

/// Close `score%` of the gap to `ceiling` and pay a score-proportional grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreScaled {
    /// Restoration target for a perfect score.
    pub ceiling: u8,
    /// Grant for a perfect score.
    pub max_stars: u32,
}

impl ScoreScaled {
    fn raise(value: u8, ceiling: u8, fraction: f64) -> u8 {
        if value >= ceiling {
            return value;
        }
        let gap = f64::from(ceiling - value);
        // Bounded by `gap`, so it fits in u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let gain = (gap * fraction).round() as u8;
        value.saturating_add(gain).min(ceiling)
    }
}

impl RewardPolicy for ScoreScaled {
    fn assess(&self, score: PerformanceScore, current: &Vitals) -> RewardOutcome {
        let fraction = score.fraction();
        // Score is clamped to [0, 1], so the product is within [0, max_stars].
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stars = (f64::from(self.max_stars) * fraction).round() as u32;
        RewardOutcome {
            vitals: Vitals {
                happiness: Self::raise(current.happiness, self.ceiling, fraction),
                hunger: Self::raise(current.hunger, self.ceiling, fraction),
                energy: Self::raise(current.energy, self.ceiling, fraction),
            },
            stars,
        }
    }
}

impl RewardConfig {
    /// Instantiate the configured built-in policy.
    #[must_use]
    pub fn build_policy(&self) -> Box<dyn RewardPolicy> {
        match self.policy {
            RewardMode::FullRestore => Box::new(FullRestore {
                ceiling: self.ceiling,
                stars: self.flat_stars,
            }),
            RewardMode::ScoreScaled => Box::new(ScoreScaled {
                ceiling: self.ceiling,
                max_stars: self.max_stars,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_grant_settles_on_start_scaled_on_finish() {
        assert_eq!(FullRestore::default().settlement(), Settlement::OnStart);
        let scaled = ScoreScaled { ceiling: 100, max_stars: 3 };
        assert_eq!(scaled.settlement(), Settlement::OnFinish);
    }

    #[test]
    fn score_is_clamped() {
        assert!((PerformanceScore::new(150.0).value() - 100.0).abs() < f64::EPSILON);
        assert!(PerformanceScore::new(-3.0).value().abs() < f64::EPSILON);
        assert!(PerformanceScore::new(f64::NAN).value().abs() < f64::EPSILON);
    }

    #[test]
    fn full_restore_ignores_score() {
        let policy = FullRestore::default();
        let current = Vitals::new(25, 15, 30);
        let low = policy.assess(PerformanceScore::new(0.0), &current);
        let high = policy.assess(PerformanceScore::PERFECT, &current);
        assert_eq!(low, high);
        assert_eq!(low.vitals, Vitals::FULL);
        assert_eq!(low.stars, 3);
    }

    #[test]
    fn full_restore_never_lowers_vitals() {
        let policy = FullRestore { ceiling: 60, stars: 1 };
        let out = policy.assess(PerformanceScore::PERFECT, &Vitals::new(90, 20, 60));
        assert_eq!(out.vitals, Vitals::new(90, 60, 60));
    }

    #[test]
    fn scaled_closes_part_of_gap() {
        let policy = ScoreScaled { ceiling: 100, max_stars: 4 };
        let out = policy.assess(PerformanceScore::new(50.0), &Vitals::new(20, 60, 100));
        assert_eq!(out.vitals, Vitals::new(60, 80, 100));
        assert_eq!(out.stars, 2);
    }

    #[test]
    fn scaled_zero_score_changes_nothing() {
        let policy = ScoreScaled { ceiling: 100, max_stars: 4 };
        let current = Vitals::new(20, 60, 90);
        let out = policy.assess(PerformanceScore::new(0.0), &current);
        assert_eq!(out.vitals, current);
        assert_eq!(out.stars, 0);
    }

    #[test]
    fn config_selects_policy() {
        let mut config = RewardConfig::default();
        let current = Vitals::new(0, 0, 0);
        let flat = config.build_policy().assess(PerformanceScore::new(10.0), &current);
        assert_eq!(flat.vitals, Vitals::FULL);

        config.policy = RewardMode::ScoreScaled;
        let scaled = config.build_policy().assess(PerformanceScore::new(10.0), &current);
        assert_eq!(scaled.vitals, Vitals::new(10, 10, 10));
    }
}
