//! Progression Ledger — the star balance, unlock purchases, and the single
//! ingestion point for mini-game performance scores.
//!
//! The ledger owns only the balance and the reward policy. The registry is
//! passed in explicitly on every call that touches an animal, so tests can
//! pair any ledger with any registry.

use tracing::{debug, info, warn};

use crate::config::{EconomyConfig, RewardConfig};
use crate::error::{Result, ZooError};
use crate::registry::Registry;
use crate::reward::{FullRestore, PerformanceScore, RewardPolicy, Settlement};
use crate::types::{AnimalId, Vitals, VitalsPatch};

/// Result of a successful unlock purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockReceipt {
    /// The animal that was unlocked.
    pub animal: AnimalId,
    /// Stars spent.
    pub cost: u32,
    /// Balance after the purchase.
    pub balance: u32,
}

/// Result of a reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardReceipt {
    /// The rewarded animal.
    pub animal: AnimalId,
    /// Score the game reported.
    pub score: PerformanceScore,
    /// Vitals after restoration.
    pub vitals: Vitals,
    /// Stars credited.
    pub stars_granted: u32,
    /// Balance after the credit.
    pub balance: u32,
}

/// Star balance plus reward policy.
#[derive(Debug)]
pub struct Ledger {
    stars: u32,
    policy: Box<dyn RewardPolicy>,
}

impl Ledger {
    /// Create a ledger with a starting balance and reward policy.
    #[must_use]
    pub fn new(starting_stars: u32, policy: Box<dyn RewardPolicy>) -> Self {
        Self {
            stars: starting_stars,
            policy,
        }
    }

    /// Create a ledger from configuration.
    #[must_use]
    pub fn from_config(economy: &EconomyConfig, reward: &RewardConfig) -> Self {
        Self::new(economy.starting_stars, reward.build_policy())
    }

    /// When the active policy pays out a game session.
    #[must_use]
    pub fn settlement(&self) -> Settlement {
        self.policy.settlement()
    }

    /// Current balance.
    #[must_use]
    pub fn stars(&self) -> u32 {
        self.stars
    }

    /// Whether the balance covers `cost`.
    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.stars >= cost
    }

    /// Unconditional credit. Returns the new balance.
    pub fn grant_stars(&mut self, amount: u32) -> u32 {
        self.stars = self.stars.saturating_add(amount);
        debug!(amount, stars = self.stars, "Stars granted");
        self.stars
    }

    /// Replace the balance, e.g. with one loaded from a saved profile.
    pub fn restore_balance(&mut self, stars: u32) {
        self.stars = stars;
    }

    /// Swap the reward policy.
    pub fn set_policy(&mut self, policy: Box<dyn RewardPolicy>) {
        self.policy = policy;
    }

    /// Buy an animal.
    ///
    /// Checks run before any mutation, so a failed purchase leaves both the
    /// balance and the animal untouched.
    ///
    /// # Errors
    /// - [`ZooError::AnimalNotFound`] if the ID is unknown.
    /// - [`ZooError::AlreadyUnlocked`] if the animal is already available.
    /// - [`ZooError::InsufficientFunds`] if the balance is below the cost.
    pub fn purchase_unlock(&mut self, registry: &mut Registry, id: AnimalId) -> Result<UnlockReceipt> {
        let animal = registry.get(id)?;
        if animal.unlocked {
            debug!(animal = %id, "Unlock ignored: already unlocked");
            return Err(ZooError::AlreadyUnlocked(id));
        }
        let cost = animal.cost;
        if !self.can_afford(cost) {
            warn!(animal = %id, cost, stars = self.stars, "Unlock rejected: insufficient stars");
            return Err(ZooError::InsufficientFunds {
                cost,
                balance: self.stars,
            });
        }

        registry.set_unlocked(id, true)?;
        self.stars -= cost;
        info!(animal = %id, cost, stars = self.stars, "Animal unlocked");

        Ok(UnlockReceipt {
            animal: id,
            cost,
            balance: self.stars,
        })
    }

    /// Apply a mini-game's result to an animal and the balance.
    ///
    /// # Errors
    /// Returns [`ZooError::AnimalNotFound`] if the ID is unknown; nothing
    /// changes in that case.
    pub fn reward(
        &mut self,
        registry: &mut Registry,
        id: AnimalId,
        score: impl Into<PerformanceScore>,
    ) -> Result<RewardReceipt> {
        let score = score.into();
        let current = registry.get(id)?.vitals;
        let outcome = self.policy.assess(score, &current);
        let vitals = registry.update_vitals(id, &VitalsPatch::all(outcome.vitals))?;
        let balance = self.grant_stars(outcome.stars);

        debug!(
            animal = %id,
            score = score.value(),
            stars = outcome.stars,
            "Reward applied"
        );

        Ok(RewardReceipt {
            animal: id,
            score,
            vitals,
            stars_granted: outcome.stars,
            balance,
        })
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(EconomyConfig::default().starting_stars, Box::new(FullRestore::default()))
    }
}
