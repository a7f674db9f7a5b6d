//! The zoo aggregate — one explicit owner for every engine object.
//!
//! `Zoo` wires the registry, ledger, mood table, decay process, session
//! clock and world view together and is the single place the host mutates
//! game state. It is synchronous; [`SessionDriver`](crate::driver::SessionDriver)
//! shares it with timer tasks behind a mutex.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};
use zoo_core::clock::SessionClock;
use zoo_core::config::ZooConfig;
use zoo_core::content;
use zoo_core::decay::{DecayProcess, ProcessState};
use zoo_core::ledger::{Ledger, RewardReceipt, UnlockReceipt};
use zoo_core::metrics::EngineCounters;
use zoo_core::mood::{self, MoodReport, MoodTable};
use zoo_core::persistence::{ProfileStore, SavedProfile};
use zoo_core::registry::Registry;
use zoo_core::reward::{PerformanceScore, Settlement};
use zoo_core::types::{Animal, AnimalId, Language};
use zoo_core::world::WanderField;

use crate::error::{Result, SessionError};
use crate::events::{EventLog, SessionEvent};
use crate::games::GameKind;
use crate::hooks::PlaySession;

/// Initial world-view size before the host reports its window.
const DEFAULT_VIEW: (f32, f32) = (1280.0, 720.0);

/// Seed for the world-view jitter.
const WORLD_SEED: u64 = 0x200;

/// Source of per-zoo tokens stamped on the sessions each zoo opens.
static NEXT_ZOO_TOKEN: AtomicU64 = AtomicU64::new(1);

/// The engine plus its session-scoped surroundings.
#[derive(Debug)]
pub struct Zoo {
    config: ZooConfig,
    registry: Registry,
    ledger: Ledger,
    moods: MoodTable,
    decay: DecayProcess,
    clock: SessionClock,
    world: WanderField,
    language: Language,
    counters: Arc<EngineCounters>,
    events: EventLog,
    next_session: u64,
    token: u64,
}

impl Zoo {
    /// Build a zoo from explicit parts.
    ///
    /// A saved profile restores the star balance and language; everything
    /// else starts from `animals`.
    ///
    /// # Errors
    /// Returns a content error if `animals` has duplicate IDs.
    pub fn new(
        config: ZooConfig,
        animals: Vec<Animal>,
        moods: MoodTable,
        profile: Option<SavedProfile>,
    ) -> Result<Self> {
        let registry = Registry::new(animals)?;
        let mut ledger = Ledger::from_config(&config.economy, &config.reward);
        let language = match profile {
            Some(saved) => {
                ledger.restore_balance(saved.stars);
                saved.language
            }
            None => Language::default(),
        };

        let mut world = WanderField::new(DEFAULT_VIEW.0, DEFAULT_VIEW.1, config.world.clone(), WORLD_SEED);
        world.sync(&registry);

        info!(
            animals = registry.len(),
            unlocked = registry.unlocked().count(),
            stars = ledger.stars(),
            language = %language,
            "Zoo opened"
        );

        Ok(Self {
            decay: DecayProcess::from_config(&config.decay),
            clock: SessionClock::from_config(&config.session),
            registry,
            ledger,
            moods,
            world,
            language,
            counters: Arc::new(EngineCounters::new()),
            events: EventLog::default(),
            next_session: 1,
            token: NEXT_ZOO_TOKEN.fetch_add(1, Ordering::Relaxed),
            config,
        })
    }

    /// Build a zoo from the bundled catalogue and mood table.
    ///
    /// # Errors
    /// Fails only if the bundled content is malformed.
    pub fn bundled(config: ZooConfig, profile: Option<SavedProfile>) -> Result<Self> {
        let animals = content::bundled_animals()?;
        let moods = MoodTable::bundled(config.mood.fallback_species.clone())?;
        Self::new(config, animals, moods, profile)
    }

    // -- Accessors ------------------------------------------------------------

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ZooConfig {
        &self.config
    }

    /// The animal registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current star balance.
    #[must_use]
    pub fn stars(&self) -> u32 {
        self.ledger.stars()
    }

    /// Mutable access to the ledger, e.g. to swap the reward policy.
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Session countdown.
    #[must_use]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// World view.
    #[must_use]
    pub fn world(&self) -> &WanderField {
        &self.world
    }

    /// UI language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Decay passes applied so far.
    #[must_use]
    pub fn decay_passes(&self) -> u64 {
        self.decay.passes()
    }

    /// Whether the zoo has been shut down.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.decay.state() == ProcessState::Stopped
    }

    /// Shared handle to the runtime counters.
    #[must_use]
    pub fn counters(&self) -> Arc<EngineCounters> {
        Arc::clone(&self.counters)
    }

    /// Shared handle to the event log.
    #[must_use]
    pub fn events(&self) -> EventLog {
        self.events.clone()
    }

    /// Take all pending events.
    #[must_use]
    pub fn drain_events(&self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    // -- Play -----------------------------------------------------------------

    /// Open the animal's mini-game.
    ///
    /// With a policy that settles on start (the default flat grant), the
    /// animal is restored and the stars are paid here, before the game runs.
    ///
    /// # Errors
    /// - [`SessionError::Core`] with `AnimalNotFound` for an unknown ID.
    /// - [`SessionError::Locked`] if the animal has not been bought.
    /// - [`SessionError::UnknownGame`] if its game tag is not in the catalogue.
    pub fn start_game(&mut self, id: AnimalId) -> Result<PlaySession> {
        let animal = self.registry.get(id)?;
        if !animal.unlocked {
            debug!(animal = %id, "Game refused: animal is locked");
            return Err(SessionError::Locked(id));
        }
        let game = GameKind::from_tag(&animal.game)
            .ok_or_else(|| SessionError::UnknownGame(animal.game.clone()))?;

        let session = self.next_session;
        self.next_session += 1;
        info!(session, animal = %id, game = %game, "Game started");
        self.events.push(SessionEvent::GameStarted { session, animal: id, game });

        let play = PlaySession::new(session, self.token, id, game, self.events.clone());
        if self.ledger.settlement() == Settlement::OnStart {
            let receipt = self.settle(session, id, PerformanceScore::default())?;
            return Ok(play.with_prepaid(receipt));
        }
        Ok(play)
    }

    /// Close a game.
    ///
    /// Sessions already paid on start return their receipt with the final
    /// score filled in; otherwise the reward is settled now with the last
    /// reported score.
    ///
    /// # Errors
    /// - [`SessionError::ForeignSession`] if another zoo opened the session.
    /// - `AnimalNotFound` if the animal vanished from the registry.
    pub fn finish_game(&mut self, session: PlaySession) -> Result<RewardReceipt> {
        if session.owner() != self.token {
            warn!(session = session.id(), "Refusing a session opened by another zoo");
            return Err(SessionError::ForeignSession(session.id()));
        }
        let score = session.close();
        let receipt = match session.prepaid() {
            Some(prepaid) => RewardReceipt { score, ..*prepaid },
            None => self.settle(session.id(), session.animal(), score)?,
        };
        info!(
            session = session.id(),
            animal = %receipt.animal,
            score = score.value(),
            stars = receipt.balance,
            "Game finished"
        );
        Ok(receipt)
    }

    fn settle(&mut self, session: u64, id: AnimalId, score: PerformanceScore) -> Result<RewardReceipt> {
        let receipt = self.ledger.reward(&mut self.registry, id, score)?;
        EngineCounters::incr(&self.counters.rewards_applied);
        EngineCounters::add(&self.counters.stars_granted, u64::from(receipt.stars_granted));
        self.events.push(SessionEvent::RewardApplied {
            session,
            animal: receipt.animal,
            stars: receipt.stars_granted,
            balance: receipt.balance,
        });
        Ok(receipt)
    }

    // -- Economy --------------------------------------------------------------

    /// Buy a locked animal.
    ///
    /// # Errors
    /// Engine errors from [`Ledger::purchase_unlock`].
    pub fn purchase_unlock(&mut self, id: AnimalId) -> Result<UnlockReceipt> {
        match self.ledger.purchase_unlock(&mut self.registry, id) {
            Ok(receipt) => {
                EngineCounters::incr(&self.counters.unlocks);
                EngineCounters::add(&self.counters.stars_spent, u64::from(receipt.cost));
                self.world.sync(&self.registry);
                self.events.push(SessionEvent::Unlocked {
                    animal: id,
                    cost: receipt.cost,
                    balance: receipt.balance,
                });
                Ok(receipt)
            }
            Err(e) => {
                EngineCounters::incr(&self.counters.unlocks_rejected);
                Err(e.into())
            }
        }
    }

    /// Credit stars from outside the mini-games.
    pub fn grant_stars(&mut self, amount: u32) -> u32 {
        EngineCounters::add(&self.counters.stars_granted, u64::from(amount));
        self.ledger.grant_stars(amount)
    }

    // -- Timers ---------------------------------------------------------------

    /// Run one decay pass now. Returns `false` once the zoo is stopped.
    pub fn decay_tick(&mut self) -> bool {
        if !self.decay.fire(&mut self.registry) {
            return false;
        }
        self.after_decay(1);
        true
    }

    /// Account for `elapsed` time on the decay schedule. Returns passes run.
    pub fn advance_decay(&mut self, elapsed: Duration) -> u32 {
        let passes = self.decay.advance(elapsed, &mut self.registry);
        if passes > 0 {
            self.after_decay(passes);
        }
        passes
    }

    fn after_decay(&mut self, passes: u32) {
        EngineCounters::add(&self.counters.decay_passes, u64::from(passes));
        self.events.push(SessionEvent::DecayTick {
            pass: self.decay.passes(),
        });
    }

    /// Count the session clock down. Returns `true` on the tick that expires it.
    pub fn tick_clock(&mut self, elapsed: Duration) -> bool {
        let expired = self.clock.tick(elapsed);
        if expired {
            info!("Session time is up");
            self.events.push(SessionEvent::ClockExpired);
        }
        expired
    }

    /// Advance the world view by `dt_ms` milliseconds.
    pub fn step_world(&mut self, dt_ms: f32) {
        self.world.step(dt_ms);
    }

    /// Resize the world view to the host's window.
    pub fn resize_world(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Stop the decay process. Idempotent.
    pub fn stop(&mut self) {
        self.decay.stop();
    }

    // -- Presentation & persistence ------------------------------------------

    /// The player-facing mood for an animal.
    ///
    /// # Errors
    /// `AnimalNotFound` for an unknown ID.
    pub fn mood_of(&self, id: AnimalId) -> Result<MoodReport> {
        let animal = self.registry.get(id)?;
        Ok(mood::describe(animal, &self.moods))
    }

    /// Change the UI language.
    pub fn set_language(&mut self, language: Language) {
        debug!(from = %self.language, to = %language, "Language changed");
        self.language = language;
    }

    /// The persistable slice of state.
    #[must_use]
    pub fn profile(&self) -> SavedProfile {
        SavedProfile {
            stars: self.ledger.stars(),
            language: self.language,
        }
    }

    /// Write the profile to a store.
    ///
    /// # Errors
    /// Store failures are returned after being logged.
    pub fn save_profile(&self, store: &dyn ProfileStore) -> Result<()> {
        let profile = self.profile();
        if let Err(e) = store.save(&profile) {
            warn!(error = %e, "Profile save failed");
            return Err(e.into());
        }
        EngineCounters::incr(&self.counters.saves_completed);
        Ok(())
    }
}
