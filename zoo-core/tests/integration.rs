//! Integration Tests — End-to-End Engine Flows
//!
//! These tests exercise the engine the way a host does: seed from content,
//! play, buy, decay, persist and restore.

use std::time::Duration;

use zoo_core::config::{PersistenceConfig, RewardMode, ZooConfig};
use zoo_core::content;
use zoo_core::decay::DecayProcess;
use zoo_core::error::ZooError;
use zoo_core::ledger::Ledger;
use zoo_core::mood::{self, MoodTable, MoodTier};
use zoo_core::persistence::{ProfileStore, SavedProfile, SqliteProfileStore};
use zoo_core::registry::Registry;
use zoo_core::types::{Animal, AnimalId, Language, Vitals, VitalsPatch};

fn seeded() -> (Registry, Ledger, ZooConfig) {
    let config = ZooConfig::default();
    let registry = Registry::new(content::bundled_animals().expect("bundled")).expect("registry");
    let ledger = Ledger::from_config(&config.economy, &config.reward);
    (registry, ledger, config)
}

fn lone_animal(id: u32, unlocked: bool, cost: u32, vitals: Vitals) -> Animal {
    Animal {
        id: AnimalId(id),
        name: "Leo".to_string(),
        species: "Lion".to_string(),
        image: String::new(),
        game: "facts".to_string(),
        vitals,
        unlocked,
        cost,
        characteristics: vec![],
        facts: vec![],
    }
}

// ---------------------------------------------------------------------------
// Neglected animal is cheered up by a game
// ---------------------------------------------------------------------------

#[test]
fn neglected_animal_recovers_after_play() {
    let table = MoodTable::bundled("Lion").expect("moods");
    let mut registry =
        Registry::new(vec![lone_animal(1, true, 0, Vitals::new(25, 15, 30))]).expect("registry");
    let mut ledger = Ledger::from_config(&Default::default(), &Default::default());

    let before = mood::describe(registry.get(AnimalId(1)).expect("get"), &table);
    assert_eq!(before.lowest, 15);
    assert_eq!(before.tier, MoodTier::NotWell);

    ledger.reward(&mut registry, AnimalId(1), 80.0).expect("reward");

    let leo = registry.get(AnimalId(1)).expect("get");
    assert_eq!(leo.vitals, Vitals::FULL);
    assert_eq!(mood::describe(leo, &table).tier, MoodTier::Overjoyed);
}

// ---------------------------------------------------------------------------
// Unlock economy
// ---------------------------------------------------------------------------

#[test]
fn unlock_economy_end_to_end() {
    let mut registry =
        Registry::new(vec![lone_animal(4, false, 8, Vitals::FULL)]).expect("registry");
    let mut ledger = Ledger::from_config(&Default::default(), &Default::default());
    assert_eq!(ledger.stars(), 10);

    let receipt = ledger.purchase_unlock(&mut registry, AnimalId(4)).expect("purchase");
    assert_eq!(receipt.balance, 2);
    assert!(registry.get(AnimalId(4)).expect("get").unlocked);

    let err = ledger.purchase_unlock(&mut registry, AnimalId(4)).unwrap_err();
    assert!(matches!(err, ZooError::AlreadyUnlocked(_)));
    assert!(err.is_routine());
    assert_eq!(ledger.stars(), 2);
}

#[test]
fn seed_catalogue_shop_flow() {
    let (mut registry, mut ledger, _) = seeded();
    // Raja the tiger costs 5, Koko the gorilla 8. Ten stars buy Raja only.
    ledger.purchase_unlock(&mut registry, AnimalId(3)).expect("raja");
    assert_eq!(ledger.stars(), 5);
    let err = ledger.purchase_unlock(&mut registry, AnimalId(4)).unwrap_err();
    assert!(matches!(err, ZooError::InsufficientFunds { cost: 8, balance: 5 }));

    // One game session pays 3 stars, enough for Koko.
    ledger.reward(&mut registry, AnimalId(3), 10.0).expect("play");
    ledger.purchase_unlock(&mut registry, AnimalId(4)).expect("koko");
    assert_eq!(ledger.stars(), 0);
    assert_eq!(registry.unlocked().count(), 4);
}

// ---------------------------------------------------------------------------
// Decay pressure loop
// ---------------------------------------------------------------------------

#[test]
fn half_hour_of_neglect() {
    let (mut registry, _, config) = seeded();
    let mut process = DecayProcess::from_config(&config.decay);

    // 30 minutes at one pass per 30 s = 60 passes.
    let passes = process.advance(Duration::from_secs(30 * 60), &mut registry);
    assert_eq!(passes, 60);

    let leo = registry.get(AnimalId(1)).expect("leo");
    // 80 - 120, 70 - 180, 90 - 60
    assert_eq!(leo.vitals, Vitals::new(0, 0, 30));
    assert!(registry.all().iter().all(|a| a.vitals.hunger == 0));
}

#[test]
fn reward_after_decay_restores_only_player() {
    let (mut registry, mut ledger, config) = seeded();
    let mut process = DecayProcess::from_config(&config.decay);
    process.advance(Duration::from_secs(300), &mut registry);

    ledger.reward(&mut registry, AnimalId(2), 50.0).expect("reward");
    assert_eq!(registry.get(AnimalId(2)).expect("ella").vitals, Vitals::FULL);
    assert_ne!(registry.get(AnimalId(1)).expect("leo").vitals, Vitals::FULL);
}

#[test]
fn scaled_policy_from_config() {
    let config = ZooConfig::from_toml("[reward]\npolicy = \"score_scaled\"\nmax_stars = 10")
        .expect("config");
    assert_eq!(config.reward.policy, RewardMode::ScoreScaled);
    let mut registry =
        Registry::new(vec![lone_animal(1, true, 0, Vitals::new(0, 0, 0))]).expect("registry");
    let mut ledger = Ledger::from_config(&config.economy, &config.reward);

    let receipt = ledger.reward(&mut registry, AnimalId(1), 40.0).expect("reward");
    assert_eq!(receipt.vitals, Vitals::new(40, 40, 40));
    assert_eq!(receipt.stars_granted, 4);
    assert_eq!(ledger.stars(), 14);
}

// ---------------------------------------------------------------------------
// Persistence: only stars and language survive
// ---------------------------------------------------------------------------

#[test]
fn profile_survives_restart_but_vitals_reset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("profile.db");
    let persist = PersistenceConfig::default();

    {
        let (mut registry, mut ledger, _) = seeded();
        ledger.purchase_unlock(&mut registry, AnimalId(3)).expect("unlock");
        registry
            .update_vitals(AnimalId(1), &VitalsPatch::default().hunger(0))
            .expect("starve");
        let store = SqliteProfileStore::open(&db_path, &persist).expect("open");
        store
            .save(&SavedProfile {
                stars: ledger.stars(),
                language: Language::En,
            })
            .expect("save");
    }

    let store = SqliteProfileStore::open(&db_path, &persist).expect("reopen");
    let profile = store.load().expect("load").expect("saved");
    assert_eq!(profile.stars, 5);
    assert_eq!(profile.language, Language::En);

    let (registry, mut ledger, _) = seeded();
    ledger.restore_balance(profile.stars);
    assert_eq!(ledger.stars(), 5);
    // Session-scoped state comes back from content.
    assert!(!registry.get(AnimalId(3)).expect("raja").unlocked);
    assert_eq!(registry.get(AnimalId(1)).expect("leo").vitals.hunger, 70);
}
