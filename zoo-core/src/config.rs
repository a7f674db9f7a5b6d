//! Configuration for the zoo engine.
//!
//! Maps directly to `zoo.toml`. Every field has a default matching the
//! shipped game, so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZooError};
use crate::types::VITAL_MAX;

/// Top-level zoo configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZooConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Star economy.
    #[serde(default)]
    pub economy: EconomyConfig,
    /// Mini-game reward policy.
    #[serde(default)]
    pub reward: RewardConfig,
    /// Periodic vitals decay.
    #[serde(default)]
    pub decay: DecayConfig,
    /// Mood flavor text lookup.
    #[serde(default)]
    pub mood: MoodConfig,
    /// Play-session countdown.
    #[serde(default)]
    pub session: SessionConfig,
    /// Wander simulation for the world view.
    #[serde(default)]
    pub world: WorldConfig,
    /// Profile persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl ZooConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ZooError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ZooError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    /// Returns `ZooError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.decay.interval_secs == 0 {
            return Err(ZooError::Config("decay.interval_secs must be > 0".into()));
        }
        if self.session.tick_millis == 0 {
            return Err(ZooError::Config("session.tick_millis must be > 0".into()));
        }
        if self.reward.ceiling > VITAL_MAX {
            return Err(ZooError::Config(format!(
                "reward.ceiling must be <= {VITAL_MAX}, got {}",
                self.reward.ceiling
            )));
        }
        if self.world.max_speed <= 0.0 || self.world.movement_speed <= 0.0 {
            return Err(ZooError::Config(
                "world.max_speed and world.movement_speed must be > 0".into(),
            ));
        }
        if self.world.animal_size <= 0.0 {
            return Err(ZooError::Config("world.animal_size must be > 0".into()));
        }
        if self.mood.fallback_species.trim().is_empty() {
            return Err(ZooError::Config("mood.fallback_species must not be empty".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Star economy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Stars granted when a fresh profile starts.
    #[serde(default = "default_10")]
    pub starting_stars: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self { starting_stars: 10 }
    }
}

/// Which built-in reward policy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    /// Restore all vitals to the ceiling and grant a flat star amount,
    /// ignoring the performance score.
    #[default]
    FullRestore,
    /// Scale both restoration and star grant by the performance score.
    ScoreScaled,
}

/// Mini-game reward policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Policy selection.
    #[serde(default)]
    pub policy: RewardMode,
    /// Vital level that a reward restores toward.
    #[serde(default = "default_100_u8")]
    pub ceiling: u8,
    /// Stars granted per game session under `full_restore`.
    #[serde(default = "default_3")]
    pub flat_stars: u32,
    /// Stars granted for a perfect score under `score_scaled`.
    #[serde(default = "default_3")]
    pub max_stars: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            policy: RewardMode::FullRestore,
            ceiling: VITAL_MAX,
            flat_stars: 3,
            max_stars: 3,
        }
    }
}

/// Periodic vitals decay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Seconds between decay passes.
    #[serde(default = "default_30_u64")]
    pub interval_secs: u64,
    /// Happiness lost per pass.
    #[serde(default = "default_2_u8")]
    pub happiness: u8,
    /// Hunger lost per pass (the most volatile vital).
    #[serde(default = "default_3_u8")]
    pub hunger: u8,
    /// Energy lost per pass (the most stable vital).
    #[serde(default = "default_1_u8")]
    pub energy: u8,
}

impl DecayConfig {
    /// Interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            happiness: 2,
            hunger: 3,
            energy: 1,
        }
    }
}

/// Mood text lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Species whose lines are used when a species has none.
    #[serde(default = "default_fallback_species")]
    pub fallback_species: String,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            fallback_species: default_fallback_species(),
        }
    }
}

/// Play-session countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Total session length in seconds.
    #[serde(default = "default_1800")]
    pub duration_secs: u64,
    /// Countdown tick period in milliseconds.
    #[serde(default = "default_1000")]
    pub tick_millis: u64,
}

impl SessionConfig {
    /// Session length as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Tick period as a [`Duration`].
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30 * 60,
            tick_millis: 1000,
        }
    }
}

/// Wander simulation tuning (world view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Sprite edge in pixels.
    #[serde(default = "default_animal_size")]
    pub animal_size: f32,
    /// Repulsion force per pixel of overlap.
    #[serde(default = "default_repulsion")]
    pub repulsion: f32,
    /// Position advance per millisecond per unit velocity.
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    /// Velocity magnitude cap.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Velocity retained (and reversed) when bouncing off an edge.
    #[serde(default = "default_edge_damping")]
    pub edge_damping: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            animal_size: 96.0,
            repulsion: 0.05,
            movement_speed: 0.03,
            max_speed: 0.4,
            edge_damping: 0.8,
        }
    }
}

/// Profile persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// SQLite database path for the saved profile.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Use WAL mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Detect save corruption via checksums.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            wal_mode: true,
            checksum_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_fallback_species() -> String { "Lion".to_string() }
fn default_db_path() -> String { "zoo_profile.db".to_string() }
fn default_animal_size() -> f32 { 96.0 }
fn default_repulsion() -> f32 { 0.05 }
fn default_movement_speed() -> f32 { 0.03 }
fn default_max_speed() -> f32 { 0.4 }
fn default_edge_damping() -> f32 { 0.8 }
fn default_1_u8() -> u8 { 1 }
fn default_2_u8() -> u8 { 2 }
fn default_3_u8() -> u8 { 3 }
fn default_100_u8() -> u8 { 100 }
fn default_3() -> u32 { 3 }
fn default_10() -> u32 { 10 }
fn default_30_u64() -> u64 { 30 }
fn default_1000() -> u64 { 1000 }
fn default_1800() -> u64 { 1800 }
