//! Core type definitions for the zoo engine.
//!
//! All types are serializable so hosts can hand them to a UI layer as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Stable identifier of an animal, unique within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub u32);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

/// Upper bound of every vital.
pub const VITAL_MAX: u8 = 100;

/// Clamp an arbitrary signed value into the vital range `[0, 100]`.
#[must_use]
pub fn clamp_vital(value: i64) -> u8 {
    // The clamp guarantees the cast is lossless.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.clamp(0, i64::from(VITAL_MAX)) as u8
    }
}

/// The three independent well-being stats of an animal.
///
/// Every constructor and mutator clamps to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vitals {
    /// How content the animal is.
    pub happiness: u8,
    /// How well fed the animal is (100 = full, 0 = starving).
    pub hunger: u8,
    /// How rested the animal is.
    pub energy: u8,
}

impl Vitals {
    /// All vitals at their maximum.
    pub const FULL: Self = Self {
        happiness: VITAL_MAX,
        hunger: VITAL_MAX,
        energy: VITAL_MAX,
    };

    /// All vitals at zero.
    pub const EMPTY: Self = Self {
        happiness: 0,
        hunger: 0,
        energy: 0,
    };

    /// Create vitals from arbitrary values, clamping each into range.
    #[must_use]
    pub fn new(happiness: i64, hunger: i64, energy: i64) -> Self {
        Self {
            happiness: clamp_vital(happiness),
            hunger: clamp_vital(hunger),
            energy: clamp_vital(energy),
        }
    }

    /// The weakest of the three vitals.
    #[must_use]
    pub fn lowest(&self) -> u8 {
        self.happiness.min(self.hunger).min(self.energy)
    }

    /// Merge the fields present in `patch`, clamping each.
    #[must_use]
    pub fn merged(self, patch: &VitalsPatch) -> Self {
        Self {
            happiness: patch.happiness.map_or(self.happiness, clamp_vital),
            hunger: patch.hunger.map_or(self.hunger, clamp_vital),
            energy: patch.energy.map_or(self.energy, clamp_vital),
        }
    }

    /// Whether every vital is within `[0, 100]`.
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.happiness <= VITAL_MAX && self.hunger <= VITAL_MAX && self.energy <= VITAL_MAX
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for Vitals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "happiness {} / hunger {} / energy {}",
            self.happiness, self.hunger, self.energy
        )
    }
}

/// A partial vitals update: only `Some` fields are applied.
///
/// Values are absolute targets, not deltas, and may be out of range; they
/// are clamped on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsPatch {
    /// New happiness, if changing.
    pub happiness: Option<i64>,
    /// New hunger, if changing.
    pub hunger: Option<i64>,
    /// New energy, if changing.
    pub energy: Option<i64>,
}

impl VitalsPatch {
    /// A patch that sets all three vitals.
    #[must_use]
    pub fn all(vitals: Vitals) -> Self {
        Self {
            happiness: Some(i64::from(vitals.happiness)),
            hunger: Some(i64::from(vitals.hunger)),
            energy: Some(i64::from(vitals.energy)),
        }
    }

    /// Set happiness.
    #[must_use]
    pub fn happiness(mut self, value: i64) -> Self {
        self.happiness = Some(value);
        self
    }

    /// Set hunger.
    #[must_use]
    pub fn hunger(mut self, value: i64) -> Self {
        self.hunger = Some(value);
        self
    }

    /// Set energy.
    #[must_use]
    pub fn energy(mut self, value: i64) -> Self {
        self.energy = Some(value);
        self
    }
}

// ---------------------------------------------------------------------------
// Animal
// ---------------------------------------------------------------------------

/// A playable animal tracked by the engine.
///
/// Display and content attributes are opaque to engine logic and passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Stable identifier.
    pub id: AnimalId,
    /// Display name ("Leo").
    pub name: String,
    /// Species tag ("Lion"), used for mood flavor lookup.
    pub species: String,
    /// Image reference.
    pub image: String,
    /// Tag of the mini-game this animal hosts.
    pub game: String,
    /// Current vitals.
    pub vitals: Vitals,
    /// Whether the animal is available for play.
    pub unlocked: bool,
    /// Star price to unlock.
    pub cost: u32,
    /// Short personality traits, in display order.
    #[serde(default)]
    pub characteristics: Vec<String>,
    /// Educational facts, in display order.
    #[serde(default)]
    pub facts: Vec<String>,
}

// ---------------------------------------------------------------------------
// Language preference
// ---------------------------------------------------------------------------

/// UI language preference. Persisted across sessions alongside the star balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German.
    #[default]
    De,
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Japanese.
    Ja,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Self; 5] = [Self::De, Self::En, Self::Es, Self::Fr, Self::Ja];

    /// ISO 639-1 code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Ja => "ja",
        }
    }

    /// Native display name for the language picker.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Self::De => "Deutsch",
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::Ja => "日本語",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_clamp_on_construction() {
        let v = Vitals::new(-5, 250, 40);
        assert_eq!(v, Vitals { happiness: 0, hunger: 100, energy: 40 });
    }

    #[test]
    fn lowest_picks_weakest_vital() {
        let v = Vitals::new(25, 15, 30);
        assert_eq!(v.lowest(), 15);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let v = Vitals::new(50, 60, 70);
        let merged = v.merged(&VitalsPatch::default().hunger(10_000));
        assert_eq!(merged, Vitals { happiness: 50, hunger: 100, energy: 70 });
    }

    #[test]
    fn language_round_trips_through_code() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
        assert!("xx".parse::<Language>().is_err());
    }
}
