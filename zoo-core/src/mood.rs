//! Mood Evaluator — derives a mood tier from an animal's weakest vital.
//!
//! Mood is never stored. It is recomputed from the vitals on every read,
//! using the minimum of the three so a single neglected need always shows.
//!
//! | lowest vital | tier            |
//! |--------------|-----------------|
//! | > 80         | Overjoyed       |
//! | > 60         | Good            |
//! | > 40         | NeedsAttention  |
//! | > 20         | NeedsHelp       |
//! | ≤ 20         | NotWell         |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZooError};
use crate::types::{Animal, Vitals};

const BUNDLED_MOOD_TEXTS: &str = include_str!("../data/mood_texts.toml");

/// Discrete mood tiers, ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoodTier {
    /// Lowest vital > 80.
    Overjoyed,
    /// Lowest vital 61–80.
    Good,
    /// Lowest vital 41–60.
    NeedsAttention,
    /// Lowest vital 21–40.
    NeedsHelp,
    /// Lowest vital ≤ 20.
    NotWell,
}

impl MoodTier {
    /// Classify the weakest vital into a tier.
    #[must_use]
    pub fn from_lowest(lowest: u8) -> Self {
        match lowest {
            l if l > 80 => Self::Overjoyed,
            l if l > 60 => Self::Good,
            l if l > 40 => Self::NeedsAttention,
            l if l > 20 => Self::NeedsHelp,
            _ => Self::NotWell,
        }
    }

    /// Evaluate a full set of vitals.
    #[must_use]
    pub fn evaluate(vitals: &Vitals) -> Self {
        Self::from_lowest(vitals.lowest())
    }

    /// Player-facing headline for an animal in this tier.
    #[must_use]
    pub fn headline(self, name: &str) -> String {
        match self {
            Self::Overjoyed => format!("{name} is overjoyed!"),
            Self::Good => format!("{name} feels good!"),
            Self::NeedsAttention => format!("{name} could use some attention!"),
            Self::NeedsHelp => format!("{name} needs your help!"),
            Self::NotWell => format!("{name} is not feeling well at all!"),
        }
    }

    /// Emoji shown next to the mood line.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Overjoyed => "🌟",
            Self::Good => "😊",
            Self::NeedsAttention => "😐",
            Self::NeedsHelp => "😢",
            Self::NotWell => "😭",
        }
    }
}

/// Flavor lines for one species, one per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLines {
    /// Line for [`MoodTier::Overjoyed`].
    pub overjoyed: String,
    /// Line for [`MoodTier::Good`].
    pub good: String,
    /// Line for [`MoodTier::NeedsAttention`].
    pub needs_attention: String,
    /// Line for [`MoodTier::NeedsHelp`].
    pub needs_help: String,
    /// Line for [`MoodTier::NotWell`].
    pub not_well: String,
}

impl MoodLines {
    /// The line for a tier.
    #[must_use]
    pub fn for_tier(&self, tier: MoodTier) -> &str {
        match tier {
            MoodTier::Overjoyed => &self.overjoyed,
            MoodTier::Good => &self.good,
            MoodTier::NeedsAttention => &self.needs_attention,
            MoodTier::NeedsHelp => &self.needs_help,
            MoodTier::NotWell => &self.not_well,
        }
    }
}

#[derive(Deserialize)]
struct MoodFile {
    #[serde(default)]
    species: HashMap<String, MoodLines>,
}

/// Species-keyed flavor text table with a fallback species.
#[derive(Debug, Clone)]
pub struct MoodTable {
    species: HashMap<String, MoodLines>,
    fallback: String,
}

impl MoodTable {
    /// Build a table from explicit entries.
    #[must_use]
    pub fn new(species: HashMap<String, MoodLines>, fallback: impl Into<String>) -> Self {
        Self {
            species,
            fallback: fallback.into(),
        }
    }

    /// Parse a table from TOML (`[species.<Tag>]` sections).
    ///
    /// # Errors
    /// Returns [`ZooError::Content`] if the TOML does not parse.
    pub fn from_toml(toml_str: &str, fallback: impl Into<String>) -> Result<Self> {
        let file: MoodFile =
            toml::from_str(toml_str).map_err(|e| ZooError::Content(format!("mood table: {e}")))?;
        Ok(Self::new(file.species, fallback))
    }

    /// The table shipped with the crate, covering the sixteen seed species.
    ///
    /// # Errors
    /// Returns [`ZooError::Content`] if the bundled file is corrupt.
    pub fn bundled(fallback: impl Into<String>) -> Result<Self> {
        Self::from_toml(BUNDLED_MOOD_TEXTS, fallback)
    }

    /// Flavor line for a species and tier.
    ///
    /// Unknown species use the fallback species' lines; if the fallback is
    /// missing too, the line is empty.
    #[must_use]
    pub fn line(&self, species: &str, tier: MoodTier) -> &str {
        self.species
            .get(species)
            .or_else(|| self.species.get(&self.fallback))
            .map_or("", |lines| lines.for_tier(tier))
    }

    /// Whether a species has its own lines.
    #[must_use]
    pub fn has_species(&self, species: &str) -> bool {
        self.species.contains_key(species)
    }

    /// Number of species with lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Everything a UI needs to show an animal's mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodReport {
    /// Derived tier.
    pub tier: MoodTier,
    /// The weakest vital that decided the tier.
    pub lowest: u8,
    /// "{name} feels good!"
    pub headline: String,
    /// Species flavor line.
    pub flavor: String,
    /// Tier emoji.
    pub emoji: &'static str,
}

impl MoodReport {
    /// Headline and flavor joined into one sentence pair.
    #[must_use]
    pub fn message(&self) -> String {
        if self.flavor.is_empty() {
            self.headline.clone()
        } else {
            format!("{} {}", self.headline, self.flavor)
        }
    }
}

/// Compute an animal's current mood report.
#[must_use]
pub fn describe(animal: &Animal, table: &MoodTable) -> MoodReport {
    let lowest = animal.vitals.lowest();
    let tier = MoodTier::from_lowest(lowest);
    MoodReport {
        tier,
        lowest,
        headline: tier.headline(&animal.name),
        flavor: table.line(&animal.species, tier).to_string(),
        emoji: tier.emoji(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::animal;

    #[test]
    fn tiers_follow_thresholds() {
        let cases = [
            (95, MoodTier::Overjoyed),
            (75, MoodTier::Good),
            (55, MoodTier::NeedsAttention),
            (35, MoodTier::NeedsHelp),
            (15, MoodTier::NotWell),
        ];
        for (lowest, expected) in cases {
            assert_eq!(MoodTier::from_lowest(lowest), expected, "lowest = {lowest}");
        }
    }

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(MoodTier::from_lowest(81), MoodTier::Overjoyed);
        assert_eq!(MoodTier::from_lowest(80), MoodTier::Good);
        assert_eq!(MoodTier::from_lowest(60), MoodTier::NeedsAttention);
        assert_eq!(MoodTier::from_lowest(40), MoodTier::NeedsHelp);
        assert_eq!(MoodTier::from_lowest(20), MoodTier::NotWell);
        assert_eq!(MoodTier::from_lowest(0), MoodTier::NotWell);
    }

    #[test]
    fn one_low_vital_dominates() {
        // Starving but otherwise perfect.
        let v = Vitals::new(100, 10, 100);
        assert_eq!(MoodTier::evaluate(&v), MoodTier::NotWell);
    }

    #[test]
    fn bundled_table_covers_seed_species() {
        let table = MoodTable::bundled("Lion").expect("bundled");
        assert_eq!(table.len(), 16);
        assert!(table.has_species("Elephant"));
        assert!(table.line("Lynx", MoodTier::NotWell).contains("eyes distant"));
    }

    #[test]
    fn unknown_species_falls_back() {
        let table = MoodTable::bundled("Lion").expect("bundled");
        assert_eq!(
            table.line("Dragon", MoodTier::Good),
            table.line("Lion", MoodTier::Good)
        );
    }

    #[test]
    fn missing_fallback_yields_empty_line() {
        let table = MoodTable::new(HashMap::new(), "Lion");
        assert_eq!(table.line("Tiger", MoodTier::Good), "");
    }

    #[test]
    fn describe_composes_message() {
        let table = MoodTable::bundled("Lion").expect("bundled");
        let mut leo = animal(1, true, 0, Vitals::new(25, 15, 30));
        leo.name = "Leo".to_string();
        let report = describe(&leo, &table);
        assert_eq!(report.tier, MoodTier::NotWell);
        assert_eq!(report.lowest, 15);
        assert_eq!(report.emoji, "😭");
        assert!(report.message().starts_with("Leo is not feeling well at all! It lies"));
    }
}
