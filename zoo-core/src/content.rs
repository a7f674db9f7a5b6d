//! Content loading — the one-time bulk load of animal definitions.
//!
//! The content store hands over a list of records at session start. The
//! engine does not poll or subscribe; whatever is loaded here is the whole
//! population for the session.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, ZooError};
use crate::types::{Animal, AnimalId, Vitals};

const BUNDLED_ANIMALS: &str = include_str!("../data/animals.json");

/// Raw vitals as they arrive from the content store. Out-of-range values
/// are clamped on conversion.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawVitals {
    happiness: i64,
    hunger: i64,
    energy: i64,
}

/// One animal record from the content store.
#[derive(Debug, Clone, Deserialize)]
struct AnimalRecord {
    id: u32,
    name: String,
    species: String,
    #[serde(default)]
    image: String,
    game: String,
    vitals: RawVitals,
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    cost: u32,
    #[serde(default)]
    characteristics: Vec<String>,
    #[serde(default)]
    facts: Vec<String>,
    #[serde(default = "default_world")]
    world_id: String,
}

fn default_world() -> String {
    "default".to_string()
}

impl From<AnimalRecord> for Animal {
    fn from(record: AnimalRecord) -> Self {
        Self {
            id: AnimalId(record.id),
            name: record.name,
            species: record.species,
            image: record.image,
            game: record.game,
            vitals: Vitals::new(record.vitals.happiness, record.vitals.hunger, record.vitals.energy),
            unlocked: record.unlocked,
            cost: record.cost,
            characteristics: record.characteristics,
            facts: record.facts,
        }
    }
}

/// Parse a JSON catalogue, keeping only records for `world` (all worlds if
/// `None`).
///
/// # Errors
/// Returns [`ZooError::Serialization`] for malformed JSON and
/// [`ZooError::Content`] for empty selections or duplicate IDs.
pub fn animals_from_json(json: &str, world: Option<&str>) -> Result<Vec<Animal>> {
    let records: Vec<AnimalRecord> =
        serde_json::from_str(json).map_err(|e| ZooError::Serialization(e.to_string()))?;
    let total = records.len();

    let mut seen = HashSet::new();
    let mut animals = Vec::with_capacity(total);
    for record in records {
        if world.is_some_and(|w| w != record.world_id) {
            continue;
        }
        if !seen.insert(record.id) {
            return Err(ZooError::Content(format!("duplicate animal id {}", record.id)));
        }
        animals.push(Animal::from(record));
    }

    if animals.is_empty() {
        return Err(ZooError::Content(match world {
            Some(w) => format!("no animals for world '{w}'"),
            None => "empty animal catalogue".to_string(),
        }));
    }

    debug!(total, kept = animals.len(), world = ?world, "Animal catalogue parsed");
    Ok(animals)
}

/// Load a JSON catalogue from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn animals_from_file(path: &Path, world: Option<&str>) -> Result<Vec<Animal>> {
    let json = std::fs::read_to_string(path)?;
    let animals = animals_from_json(&json, world)?;
    info!(path = %path.display(), count = animals.len(), "Animal catalogue loaded");
    Ok(animals)
}

/// The sixteen seed animals shipped with the crate (world `default`).
///
/// # Errors
/// Returns an error only if the bundled file is corrupt.
pub fn bundled_animals() -> Result<Vec<Animal>> {
    animals_from_json(BUNDLED_ANIMALS, Some("default"))
}
