//! Entity Registry — the authoritative animal collection.
//!
//! The registry is sized once at session start. The engine never adds or
//! removes animals afterwards; it only mutates vitals and unlock flags.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, ZooError};
use crate::types::{Animal, AnimalId, Vitals, VitalsPatch};

/// In-memory animal collection, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    animals: Vec<Animal>,
    index: HashMap<AnimalId, usize>,
}

impl Registry {
    /// Build a registry from a seed list.
    ///
    /// Vitals are re-clamped on the way in.
    ///
    /// # Errors
    /// Returns [`ZooError::Content`] if two animals share an ID.
    pub fn new(animals: Vec<Animal>) -> Result<Self> {
        let mut index = HashMap::with_capacity(animals.len());
        let mut stored = Vec::with_capacity(animals.len());
        for (pos, mut animal) in animals.into_iter().enumerate() {
            if index.insert(animal.id, pos).is_some() {
                return Err(ZooError::Content(format!("duplicate animal id {}", animal.id)));
            }
            animal.vitals = Vitals::new(
                i64::from(animal.vitals.happiness),
                i64::from(animal.vitals.hunger),
                i64::from(animal.vitals.energy),
            );
            stored.push(animal);
        }
        Ok(Self {
            animals: stored,
            index,
        })
    }

    /// All animals in insertion order, locked ones included.
    #[must_use]
    pub fn all(&self) -> &[Animal] {
        &self.animals
    }

    /// Animals available for gameplay surfaces.
    pub fn unlocked(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter().filter(|a| a.unlocked)
    }

    /// Animals still for sale.
    pub fn locked(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter().filter(|a| !a.unlocked)
    }

    /// Look up an animal.
    ///
    /// # Errors
    /// Returns [`ZooError::AnimalNotFound`] if the ID is unknown.
    pub fn get(&self, id: AnimalId) -> Result<&Animal> {
        self.index
            .get(&id)
            .map(|&pos| &self.animals[pos])
            .ok_or(ZooError::AnimalNotFound(id))
    }

    /// Merge the provided vital fields into one animal, clamping each.
    ///
    /// Returns the animal's vitals after the merge.
    ///
    /// # Errors
    /// Returns [`ZooError::AnimalNotFound`] if the ID is unknown.
    pub fn update_vitals(&mut self, id: AnimalId, patch: &VitalsPatch) -> Result<Vitals> {
        let animal = self.get_mut(id)?;
        animal.vitals = animal.vitals.merged(patch);
        debug!(animal = %id, vitals = %animal.vitals, "Vitals updated");
        Ok(animal.vitals)
    }

    /// Set an animal's unlock flag.
    ///
    /// # Errors
    /// Returns [`ZooError::AnimalNotFound`] if the ID is unknown.
    pub fn set_unlocked(&mut self, id: AnimalId, value: bool) -> Result<()> {
        self.get_mut(id)?.unlocked = value;
        Ok(())
    }

    /// Number of animals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether the registry holds no animals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Mutable access to every animal's vitals, for population-wide passes.
    pub(crate) fn vitals_mut(&mut self) -> impl Iterator<Item = &mut Vitals> {
        self.animals.iter_mut().map(|a| &mut a.vitals)
    }

    fn get_mut(&mut self, id: AnimalId) -> Result<&mut Animal> {
        let pos = *self.index.get(&id).ok_or(ZooError::AnimalNotFound(id))?;
        Ok(&mut self.animals[pos])
    }
}
