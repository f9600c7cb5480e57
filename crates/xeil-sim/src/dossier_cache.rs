//! Memoised dossiers of revealed bodies.
//!
//! Entries are keyed by [`EntityId`] and remember the `(seed, explicit
//! name)` they were generated from. A lookup with different inputs is stale
//! and regenerates the entry.
//!
//! Nothing is evicted. The cache holds one entry per distinct body revealed
//! in the session, so it is bounded by how many planets the player stops
//! beside, and a re-reveal overwrites in place.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::debug;
use xeil_cosmos::{Dossier, EntityId, Planet};

#[derive(Debug, Clone)]
struct CachedDossier {
    seed: u32,
    explicit_name: Option<String>,
    dossier: Dossier,
}

/// Dossier cache for planets and moons.
#[derive(Debug, Clone, Default)]
pub struct DossierCache {
    entries: FxHashMap<EntityId, CachedDossier>,
}

impl DossierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dossier, generating it with `generate` when absent
    /// or stale.
    pub fn get_or_insert_with(
        &mut self,
        id: EntityId,
        seed: u32,
        explicit_name: Option<&str>,
        generate: impl FnOnce() -> Dossier,
    ) -> &Dossier {
        let fresh = || CachedDossier {
            seed,
            explicit_name: explicit_name.map(str::to_string),
            dossier: generate(),
        };
        match self.entries.entry(id) {
            Entry::Occupied(mut occupied) => {
                let cached = occupied.get();
                if cached.seed != seed || cached.explicit_name.as_deref() != explicit_name {
                    debug!("Dossier for {} is stale, regenerating", occupied.key());
                    occupied.insert(fresh());
                }
                &occupied.into_mut().dossier
            }
            Entry::Vacant(vacant) => &vacant.insert(fresh()).dossier,
        }
    }

    /// Caches the dossiers of a planet and all its moons.
    pub fn reveal(&mut self, planet: &Planet) {
        self.get_or_insert_with(
            planet.entity_id(),
            planet.seed,
            planet.explicit_name.as_deref(),
            || planet.dossier(),
        );
        for moon in &planet.moons {
            self.get_or_insert_with(planet.moon_entity_id(moon.index), moon.seed, None, || {
                moon.dossier()
            });
        }
    }

    /// Cached dossier, if the entity has been revealed.
    pub fn get(&self, id: &EntityId) -> Option<&Dossier> {
        self.entries.get(id).map(|entry| &entry.dossier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
