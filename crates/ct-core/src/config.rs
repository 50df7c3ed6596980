//! Configuration for a tracking session.

use crate::catalog::Catalog;

/// Hard upper bound on heroes per scenario.
pub const MAX_HEROES: usize = 4;

/// Configuration for a tracking session.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Reference data.
    pub catalog: Catalog,
    /// Initial number of hero slots shown by the form.
    pub hero_slot_preference: usize,
    /// Whether every hero slot must carry an aspect.
    pub track_aspects: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            hero_slot_preference: 1,
            track_aspects: false,
        }
    }
}

impl TrackerConfig {
    /// Use a different catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the initial hero-slot preference (at least 1).
    pub fn with_hero_slots(mut self, slots: usize) -> Self {
        self.hero_slot_preference = slots.max(1);
        self
    }

    /// Require an aspect for every hero slot.
    pub fn with_aspects(mut self, track: bool) -> Self {
        self.track_aspects = track;
        self
    }
}
