//! The four selection lists, rebuilt together

use crate::builder::{build_cycle_list, build_item_list, build_shout_list, build_weapon_list};
use crate::entry::CatalogEntry;
use hotset_core::HostState;
use serde::{Deserialize, Serialize};

/// Catalog build options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOptions {
    /// Only list favorited items and magic
    pub favorites_only: bool,
}

impl CatalogOptions {
    /// Set the favorites-only filter
    pub fn favorites_only(mut self, enabled: bool) -> Self {
        self.favorites_only = enabled;
        self
    }
}

/// Cached selection lists
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: Vec<CatalogEntry>,
    items: Vec<CatalogEntry>,
    shouts: Vec<CatalogEntry>,
    cycle_targets: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every list from scratch
    pub fn rebuild<'a>(
        &mut self,
        host: &dyn HostState,
        equipset_names: impl IntoIterator<Item = &'a str>,
        options: &CatalogOptions,
    ) {
        self.weapons = build_weapon_list(host, options);
        self.items = build_item_list(host, options);
        self.shouts = build_shout_list(host, options);
        self.cycle_targets = build_cycle_list(equipset_names);
    }

    /// Rebuild only the cycle-target list
    pub fn rebuild_cycle_targets<'a>(&mut self, equipset_names: impl IntoIterator<Item = &'a str>) {
        self.cycle_targets = build_cycle_list(equipset_names);
    }

    /// Drop every list
    pub fn clear(&mut self) {
        self.weapons.clear();
        self.items.clear();
        self.shouts.clear();
        self.cycle_targets.clear();
    }

    /// Weapon list
    pub fn weapons(&self) -> &[CatalogEntry] {
        &self.weapons
    }

    /// Item list
    pub fn items(&self) -> &[CatalogEntry] {
        &self.items
    }

    /// Shout list
    pub fn shouts(&self) -> &[CatalogEntry] {
        &self.shouts
    }

    /// Cycle-target list
    pub fn cycle_targets(&self) -> &[CatalogEntry] {
        &self.cycle_targets
    }

    /// Check if nothing has been built yet
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
            && self.items.is_empty()
            && self.shouts.is_empty()
            && self.cycle_targets.is_empty()
    }
}
