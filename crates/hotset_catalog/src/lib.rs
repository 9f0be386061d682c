//! Hotset Catalog - Selection Lists
//!
//! This crate turns live host state into the lists the UI offers when the
//! player binds something into an equipset.
//!
//! # Features
//!
//! - Weapon list (weapons plus castable spells)
//! - Item list (armor, potions and other carried items)
//! - Shout list (powers and shouts)
//! - Cycle list (names of existing equipsets)
//! - Enchanted/tempered instance splitting and a favorites-only filter
//!
//! # Example
//!
//! ```ignore
//! use hotset_catalog::prelude::*;
//!
//! let options = CatalogOptions::default().favorites_only(true);
//! let weapons = build_weapon_list(&host, &options);
//! assert_eq!(weapons[0].target, CatalogTarget::Nothing);
//! ```

pub mod builder;
pub mod catalog;
pub mod entry;
pub mod filter;

pub mod prelude {
    pub use crate::builder::{
        build_cycle_list, build_item_list, build_shout_list, build_weapon_list,
    };
    pub use crate::catalog::{Catalog, CatalogOptions};
    pub use crate::entry::{CatalogEntry, CatalogTarget};
    pub use crate::filter::{is_denied, DENIED_MAGIC};
}

pub use prelude::*;
