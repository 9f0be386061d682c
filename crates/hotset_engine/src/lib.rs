//! Hotset Engine - Equipset Hotkeys
//!
//! The engine ties the Hotset crates together behind one context object that
//! the menu layer drives.
//!
//! # Features
//!
//! - One owning context: config, settings, widget manifest, catalog and store
//! - Catalog queries for weapons, items, shouts and cycle targets
//! - Sorted equipset listing driven by the saved sort setting
//! - Import and export of the equipset document
//! - Widget lifecycle control
//! - A mutex-guarded handle for multithreaded hosts
//!
//! # Example
//!
//! ```ignore
//! use hotset_engine::prelude::*;
//!
//! let mut ctx = HotkeyContext::new(EngineConfig::default(), NullBackend);
//! ctx.load_settings()?;
//! ctx.import_equipsets()?;
//! ctx.rebuild_catalog(&host);
//! for set in ctx.get_sorted_equipset_list(None) {
//!     println!("{}", set.name);
//! }
//! ```

pub mod config;
pub mod context;
pub mod shared;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::context::HotkeyContext;
    pub use crate::shared::SharedContext;

    pub use hotset_catalog::{CatalogEntry, CatalogOptions, CatalogTarget};
    pub use hotset_core::{EquipsetError, EquipsetId, FormId, HostState, InvalidReason, Result};
    pub use hotset_equipset::{
        CycleSet, Equipset, EquipsetKind, NormalSet, NullBackend, PotionSet, SortOrder,
        WidgetBackend,
    };
    pub use hotset_persist::{ImportReport, Settings, WidgetManifest};
}

pub use prelude::*;
