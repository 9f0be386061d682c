//! Hotset Equipset - Sets, Store and Widgets
//!
//! This crate owns every equipset for its whole lifetime.
//!
//! # Features
//!
//! - Normal, potion and cycle sets as one closed enum
//! - Ordered store with stable identity and explicit sort order
//! - Cycle-reference validation bounded by store size
//! - Sorted views cached until the next mutation
//! - Widget synchronization that always destroys before it mutates
//!
//! # Example
//!
//! ```ignore
//! use hotset_equipset::prelude::*;
//!
//! let mut store = EquipsetStore::new(RecordingBackend::new());
//! let id = store.add(Equipset::normal("Archer", NormalSet::new())?)?;
//! store.remove(id)?;
//! ```

pub mod cycle;
pub mod equipset;
pub mod sort;
pub mod store;
pub mod variant;
pub mod widget;

pub mod prelude {
    pub use crate::cycle::check_cycle_chain;
    pub use crate::equipset::{Equipset, EquipsetBody, EquipsetKind, Hotkey, Reference, WidgetOptions};
    pub use crate::sort::SortOrder;
    pub use crate::store::{EquipsetStore, LoadSummary};
    pub use crate::variant::{
        ConsumePolicy, CycleSet, EquipAction, EquipSlot, EquipTarget, NormalSet, PotionSet,
        MAX_NORMAL_ACTIONS,
    };
    pub use crate::widget::{NullBackend, RecordingBackend, WidgetBackend, WidgetOp};
}

pub use prelude::*;
