//! Hotset Core - Shared Types
//!
//! This crate provides the types shared by every Hotset crate.
//!
//! # Features
//!
//! - Typed identifiers for host forms, extra data, equipsets and widgets
//! - The equipset error type surfaced to the UI layer
//! - The host-state trait the catalog builder queries
//! - An owned host snapshot for headless use and tests
//!
//! # Example
//!
//! ```ignore
//! use hotset_core::prelude::*;
//!
//! let host = HostSnapshot::new()
//!     .with_stack(InventoryStack::new(FormInfo::weapon(0x12EB7, "Iron Sword"), 1));
//! assert_eq!(host.inventory().len(), 1);
//! ```

pub mod error;
pub mod host;
pub mod id;

pub mod prelude {
    pub use crate::error::{EquipsetError, InvalidReason, Result};
    pub use crate::host::{
        ExtraData, FormInfo, FormKind, HostSnapshot, HostState, InventoryStack, MagicInfo,
        MagicKind,
    };
    pub use crate::id::{EquipsetId, ExtraDataRef, FormId, WidgetHandle};
}

pub use prelude::*;
