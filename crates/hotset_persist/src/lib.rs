//! Hotset Persist - Documents on Disk
//!
//! This crate reads and writes the three documents Hotset uses.
//!
//! # Features
//!
//! - Equipset document codec with kind-tagged records
//! - Tolerant import: unknown kinds and bad records are skipped, missing
//!   fields take defaults
//! - Flat string settings document with legacy defaults
//! - Read-only widget manifest
//!
//! # Example
//!
//! ```ignore
//! use hotset_persist::prelude::*;
//!
//! let text = export_store(&store)?;
//! let report = import_into(&mut store, decode_document(&text)?);
//! ```

pub mod codec;
pub mod error;
pub mod manifest;
pub mod settings;

pub mod prelude {
    pub use crate::codec::{
        decode_document, encode_document, export_store, import_into, read_document, write_document,
        DecodedDocument, ImportReport, DOCUMENT_VERSION,
    };
    pub use crate::error::PersistError;
    pub use crate::manifest::WidgetManifest;
    pub use crate::settings::{Settings, SETTING_DEFAULTS};
}

pub use prelude::*;
