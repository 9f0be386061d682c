//! Widget synchronization backends
//!
//! The store decides when a widget must exist; a backend decides how it is
//! drawn. Backends never update a widget in place: a change is always a
//! destroy followed by a create.

use crate::equipset::Equipset;
use hotset_core::{EquipsetId, WidgetHandle};
use std::collections::HashSet;

/// Renderer-side widget lifecycle
pub trait WidgetBackend {
    /// Create a widget for an equipset.
    /// Returns `None` if the backend chose not to render one.
    fn create_widget(&mut self, id: EquipsetId, equipset: &Equipset) -> Option<WidgetHandle>;

    /// Destroy a widget previously returned by `create_widget`
    fn destroy_widget(&mut self, handle: WidgetHandle);
}

/// Backend that renders nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl WidgetBackend for NullBackend {
    fn create_widget(&mut self, _id: EquipsetId, _equipset: &Equipset) -> Option<WidgetHandle> {
        None
    }

    fn destroy_widget(&mut self, _handle: WidgetHandle) {}
}

/// A widget operation issued to a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOp {
    /// Widget created
    Create {
        /// Owning equipset
        id: EquipsetId,
        /// Equipset name at creation time
        name: String,
        /// Issued handle
        handle: WidgetHandle,
    },
    /// Widget destroyed
    Destroy {
        /// Destroyed handle
        handle: WidgetHandle,
    },
}

/// Backend that records every operation and tracks live widgets
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<WidgetOp>,
    live: HashSet<WidgetHandle>,
    next_handle: u64,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation so far
    pub fn ops(&self) -> &[WidgetOp] {
        &self.ops
    }

    /// Drain recorded operations
    pub fn take_ops(&mut self) -> Vec<WidgetOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of live widgets
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Check if a handle is live
    pub fn is_live(&self, handle: WidgetHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Names of created widgets, in creation order
    pub fn created_names(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                WidgetOp::Create { name, .. } => Some(name.as_str()),
                WidgetOp::Destroy { .. } => None,
            })
            .collect()
    }
}

impl WidgetBackend for RecordingBackend {
    fn create_widget(&mut self, id: EquipsetId, equipset: &Equipset) -> Option<WidgetHandle> {
        self.next_handle += 1;
        let handle = WidgetHandle(self.next_handle);
        self.live.insert(handle);
        self.ops.push(WidgetOp::Create {
            id,
            name: equipset.name.clone(),
            handle,
        });
        Some(handle)
    }

    fn destroy_widget(&mut self, handle: WidgetHandle) {
        if !self.live.remove(&handle) {
            log::warn!("Destroying unknown widget {:?}", handle);
        }
        self.ops.push(WidgetOp::Destroy { handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipset::EquipsetBody;
    use crate::variant::NormalSet;

    #[test]
    fn test_recording_backend() {
        let set = Equipset::from_parts("Mage", 0, EquipsetBody::Normal(NormalSet::new()));
        let mut backend = RecordingBackend::new();

        let handle = backend.create_widget(EquipsetId::from_raw(1), &set).unwrap();
        assert!(backend.is_live(handle));
        assert_eq!(backend.live_count(), 1);

        backend.destroy_widget(handle);
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.ops().len(), 2);
        assert_eq!(backend.created_names(), vec!["Mage"]);
        assert_eq!(backend.take_ops().len(), 2);
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn test_null_backend() {
        let set = Equipset::from_parts("Mage", 0, EquipsetBody::Normal(NormalSet::new()));
        assert!(NullBackend.create_widget(EquipsetId::from_raw(1), &set).is_none());
    }
}
