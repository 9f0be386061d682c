//! Catalog entries

use hotset_core::{ExtraDataRef, FormId};
use serde::{Deserialize, Serialize};

/// What selecting an entry binds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogTarget {
    /// Leave the slot alone
    Nothing,
    /// Empty the slot
    Unequip,
    /// A host form (weapon, item, spell, power, shout)
    Form(FormId),
    /// Another equipset, by name
    Equipset(String),
}

impl CatalogTarget {
    /// Check if this is a synthetic sentinel
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Nothing | Self::Unequip)
    }
}

/// One selectable line in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name
    pub name: String,
    /// Underlying reference
    pub target: CatalogTarget,
    /// Extra-data instance, for enchanted or tempered items
    pub extra: Option<ExtraDataRef>,
}

impl CatalogEntry {
    /// The "Nothing" sentinel
    pub fn nothing() -> Self {
        Self {
            name: "Nothing".to_string(),
            target: CatalogTarget::Nothing,
            extra: None,
        }
    }

    /// The "Unequip" sentinel
    pub fn unequip() -> Self {
        Self {
            name: "Unequip".to_string(),
            target: CatalogTarget::Unequip,
            extra: None,
        }
    }

    /// Entry backed by a host form
    pub fn form(name: impl Into<String>, id: FormId, extra: Option<ExtraDataRef>) -> Self {
        Self {
            name: name.into(),
            target: CatalogTarget::Form(id),
            extra,
        }
    }

    /// Entry backed by an equipset name
    pub fn equipset(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target: CatalogTarget::Equipset(name.clone()),
            name,
            extra: None,
        }
    }

    /// Form id, if this entry is backed by one
    pub fn form_id(&self) -> Option<FormId> {
        match self.target {
            CatalogTarget::Form(id) => Some(id),
            _ => None,
        }
    }
}

/// Sort scanned entries by display name and put the sentinels in front.
///
/// Byte-wise comparison; the sort is stable so equal names keep scan order.
pub(crate) fn finish_list(mut scanned: Vec<CatalogEntry>, sentinels: &[CatalogEntry]) -> Vec<CatalogEntry> {
    scanned.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let mut list = Vec::with_capacity(sentinels.len() + scanned.len());
    list.extend_from_slice(sentinels);
    list.extend(scanned);
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(CatalogEntry::nothing().target.is_sentinel());
        assert!(CatalogEntry::unequip().target.is_sentinel());
        assert!(!CatalogEntry::equipset("Archer").target.is_sentinel());
    }

    #[test]
    fn test_finish_list_stable() {
        let scanned = vec![
            CatalogEntry::form("b", FormId(1), None),
            CatalogEntry::form("a", FormId(2), None),
            CatalogEntry::form("b", FormId(3), None),
            CatalogEntry::form("B", FormId(4), None),
        ];
        let list = finish_list(scanned, &[CatalogEntry::nothing()]);

        let ids: Vec<_> = list.iter().map(|e| e.form_id()).collect();
        assert_eq!(
            ids,
            vec![None, Some(FormId(4)), Some(FormId(2)), Some(FormId(1)), Some(FormId(3))]
        );
    }
}
