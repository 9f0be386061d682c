//! Sorted views over the store

use crate::equipset::Equipset;
use serde::{Deserialize, Serialize};

/// How the equipset list is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Natural store order
    #[default]
    CreationAscending,
    /// Newest first, by sort position
    CreationDescending,
    /// By name, A to Z
    NameAscending,
    /// By name, Z to A
    NameDescending,
}

impl SortOrder {
    /// Map the numeric settings value
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::CreationAscending),
            1 => Some(Self::CreationDescending),
            2 => Some(Self::NameAscending),
            3 => Some(Self::NameDescending),
            _ => None,
        }
    }

    /// Numeric settings value
    pub fn index(&self) -> u32 {
        match self {
            Self::CreationAscending => 0,
            Self::CreationDescending => 1,
            Self::NameAscending => 2,
            Self::NameDescending => 3,
        }
    }
}

/// Positions into `sets`, ordered by `order_by`. Stable: ties keep natural order.
pub(crate) fn sorted_positions(sets: &[&Equipset], order_by: SortOrder) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..sets.len()).collect();
    match order_by {
        SortOrder::CreationAscending => {}
        SortOrder::CreationDescending => {
            positions.sort_by(|&a, &b| sets[b].cmp_order(sets[a]));
        }
        SortOrder::NameAscending => {
            positions.sort_by(|&a, &b| sets[a].name.cmp(&sets[b].name));
        }
        SortOrder::NameDescending => {
            positions.sort_by(|&a, &b| sets[b].name.cmp(&sets[a].name));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipset::EquipsetBody;
    use crate::variant::NormalSet;

    fn set(name: &str, order: u32) -> Equipset {
        Equipset::from_parts(name, order, EquipsetBody::Normal(NormalSet::new()))
    }

    #[test]
    fn test_from_index() {
        assert_eq!(SortOrder::from_index(2), Some(SortOrder::NameAscending));
        assert_eq!(SortOrder::from_index(4), None);
        assert_eq!(SortOrder::NameDescending.index(), 3);
    }

    #[test]
    fn test_name_sorts_are_reverses() {
        let sets = [set("b", 0), set("c", 1), set("a", 2)];
        let refs: Vec<&Equipset> = sets.iter().collect();

        let asc = sorted_positions(&refs, SortOrder::NameAscending);
        let mut desc = sorted_positions(&refs, SortOrder::NameDescending);
        assert_eq!(asc, vec![2, 0, 1]);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_ties_keep_natural_order() {
        let sets = [set("x", 0), set("a", 1), set("x", 2)];
        let refs: Vec<&Equipset> = sets.iter().collect();

        assert_eq!(sorted_positions(&refs, SortOrder::NameAscending), vec![1, 0, 2]);
        assert_eq!(sorted_positions(&refs, SortOrder::NameDescending), vec![0, 2, 1]);
    }

    #[test]
    fn test_creation_descending_uses_order() {
        let sets = [set("a", 5), set("b", 1), set("c", 9)];
        let refs: Vec<&Equipset> = sets.iter().collect();

        assert_eq!(sorted_positions(&refs, SortOrder::CreationDescending), vec![2, 0, 1]);
        assert_eq!(sorted_positions(&refs, SortOrder::CreationAscending), vec![0, 1, 2]);
    }
}
