//! Variant payloads: normal, potion and cycle sets

use hotset_core::{ExtraDataRef, FormId};
use serde::{Deserialize, Serialize};

/// Maximum number of equip actions in a normal set
pub const MAX_NORMAL_ACTIONS: usize = 32;

/// Where an equip action applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipSlot {
    /// Left hand weapon or spell
    LeftHand,
    /// Right hand weapon or spell
    RightHand,
    /// Shout or power slot
    Shout,
    /// Armor, clothing or other worn item
    Item,
}

/// What an equip action puts in its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipTarget {
    /// Clear the slot
    Unequip,
    /// Equip a host form
    Form(FormId),
}

/// One fixed equip step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipAction {
    /// Target slot
    pub slot: EquipSlot,
    /// What to equip
    pub target: EquipTarget,
    /// Specific enchanted or tempered instance
    #[serde(default)]
    pub extra: Option<ExtraDataRef>,
}

impl EquipAction {
    /// Equip a form into a slot
    pub fn equip(slot: EquipSlot, form: FormId) -> Self {
        Self {
            slot,
            target: EquipTarget::Form(form),
            extra: None,
        }
    }

    /// Clear a slot
    pub fn unequip(slot: EquipSlot) -> Self {
        Self {
            slot,
            target: EquipTarget::Unequip,
            extra: None,
        }
    }

    /// Pin the action to one extra-data instance
    pub fn with_extra(mut self, extra: ExtraDataRef) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Ordered list of equip actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalSet {
    /// Actions, executed in order
    #[serde(default)]
    pub actions: Vec<EquipAction>,
}

impl NormalSet {
    /// Create an empty normal set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action
    pub fn with_action(mut self, action: EquipAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// How many potions one press consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumePolicy {
    /// One per press
    Single,
    /// A fixed number per press, capped by what is carried
    Count(u32),
}

impl Default for ConsumePolicy {
    fn default() -> Self {
        Self::Single
    }
}

impl ConsumePolicy {
    /// Number consumed per press
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Count(n) => *n,
        }
    }
}

/// Single consumable bound to a hotkey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionSet {
    /// Consumable form
    pub item: FormId,
    /// Consumption policy
    #[serde(default)]
    pub policy: ConsumePolicy,
}

impl PotionSet {
    /// Create a potion set consuming one per press
    pub fn new(item: FormId) -> Self {
        Self {
            item,
            policy: ConsumePolicy::Single,
        }
    }

    /// Set consumption policy
    pub fn with_policy(mut self, policy: ConsumePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Round-robin over other equipsets by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSet {
    /// Referenced equipset names; may dangle
    #[serde(default)]
    pub members: Vec<String>,
    /// Next member to try
    #[serde(skip)]
    pub(crate) cursor: usize,
}

impl CycleSet {
    /// Create an empty cycle set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from member names
    pub fn with_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Position of the next member to try
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

// The cursor is runtime state and does not take part in equality.
impl PartialEq for CycleSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for CycleSet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_builders() {
        let action = EquipAction::equip(EquipSlot::RightHand, FormId(0x12EB7))
            .with_extra(ExtraDataRef(3));
        assert_eq!(action.target, EquipTarget::Form(FormId(0x12EB7)));
        assert_eq!(action.extra, Some(ExtraDataRef(3)));

        let clear = EquipAction::unequip(EquipSlot::Shout);
        assert_eq!(clear.target, EquipTarget::Unequip);
    }

    #[test]
    fn test_consume_policy() {
        assert_eq!(ConsumePolicy::default().quantity(), 1);
        assert_eq!(ConsumePolicy::Count(3).quantity(), 3);
    }

    #[test]
    fn test_cycle_equality_ignores_cursor() {
        let a = CycleSet::with_members(["A", "B"]);
        let mut b = a.clone();
        b.cursor = 1;
        assert_eq!(a, b);
    }

    #[test]
    fn test_action_extra_defaults() {
        let action: EquipAction =
            serde_json::from_str(r#"{"slot":"Item","target":{"Form":7}}"#).unwrap();
        assert_eq!(action.extra, None);
        assert_eq!(action.target, EquipTarget::Form(FormId(7)));
    }
}
