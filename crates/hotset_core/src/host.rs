//! Host state queried by the catalog builder
//!
//! The host application owns inventory, spells and shouts. Hotset only reads
//! them through [`HostState`], so every type here is a plain snapshot.

use crate::id::{ExtraDataRef, FormId};
use serde::{Deserialize, Serialize};

/// Form type of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    /// Weapons
    Weapon,
    /// Armor, clothing and jewelry
    Armor,
    /// Leveled list placeholders (never selectable)
    LeveledItem,
    /// Potions, food and poisons
    Potion,
    /// Anything else carried in the inventory
    Other,
}

/// Base form information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInfo {
    /// Form identifier
    pub id: FormId,
    /// Base display name
    pub name: String,
    /// Form type
    pub kind: FormKind,
}

impl FormInfo {
    /// Create form info
    pub fn new(id: u32, name: impl Into<String>, kind: FormKind) -> Self {
        Self {
            id: FormId(id),
            name: name.into(),
            kind,
        }
    }

    /// Create a weapon form
    pub fn weapon(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, FormKind::Weapon)
    }

    /// Create an armor form
    pub fn armor(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, FormKind::Armor)
    }

    /// Create a potion form
    pub fn potion(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, FormKind::Potion)
    }
}

/// Per-instance metadata attached to part of a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraData {
    /// Host token identifying this instance
    pub handle: ExtraDataRef,
    /// Carries an enchantment
    pub enchanted: bool,
    /// Carries a temper level
    pub tempered: bool,
    /// Marked favorite by the player
    pub favorited: bool,
    /// Custom display name, if renamed
    pub display_name: Option<String>,
}

impl ExtraData {
    /// Create plain extra data with no flags
    pub fn new(handle: u64) -> Self {
        Self {
            handle: ExtraDataRef(handle),
            enchanted: false,
            tempered: false,
            favorited: false,
            display_name: None,
        }
    }

    /// Mark as enchanted
    pub fn enchanted(mut self) -> Self {
        self.enchanted = true;
        self
    }

    /// Mark as tempered
    pub fn tempered(mut self) -> Self {
        self.tempered = true;
        self
    }

    /// Mark as favorited
    pub fn favorited(mut self) -> Self {
        self.favorited = true;
        self
    }

    /// Set custom display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Whether this instance differs from the base item
    pub fn is_distinct(&self) -> bool {
        self.enchanted || self.tempered
    }
}

/// One inventory stack as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStack {
    /// Base form
    pub form: FormInfo,
    /// Total count (may disagree with extra lists in corrupted saves)
    pub count: i32,
    /// Extra-data lists, one per distinct sub-stack
    pub extra_lists: Option<Vec<ExtraData>>,
}

impl InventoryStack {
    /// Create a stack without extra data
    pub fn new(form: FormInfo, count: i32) -> Self {
        Self {
            form,
            count,
            extra_lists: None,
        }
    }

    /// Attach an extra-data list
    pub fn with_extra(mut self, extra: ExtraData) -> Self {
        self.extra_lists.get_or_insert_with(Vec::new).push(extra);
        self
    }

    /// Extra lists, empty when the host reported none
    pub fn extras(&self) -> &[ExtraData] {
        self.extra_lists.as_deref().unwrap_or(&[])
    }

    /// Number of favorited extra lists
    pub fn favorited_count(&self) -> usize {
        self.extras().iter().filter(|x| x.favorited).count()
    }

    /// Whether any sub-stack is favorited
    pub fn is_favorited(&self) -> bool {
        self.favorited_count() > 0
    }
}

/// Magic type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicKind {
    /// Castable spell
    Spell,
    /// Once-per-day power
    Power,
    /// Shout
    Shout,
    /// Abilities, diseases and other passive effects
    Other,
}

/// A spell, power or shout known by an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicInfo {
    /// Form identifier
    pub id: FormId,
    /// Display name
    pub name: String,
    /// Magic type
    pub kind: MagicKind,
    /// Marked favorite in the magic menu
    pub favorited: bool,
}

impl MagicInfo {
    /// Create magic info
    pub fn new(id: u32, name: impl Into<String>, kind: MagicKind) -> Self {
        Self {
            id: FormId(id),
            name: name.into(),
            kind,
            favorited: false,
        }
    }

    /// Mark as favorited
    pub fn favorited(mut self) -> Self {
        self.favorited = true;
        self
    }
}

/// Live host state, queried and never owned
pub trait HostState {
    /// Player inventory stacks
    fn inventory(&self) -> Vec<InventoryStack>;
    /// Spells and powers on the base actor record
    fn base_spells(&self) -> Vec<MagicInfo>;
    /// Spells and powers added to the live actor
    fn actor_spells(&self) -> Vec<MagicInfo>;
    /// Shouts on the base actor record
    fn base_shouts(&self) -> Vec<MagicInfo>;
}

/// Owned host state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Inventory stacks
    pub inventory: Vec<InventoryStack>,
    /// Base actor spells
    pub base_spells: Vec<MagicInfo>,
    /// Live actor spells
    pub actor_spells: Vec<MagicInfo>,
    /// Base actor shouts
    pub base_shouts: Vec<MagicInfo>,
}

impl HostSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inventory stack
    pub fn with_stack(mut self, stack: InventoryStack) -> Self {
        self.inventory.push(stack);
        self
    }

    /// Add a base actor spell or power
    pub fn with_base_spell(mut self, spell: MagicInfo) -> Self {
        self.base_spells.push(spell);
        self
    }

    /// Add a live actor spell or power
    pub fn with_actor_spell(mut self, spell: MagicInfo) -> Self {
        self.actor_spells.push(spell);
        self
    }

    /// Add a base actor shout
    pub fn with_shout(mut self, shout: MagicInfo) -> Self {
        self.base_shouts.push(shout);
        self
    }
}

impl HostState for HostSnapshot {
    fn inventory(&self) -> Vec<InventoryStack> {
        self.inventory.clone()
    }

    fn base_spells(&self) -> Vec<MagicInfo> {
        self.base_spells.clone()
    }

    fn actor_spells(&self) -> Vec<MagicInfo> {
        self.actor_spells.clone()
    }

    fn base_shouts(&self) -> Vec<MagicInfo> {
        self.base_shouts.clone()
    }
}
