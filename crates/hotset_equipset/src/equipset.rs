//! The equipset type shared by every variant

use crate::variant::{ConsumePolicy, CycleSet, EquipTarget, NormalSet, PotionSet, MAX_NORMAL_ACTIONS};
use hotset_core::{EquipsetError, FormId, InvalidReason, Result, WidgetHandle};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Equipset kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipsetKind {
    /// Fixed list of equip actions
    Normal,
    /// Single consumable
    Potion,
    /// Round-robin over other sets
    Cycle,
}

impl EquipsetKind {
    /// Tag used in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Potion => "Potion",
            Self::Cycle => "Cycle",
        }
    }

    /// Parse a record tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Normal" => Some(Self::Normal),
            "Potion" => Some(Self::Potion),
            "Cycle" => Some(Self::Cycle),
            _ => None,
        }
    }

    /// Parse the numeric tag older documents used
    pub fn from_legacy(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Potion),
            2 => Some(Self::Cycle),
            _ => None,
        }
    }
}

impl fmt::Display for EquipsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hotkey binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    /// Key code (0 = unbound)
    #[serde(default)]
    pub key: u32,
    /// Modifier key code
    #[serde(default)]
    pub modifier: Option<u32>,
}

impl Hotkey {
    /// Bind a plain key
    pub fn new(key: u32) -> Self {
        Self { key, modifier: None }
    }

    /// Add a modifier
    pub fn with_modifier(mut self, modifier: u32) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Check if a key is bound
    pub fn is_bound(&self) -> bool {
        self.key != 0
    }
}

/// Widget placement chosen for this set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOptions {
    /// Widget icon name from the widget manifest (empty = no widget)
    #[serde(default)]
    pub icon: String,
    /// Horizontal offset
    #[serde(default)]
    pub offset_x: i32,
    /// Vertical offset
    #[serde(default)]
    pub offset_y: i32,
    /// Show the set name next to the icon
    #[serde(default)]
    pub show_name: bool,
}

/// External thing an equipset points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reference {
    /// Host form
    Form(FormId),
    /// Another equipset, by name
    Equipset(String),
}

/// Variant payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipsetBody {
    /// Normal set
    Normal(NormalSet),
    /// Potion set
    Potion(PotionSet),
    /// Cycle set
    Cycle(CycleSet),
}

/// A named equipset
#[derive(Debug)]
pub struct Equipset {
    /// Display name (not unique)
    pub name: String,
    /// Sort position, assigned by the store
    pub order: u32,
    /// Hotkey binding
    pub hotkey: Hotkey,
    /// Widget placement
    pub widget: WidgetOptions,
    /// Play the equip sound
    pub equip_sound: bool,
    /// Variant payload
    pub body: EquipsetBody,
    /// Live widget, owned by this set
    handle: Option<WidgetHandle>,
}

impl Equipset {
    fn with_body(name: impl Into<String>, body: EquipsetBody) -> Self {
        Self {
            name: name.into(),
            order: 0,
            hotkey: Hotkey::default(),
            widget: WidgetOptions::default(),
            equip_sound: true,
            body,
            handle: None,
        }
    }

    /// Create a normal set
    pub fn normal(name: impl Into<String>, set: NormalSet) -> Result<Self> {
        Self::with_body(name, EquipsetBody::Normal(set)).validated()
    }

    /// Create a potion set
    pub fn potion(name: impl Into<String>, set: PotionSet) -> Result<Self> {
        Self::with_body(name, EquipsetBody::Potion(set)).validated()
    }

    /// Create a cycle set
    pub fn cycle(name: impl Into<String>, set: CycleSet) -> Result<Self> {
        Self::with_body(name, EquipsetBody::Cycle(set)).validated()
    }

    /// Create from a body without validating; used by decoders that flag instead of failing
    pub fn from_parts(name: impl Into<String>, order: u32, body: EquipsetBody) -> Self {
        let mut set = Self::with_body(name, body);
        set.order = order;
        set
    }

    /// Set hotkey
    pub fn with_hotkey(mut self, hotkey: Hotkey) -> Self {
        self.hotkey = hotkey;
        self
    }

    /// Set widget placement
    pub fn with_widget(mut self, widget: WidgetOptions) -> Self {
        self.widget = widget;
        self
    }

    /// Set equip sound
    pub fn with_equip_sound(mut self, enabled: bool) -> Self {
        self.equip_sound = enabled;
        self
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Check variant fields that do not depend on other sets
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EquipsetError::invalid(&self.name, InvalidReason::EmptyName));
        }

        match &self.body {
            EquipsetBody::Normal(set) if set.actions.len() > MAX_NORMAL_ACTIONS => {
                Err(EquipsetError::invalid(
                    &self.name,
                    InvalidReason::TooManyActions {
                        count: set.actions.len(),
                        max: MAX_NORMAL_ACTIONS,
                    },
                ))
            }
            EquipsetBody::Potion(set) if set.policy == ConsumePolicy::Count(0) => {
                Err(EquipsetError::invalid(&self.name, InvalidReason::ZeroQuantity))
            }
            EquipsetBody::Cycle(set) if set.members.iter().any(|m| *m == self.name) => {
                Err(EquipsetError::invalid(&self.name, InvalidReason::SelfReference))
            }
            _ => Ok(()),
        }
    }

    /// Kind tag
    pub fn kind(&self) -> EquipsetKind {
        match self.body {
            EquipsetBody::Normal(_) => EquipsetKind::Normal,
            EquipsetBody::Potion(_) => EquipsetKind::Potion,
            EquipsetBody::Cycle(_) => EquipsetKind::Cycle,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Everything this set points at
    pub fn references(&self) -> BTreeSet<Reference> {
        match &self.body {
            EquipsetBody::Normal(set) => set
                .actions
                .iter()
                .filter_map(|a| match a.target {
                    EquipTarget::Form(id) => Some(Reference::Form(id)),
                    EquipTarget::Unequip => None,
                })
                .collect(),
            EquipsetBody::Potion(set) => BTreeSet::from([Reference::Form(set.item)]),
            EquipsetBody::Cycle(set) => set
                .members
                .iter()
                .map(|m| Reference::Equipset(m.clone()))
                .collect(),
        }
    }

    /// Cycle members, if this is a cycle set
    pub fn cycle_members(&self) -> Option<&[String]> {
        match &self.body {
            EquipsetBody::Cycle(set) => Some(set.members.as_slice()),
            _ => None,
        }
    }

    /// Compare by sort position
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }

    /// Live widget handle
    pub fn widget_handle(&self) -> Option<WidgetHandle> {
        self.handle
    }

    pub(crate) fn set_widget_handle(&mut self, handle: Option<WidgetHandle>) {
        self.handle = handle;
    }

    pub(crate) fn take_widget_handle(&mut self) -> Option<WidgetHandle> {
        self.handle.take()
    }
}

// A clone is detached from the store and owns no widget.
impl Clone for Equipset {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            order: self.order,
            hotkey: self.hotkey,
            widget: self.widget.clone(),
            equip_sound: self.equip_sound,
            body: self.body.clone(),
            handle: None,
        }
    }
}

// Widget handles are volatile and excluded from equality.
impl PartialEq for Equipset {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.order == other.order
            && self.hotkey == other.hotkey
            && self.widget == other.widget
            && self.equip_sound == other.equip_sound
            && self.body == other.body
    }
}

impl Eq for Equipset {}
