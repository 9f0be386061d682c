//! List builders
//!
//! Each builder rescans host state from scratch. Results are sorted by display
//! name with the sentinels first.

use crate::catalog::CatalogOptions;
use crate::entry::{finish_list, CatalogEntry};
use crate::filter::{accept_magic, expand_stack};
use hotset_core::{FormKind, HostState, MagicInfo, MagicKind};
use std::collections::BTreeSet;

/// Weapons in the inventory plus castable spells
pub fn build_weapon_list(host: &dyn HostState, options: &CatalogOptions) -> Vec<CatalogEntry> {
    let mut scanned = Vec::new();

    for stack in host.inventory() {
        if stack.count > 0 && stack.form.kind == FormKind::Weapon {
            expand_stack(&stack, options.favorites_only, &mut scanned);
        }
    }

    let spells = host.base_spells().into_iter().chain(host.actor_spells());
    collect_magic(spells, MagicKind::Spell, options, &mut scanned);

    log::debug!("Built weapon list with {} entries", scanned.len());
    finish_list(scanned, &[CatalogEntry::nothing(), CatalogEntry::unequip()])
}

/// Non-weapon inventory items
pub fn build_item_list(host: &dyn HostState, options: &CatalogOptions) -> Vec<CatalogEntry> {
    let mut scanned = Vec::new();

    for stack in host.inventory() {
        if matches!(stack.form.kind, FormKind::Weapon | FormKind::LeveledItem) || stack.count <= 0 {
            continue;
        }

        if stack.form.kind == FormKind::Armor {
            expand_stack(&stack, options.favorites_only, &mut scanned);
        } else if !options.favorites_only || stack.is_favorited() {
            scanned.push(CatalogEntry::form(stack.form.name.clone(), stack.form.id, None));
        }
    }

    log::debug!("Built item list with {} entries", scanned.len());
    finish_list(scanned, &[CatalogEntry::nothing()])
}

/// Powers from both actor records plus base shouts
pub fn build_shout_list(host: &dyn HostState, options: &CatalogOptions) -> Vec<CatalogEntry> {
    let mut scanned = Vec::new();

    let powers = host.base_spells().into_iter().chain(host.actor_spells());
    collect_magic(powers, MagicKind::Power, options, &mut scanned);
    collect_magic(host.base_shouts(), MagicKind::Shout, options, &mut scanned);

    log::debug!("Built shout list with {} entries", scanned.len());
    finish_list(scanned, &[CatalogEntry::nothing(), CatalogEntry::unequip()])
}

/// Equipset names a cycle set can point at
pub fn build_cycle_list<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<CatalogEntry> {
    let unique: BTreeSet<&str> = names.into_iter().collect();
    let scanned = unique.into_iter().map(CatalogEntry::equipset).collect();
    finish_list(scanned, &[CatalogEntry::nothing()])
}

fn collect_magic(
    magic: impl IntoIterator<Item = MagicInfo>,
    kind: MagicKind,
    options: &CatalogOptions,
    out: &mut Vec<CatalogEntry>,
) {
    for info in magic {
        if info.kind == kind && accept_magic(&info, options.favorites_only) {
            out.push(CatalogEntry::form(info.name, info.id, None));
        }
    }
}
