//! Ordered, owning equipset store
//!
//! The store is the only owner of equipsets. Everything else refers to them by
//! [`EquipsetId`] or by name. Natural order is insertion order (or whatever a
//! manual move produced); `order` is the explicit sort position and stays
//! unique at all times.
//!
//! Widget handles live on the equipsets, and every mutation that removes or
//! replaces an entry destroys its widget before the backing collection
//! changes.

use crate::cycle::check_cycle_chain;
use crate::equipset::{Equipset, EquipsetBody};
use crate::sort::{sorted_positions, SortOrder};
use crate::widget::WidgetBackend;
use hotset_core::{EquipsetError, EquipsetId, InvalidReason, Result};
use std::cell::RefCell;
use std::collections::HashSet;

struct Entry {
    id: EquipsetId,
    set: Equipset,
    /// Failed validation during a batch load; kept but never rendered
    flagged: bool,
}

struct SortCache {
    order_by: SortOrder,
    generation: u64,
    positions: Vec<usize>,
}

/// Outcome of a batch load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Sets now in the store
    pub loaded: usize,
    /// Sets kept but flagged invalid
    pub flagged: usize,
    /// Sets whose duplicate `order` was reassigned
    pub reordered: usize,
}

/// Equipset store
pub struct EquipsetStore<W: WidgetBackend> {
    /// Entries in natural order
    entries: Vec<Entry>,
    /// Next identity to hand out
    next_id: u64,
    /// Highest `order` currently in use
    max_order: Option<u32>,
    /// Bumped on every mutation
    generation: u64,
    /// Last sorted view
    sort_cache: RefCell<Option<SortCache>>,
    /// Widget renderer
    backend: W,
}

impl<W: WidgetBackend> EquipsetStore<W> {
    /// Create an empty store rendering through `backend`
    pub fn new(backend: W) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            max_order: None,
            generation: 0,
            sort_cache: RefCell::new(None),
            backend,
        }
    }

    // ========== Lookup ==========

    /// Number of equipsets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an id is present
    pub fn contains(&self, id: EquipsetId) -> bool {
        self.position(id).is_some()
    }

    /// Position of an id in natural order
    pub fn position(&self, id: EquipsetId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Get an equipset
    pub fn get(&self, id: EquipsetId) -> Option<&Equipset> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.set)
    }

    /// First equipset with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<EquipsetId> {
        self.entries.iter().find(|e| e.set.name == name).map(|e| e.id)
    }

    /// Check if an equipset was flagged invalid by a batch load
    pub fn is_flagged(&self, id: EquipsetId) -> bool {
        self.entries.iter().any(|e| e.id == id && e.flagged)
    }

    /// Iterate in natural order
    pub fn iter(&self) -> impl Iterator<Item = (EquipsetId, &Equipset)> + '_ {
        self.entries.iter().map(|e| (e.id, &e.set))
    }

    /// Ids in natural order
    pub fn ids(&self) -> Vec<EquipsetId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Names in natural order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.set.name.as_str())
    }

    /// Widget backend
    pub fn backend(&self) -> &W {
        &self.backend
    }

    /// Mutable widget backend
    pub fn backend_mut(&mut self) -> &mut W {
        &mut self.backend
    }

    // ========== Sorted views ==========

    /// Equipsets in the requested order, without touching natural order
    pub fn sorted_view(&self, order_by: SortOrder) -> Vec<&Equipset> {
        self.cached_positions(order_by)
            .into_iter()
            .map(|i| &self.entries[i].set)
            .collect()
    }

    /// Ids in the requested order
    pub fn sorted_ids(&self, order_by: SortOrder) -> Vec<EquipsetId> {
        self.cached_positions(order_by)
            .into_iter()
            .map(|i| self.entries[i].id)
            .collect()
    }

    fn cached_positions(&self, order_by: SortOrder) -> Vec<usize> {
        if let Some(cache) = self.sort_cache.borrow().as_ref() {
            if cache.order_by == order_by && cache.generation == self.generation {
                return cache.positions.clone();
            }
        }

        let sets: Vec<&Equipset> = self.entries.iter().map(|e| &e.set).collect();
        let positions = sorted_positions(&sets, order_by);
        *self.sort_cache.borrow_mut() = Some(SortCache {
            order_by,
            generation: self.generation,
            positions: positions.clone(),
        });
        positions
    }

    // ========== Mutation ==========

    /// Add an equipset at the end of natural order.
    ///
    /// The set gets `order = max + 1` (0 when empty) and a widget.
    pub fn add(&mut self, mut equipset: Equipset) -> Result<EquipsetId> {
        equipset.validate()?;
        Self::check_cycles(&self.entries, &equipset, None)?;

        equipset.order = self.next_order();
        equipset.set_widget_handle(None);
        self.max_order = Some(equipset.order);

        let id = self.allocate_id();
        log::debug!("Added equipset '{}' as {} (order {})", equipset.name, id, equipset.order);
        self.entries.push(Entry {
            id,
            set: equipset,
            flagged: false,
        });
        self.touch();

        self.create_widget_at(self.entries.len() - 1);
        Ok(id)
    }

    /// Remove an equipset and hand it back. Its widget is destroyed first.
    ///
    /// Removing a set can hand its name to a later set with the same name, so
    /// every cycle chain is checked again afterwards.
    pub fn remove(&mut self, id: EquipsetId) -> Result<Equipset> {
        let index = self.require(id)?;

        self.destroy_widget_at(index);
        let entry = self.entries.remove(index);
        self.touch();

        if self.max_order == Some(entry.set.order) {
            self.recompute_max_order();
        }
        log::debug!("Removed equipset '{}' ({})", entry.set.name, id);
        self.refresh_flags();
        Ok(entry.set)
    }

    /// Remove everything. All widgets are destroyed before any entry goes.
    pub fn remove_all(&mut self) -> Vec<Equipset> {
        self.remove_all_widgets();
        let removed: Vec<Equipset> = self.entries.drain(..).map(|e| e.set).collect();
        self.max_order = None;
        self.touch();
        log::debug!("Removed all {} equipsets", removed.len());
        removed
    }

    /// Replace an equipset's contents, keeping its id, position and order.
    ///
    /// The replacement itself must be valid. Other sets are re-checked
    /// afterwards and flagged or cleared to match.
    pub fn replace(&mut self, id: EquipsetId, mut equipset: Equipset) -> Result<()> {
        let index = self.require(id)?;
        equipset.validate()?;
        Self::check_cycles(&self.entries, &equipset, Some(id))?;

        self.destroy_widget_at(index);
        equipset.order = self.entries[index].set.order;
        equipset.set_widget_handle(None);
        self.entries[index].set = equipset;
        self.entries[index].flagged = false;
        self.touch();

        self.refresh_flags();
        self.create_widget_at(index);
        Ok(())
    }

    /// Move an equipset to another position in natural order.
    ///
    /// Widgets from the first affected position onward are recreated so the
    /// renderer sees them in the new natural order. `order` values are left
    /// alone until [`sync_sort_order`](Self::sync_sort_order).
    pub fn move_to(&mut self, id: EquipsetId, index: usize) -> Result<()> {
        let from = self.require(id)?;
        let to = index.min(self.entries.len() - 1);
        if from == to {
            return Ok(());
        }

        let first = from.min(to);
        for i in first..self.entries.len() {
            self.destroy_widget_at(i);
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.touch();
        self.refresh_flags();

        for i in first..self.entries.len() {
            self.create_widget_at(i);
        }
        Ok(())
    }

    /// Append a target name to a cycle set
    pub fn add_cycle_member(&mut self, id: EquipsetId, target: impl Into<String>) -> Result<()> {
        let index = self.require(id)?;
        let mut candidate = self.entries[index].set.clone();

        match &mut candidate.body {
            EquipsetBody::Cycle(cycle) => cycle.members.push(target.into()),
            _ => {
                return Err(EquipsetError::invalid(&candidate.name, InvalidReason::NotCycleSet));
            }
        }
        candidate.validate()?;
        Self::check_cycles(&self.entries, &candidate, Some(id))?;

        // Keep the live widget handle; only the member list changes.
        self.entries[index].set.body = candidate.body;
        self.touch();
        self.refresh_flags();
        Ok(())
    }

    /// Reassign `order` to 0..N-1 following natural order
    pub fn sync_sort_order(&mut self) {
        Self::renumber(&mut self.entries);
        self.recompute_max_order();
        self.touch();
    }

    /// Replace the whole store with a decoded batch.
    ///
    /// All records go in first; cycle chains are validated afterwards against
    /// the complete batch so forward references resolve. Records that fail are
    /// kept but flagged and get no widget. Old widgets are destroyed before the
    /// swap and new ones created after it.
    pub fn load_batch(&mut self, sets: Vec<Equipset>) -> LoadSummary {
        let mut summary = LoadSummary::default();
        let mut used = HashSet::new();
        let mut max_order = sets.iter().map(|s| s.order).max();
        let mut exhausted = false;
        let mut entries = Vec::with_capacity(sets.len());

        for mut set in sets {
            set.set_widget_handle(None);
            if !used.insert(set.order) {
                match max_order.and_then(|m| m.checked_add(1)) {
                    Some(next) => {
                        log::warn!(
                            "Equipset '{}' reuses order {}; moved to {}",
                            set.name,
                            set.order,
                            next
                        );
                        set.order = next;
                        max_order = Some(next);
                        used.insert(next);
                    }
                    None => exhausted = true,
                }
                summary.reordered += 1;
            }
            entries.push(Entry {
                id: self.allocate_id(),
                set,
                flagged: false,
            });
        }

        if exhausted {
            log::warn!(
                "No free sort position above {:?}; renumbering {} equipsets",
                max_order,
                entries.len()
            );
            summary.reordered = Self::renumber(&mut entries);
        }

        let problems = Self::find_invalid(&entries);
        for (entry, problem) in entries.iter_mut().zip(problems) {
            if let Some(e) = problem {
                log::warn!("Flagging equipset '{}': {}", entry.set.name, e);
                entry.flagged = true;
                summary.flagged += 1;
            }
        }

        self.remove_all_widgets();
        self.entries = entries;
        self.recompute_max_order();
        self.touch();
        self.create_all_widgets();

        summary.loaded = self.entries.len();
        summary
    }

    /// Next member of a cycle set to execute.
    ///
    /// Dangling names, flagged sets and the cycle itself are skipped. Returns
    /// `None` when nothing resolves.
    pub fn advance_cycle(&mut self, id: EquipsetId) -> Option<EquipsetId> {
        let index = self.position(id)?;
        if self.entries[index].flagged {
            return None;
        }

        let (members, start) = match &self.entries[index].set.body {
            EquipsetBody::Cycle(cycle) if !cycle.members.is_empty() => {
                (cycle.members.clone(), cycle.cursor)
            }
            _ => return None,
        };

        for step in 0..members.len() {
            let slot = (start + step) % members.len();
            let Some(target) = self.find_by_name(&members[slot]) else {
                log::debug!("Skipping dangling cycle member '{}'", members[slot]);
                continue;
            };
            if target == id || self.is_flagged(target) {
                continue;
            }
            if let EquipsetBody::Cycle(cycle) = &mut self.entries[index].set.body {
                cycle.cursor = (slot + 1) % members.len();
            }
            return Some(target);
        }
        None
    }

    // ========== Widgets ==========

    /// Create widgets for every set lacking one, in natural order
    pub fn create_all_widgets(&mut self) {
        for i in 0..self.entries.len() {
            self.create_widget_at(i);
        }
    }

    /// Destroy every live widget
    pub fn remove_all_widgets(&mut self) {
        for i in 0..self.entries.len() {
            self.destroy_widget_at(i);
        }
    }

    /// Destroy and recreate every widget, e.g. after a settings change
    pub fn reload_widgets(&mut self) {
        self.remove_all_widgets();
        self.create_all_widgets();
    }

    /// Number of sets with a live widget
    pub fn live_widget_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.set.widget_handle().is_some())
            .count()
    }

    fn create_widget_at(&mut self, index: usize) {
        let entry = &mut self.entries[index];
        if entry.flagged || entry.set.widget_handle().is_some() {
            return;
        }
        let handle = self.backend.create_widget(entry.id, &entry.set);
        if let Some(handle) = handle {
            log::debug!("Created widget {:?} for '{}'", handle, entry.set.name);
        }
        entry.set.set_widget_handle(handle);
    }

    fn destroy_widget_at(&mut self, index: usize) {
        if let Some(handle) = self.entries[index].set.take_widget_handle() {
            log::debug!("Destroying widget {:?} for '{}'", handle, self.entries[index].set.name);
            self.backend.destroy_widget(handle);
        }
    }

    // ========== Internal ==========

    fn require(&self, id: EquipsetId) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| EquipsetError::NotFound(id.to_string()))
    }

    fn allocate_id(&mut self) -> EquipsetId {
        let id = EquipsetId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn recompute_max_order(&mut self) {
        self.max_order = self.entries.iter().map(|e| e.set.order).max();
    }

    /// Order for a new set. When `u32` runs out the store is renumbered first.
    fn next_order(&mut self) -> u32 {
        let Some(max) = self.max_order else {
            return 0;
        };
        if let Some(next) = max.checked_add(1) {
            return next;
        }

        log::warn!(
            "No free sort position above {}; renumbering {} equipsets",
            max,
            self.entries.len()
        );
        self.sync_sort_order();
        self.max_order.map_or(0, |m| m.saturating_add(1))
    }

    /// Set `order` to natural position. Returns how many changed.
    fn renumber(entries: &mut [Entry]) -> usize {
        let mut changed = 0;
        for (i, entry) in entries.iter_mut().enumerate() {
            let order = u32::try_from(i).unwrap_or(u32::MAX);
            if entry.set.order != order {
                entry.set.order = order;
                changed += 1;
            }
        }
        changed
    }

    /// Validation outcome for every entry, checked against the whole collection
    fn find_invalid(entries: &[Entry]) -> Vec<Option<EquipsetError>> {
        entries
            .iter()
            .map(|entry| {
                entry
                    .set
                    .validate()
                    .and_then(|_| Self::check_cycles(entries, &entry.set, None))
                    .err()
            })
            .collect()
    }

    /// Re-check every entry after a mutation that can change what a name
    /// resolves to. Newly invalid sets lose their widget; sets that became
    /// valid again get one back.
    fn refresh_flags(&mut self) {
        let problems = Self::find_invalid(&self.entries);
        for (i, problem) in problems.into_iter().enumerate() {
            let flagged = problem.is_some();
            if flagged == self.entries[i].flagged {
                continue;
            }

            self.entries[i].flagged = flagged;
            match problem {
                Some(e) => {
                    log::warn!("Flagging equipset '{}': {}", self.entries[i].set.name, e);
                    self.destroy_widget_at(i);
                }
                None => {
                    log::info!("Equipset '{}' is valid again", self.entries[i].set.name);
                    self.create_widget_at(i);
                }
            }
        }
    }

    /// Validate `candidate`'s cycle chain against `entries`.
    /// `replacing` names the entry the candidate stands in for.
    fn check_cycles(entries: &[Entry], candidate: &Equipset, replacing: Option<EquipsetId>) -> Result<()> {
        let Some(members) = candidate.cycle_members() else {
            return Ok(());
        };

        check_cycle_chain(
            &candidate.name,
            members,
            |name| {
                entries
                    .iter()
                    .find(|e| Some(e.id) != replacing && e.set.name == name)
                    .and_then(|e| e.set.cycle_members())
            },
            entries.len(),
        )
        .map_err(|reason| EquipsetError::invalid(&candidate.name, reason))
    }
}

impl<W: WidgetBackend + Default> Default for EquipsetStore<W> {
    fn default() -> Self {
        Self::new(W::default())
    }
}
