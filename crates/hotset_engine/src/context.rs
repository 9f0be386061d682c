//! The engine context
//!
//! [`HotkeyContext`] owns every piece of engine state. The menu layer calls
//! into it from one thread; wrap it in a [`SharedContext`](crate::SharedContext)
//! when more than one thread needs access.

use crate::config::EngineConfig;
use hotset_catalog::{Catalog, CatalogEntry, CatalogOptions};
use hotset_core::{HostState, Result};
use hotset_equipset::{Equipset, EquipsetStore, SortOrder, WidgetBackend};
use hotset_persist::{
    import_into, read_document, write_document, ImportReport, Settings, WidgetManifest,
};

/// Engine state behind the menu
pub struct HotkeyContext<W: WidgetBackend> {
    config: EngineConfig,
    settings: Settings,
    manifest: WidgetManifest,
    catalog: Catalog,
    store: EquipsetStore<W>,
}

impl<W: WidgetBackend> HotkeyContext<W> {
    /// Create a context with default settings and an empty store
    pub fn new(config: EngineConfig, backend: W) -> Self {
        Self {
            config,
            settings: Settings::default(),
            manifest: WidgetManifest::default(),
            catalog: Catalog::new(),
            store: EquipsetStore::new(backend),
        }
    }

    /// Configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Equipset store
    pub fn store(&self) -> &EquipsetStore<W> {
        &self.store
    }

    /// Equipset store, mutable
    pub fn store_mut(&mut self) -> &mut EquipsetStore<W> {
        &mut self.store
    }

    // ========== Settings ==========

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current settings, mutable
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load settings from disk. On failure the current settings are kept.
    pub fn load_settings(&mut self) -> Result<()> {
        self.settings = Settings::load(self.config.settings_path())?;
        Ok(())
    }

    /// Write settings to disk
    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(self.config.settings_path())?;
        Ok(())
    }

    /// Load the widget manifest. Never fails; a bad manifest is empty.
    pub fn load_manifest(&mut self) {
        self.manifest = WidgetManifest::load(self.config.manifest_path());
    }

    /// Widget manifest
    pub fn manifest(&self) -> &WidgetManifest {
        &self.manifest
    }

    // ========== Catalog ==========

    /// Catalog options derived from the settings
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions::default().favorites_only(self.settings.favorites_only())
    }

    /// Rebuild every selection list from live host state
    pub fn rebuild_catalog(&mut self, host: &dyn HostState) {
        let options = self.catalog_options();
        self.catalog.rebuild(host, self.store.names(), &options);
        log::debug!(
            "Catalog rebuilt: {} weapons, {} items, {} shouts",
            self.catalog.weapons().len(),
            self.catalog.items().len(),
            self.catalog.shouts().len()
        );
    }

    /// Weapons and spells for the hand slots
    pub fn get_weapon_list(&self) -> &[CatalogEntry] {
        self.catalog.weapons()
    }

    /// Armor and consumables
    pub fn get_item_list(&self) -> &[CatalogEntry] {
        self.catalog.items()
    }

    /// Shouts and powers
    pub fn get_shout_list(&self) -> &[CatalogEntry] {
        self.catalog.shouts()
    }

    /// Equipsets a cycle set can point at, refreshed from the store
    pub fn get_cycle_list(&mut self) -> &[CatalogEntry] {
        self.catalog.rebuild_cycle_targets(self.store.names());
        self.catalog.cycle_targets()
    }

    // ========== Equipsets ==========

    /// Equipsets in presentation order; `None` uses the saved sort setting
    pub fn get_sorted_equipset_list(&self, order_by: Option<SortOrder>) -> Vec<&Equipset> {
        let order_by = order_by.unwrap_or_else(|| self.settings.sort_order());
        self.store.sorted_view(order_by)
    }

    /// Reassign sort positions to follow natural order
    pub fn sync_sort_order(&mut self) {
        self.store.sync_sort_order();
    }

    /// Write every equipset to the equipset document. Returns the number written.
    pub fn export_equipsets(&self) -> Result<usize> {
        write_document(self.config.equipset_path(), self.store.iter().map(|(_, set)| set))?;
        Ok(self.store.len())
    }

    /// Replace the store with the equipset document.
    ///
    /// A missing document leaves the store as it is and reports nothing
    /// imported. A document that cannot be parsed is an error and also
    /// leaves the store untouched.
    pub fn import_equipsets(&mut self) -> Result<ImportReport> {
        let Some(decoded) = read_document(self.config.equipset_path())? else {
            return Ok(ImportReport::default());
        };

        let report = import_into(&mut self.store, decoded);
        log::info!(
            "Imported {} equipsets ({} skipped, {} flagged)",
            report.imported,
            report.skipped,
            report.flagged
        );
        Ok(report)
    }

    // ========== Widgets ==========

    /// Create widgets for every set lacking one
    pub fn create_all_widgets(&mut self) {
        self.store.create_all_widgets();
    }

    /// Destroy every widget
    pub fn remove_all_widgets(&mut self) {
        self.store.remove_all_widgets();
    }

    /// Destroy and recreate every widget
    pub fn reload_widgets(&mut self) {
        self.store.reload_widgets();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotset_catalog::CatalogTarget;
    use hotset_core::{FormInfo, HostSnapshot, InventoryStack, MagicInfo, MagicKind};
    use hotset_equipset::{CycleSet, NormalSet, RecordingBackend};

    fn context(dir: &std::path::Path) -> HotkeyContext<RecordingBackend> {
        HotkeyContext::new(EngineConfig::with_data_dir(dir), RecordingBackend::new())
    }

    #[test]
    fn test_sorted_list_uses_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        for name in ["b", "c", "a"] {
            ctx.store_mut()
                .add(Equipset::normal(name, NormalSet::new()).unwrap())
                .unwrap();
        }

        let names = |ctx: &HotkeyContext<RecordingBackend>, order: Option<SortOrder>| {
            ctx.get_sorted_equipset_list(order)
                .iter()
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&ctx, None), vec!["b", "c", "a"]);

        ctx.settings_mut().set_sort_order(SortOrder::NameAscending);
        assert_eq!(names(&ctx, None), vec!["a", "b", "c"]);
        assert_eq!(names(&ctx, Some(SortOrder::NameDescending)), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rebuild_catalog_respects_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        let host = HostSnapshot::new()
            .with_stack(InventoryStack::new(FormInfo::weapon(0x12EB7, "Iron Sword"), 1))
            .with_base_spell(MagicInfo::new(0x12FCD, "Flames", MagicKind::Spell).favorited());

        ctx.rebuild_catalog(&host);
        assert_eq!(ctx.get_weapon_list().len(), 4);

        ctx.settings_mut().set_flag("sSetting_Favor", true);
        ctx.rebuild_catalog(&host);
        let names: Vec<_> = ctx.get_weapon_list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Nothing", "Unequip", "Flames"]);
    }

    #[test]
    fn test_cycle_list_tracks_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.store_mut()
            .add(Equipset::normal("Melee", NormalSet::new()).unwrap())
            .unwrap();
        assert_eq!(ctx.get_cycle_list().len(), 2);

        ctx.store_mut()
            .add(Equipset::cycle("Swap", CycleSet::with_members(["Melee"])).unwrap())
            .unwrap();
        let list = ctx.get_cycle_list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].target, CatalogTarget::Nothing);
    }

    #[test]
    fn test_import_missing_document_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.store_mut()
            .add(Equipset::normal("Keep", NormalSet::new()).unwrap())
            .unwrap();

        let report = ctx.import_equipsets().unwrap();
        assert_eq!(report, ImportReport::default());
        assert_eq!(ctx.store().len(), 1);
    }

    #[test]
    fn test_import_malformed_document_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.store_mut()
            .add(Equipset::normal("Keep", NormalSet::new()).unwrap())
            .unwrap();
        std::fs::write(ctx.config().equipset_path(), "{ broken").unwrap();

        assert!(ctx.import_equipsets().is_err());
        assert_eq!(ctx.store().len(), 1);
        assert_eq!(ctx.store().live_widget_count(), 1);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.settings_mut().set("sWidget_Size", "80");
        ctx.save_settings().unwrap();

        let mut other = context(dir.path());
        other.load_settings().unwrap();
        assert_eq!(other.settings().get("sWidget_Size"), Some("80"));
    }
}
