//! Widget manifest
//!
//! Lists the widget icons and fonts the menu can offer. Read-only.

use crate::error::PersistError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(rename = "WidgetList", default)]
    widget_list: Vec<String>,
    #[serde(rename = "Path", default)]
    path: BTreeMap<String, String>,
    #[serde(rename = "Font", default)]
    font: Vec<String>,
}

/// Available widget icons and fonts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetManifest {
    widgets: Vec<String>,
    paths: BTreeMap<String, String>,
    fonts: Vec<String>,
}

impl WidgetManifest {
    /// Parse a manifest document. Empty paths are dropped.
    pub fn parse(text: &str) -> Result<Self, PersistError> {
        let raw: RawManifest = serde_json::from_str(text)?;
        let paths = raw
            .path
            .into_iter()
            .filter(|(_, path)| !path.is_empty())
            .collect();

        Ok(Self {
            widgets: raw.widget_list,
            paths,
            fonts: raw.font,
        })
    }

    /// Load from disk. Any failure is logged and gives an empty manifest.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let result = fs::read_to_string(path)
            .map_err(PersistError::from)
            .and_then(|text| Self::parse(&text));

        match result {
            Ok(manifest) => {
                log::info!(
                    "Loaded widget manifest: {} widgets, {} fonts",
                    manifest.widgets.len(),
                    manifest.fonts.len()
                );
                manifest
            }
            Err(e) => {
                log::error!("Failed to load widget manifest {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Widget names, in manifest order
    pub fn widgets(&self) -> &[String] {
        &self.widgets
    }

    /// Icon path for a widget
    pub fn path(&self, widget: &str) -> Option<&str> {
        self.paths.get(widget).map(String::as_str)
    }

    /// Font names
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty() && self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let manifest = WidgetManifest::parse(
            r#"{
                "WidgetList": ["Sword", "Bow", "Potion"],
                "Path": { "Sword": "icons/sword.dds", "Bow": "icons/bow.dds", "Potion": "" },
                "Font": ["$EverywhereFont", "$SkyrimBooks"]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.widgets(), ["Sword", "Bow", "Potion"]);
        assert_eq!(manifest.path("Bow"), Some("icons/bow.dds"));
        assert_eq!(manifest.path("Potion"), None);
        assert_eq!(manifest.fonts().len(), 2);
    }

    #[test]
    fn test_missing_sections() {
        let manifest = WidgetManifest::parse("{}").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_load_failures_give_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WidgetManifest::load(dir.path().join("Widget.json")).is_empty());

        let bad = dir.path().join("Bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(WidgetManifest::load(&bad).is_empty());
    }
}
