//! Flat string settings document
//!
//! Every value is stored as a string, the way the menu writes them. Keys the
//! code does not know about are kept and written back untouched.

use crate::error::PersistError;
use hotset_equipset::SortOrder;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Known keys and their defaults
pub const SETTING_DEFAULTS: [(&str, &str); 28] = [
    ("sWidget_Font", "0"),
    ("sWidget_Size", "100"),
    ("sWidget_Alpha", "100"),
    ("sWidget_Display", "0"),
    ("sWidget_Delay", "3.000000"),
    ("sWidget_EFont", "0"),
    ("sWidget_ESize", "100"),
    ("sWidget_EAlpha", "100"),
    ("sWidget_EDisplay", "0"),
    ("sWidget_EDelay", "3.000000"),
    ("sWidget_LDisplay", "False"),
    ("sWidget_LName", "False"),
    ("sWidget_LHpos", "0"),
    ("sWidget_LVpos", "0"),
    ("sWidget_RDisplay", "False"),
    ("sWidget_RName", "False"),
    ("sWidget_RHpos", "0"),
    ("sWidget_RVpos", "0"),
    ("sWidget_SDisplay", "False"),
    ("sWidget_SName", "False"),
    ("sWidget_SHpos", "0"),
    ("sWidget_SVpos", "0"),
    ("sSetting_Modifier1", "42"),
    ("sSetting_Modifier2", "29"),
    ("sSetting_Modifier3", "56"),
    ("sSetting_Sort", "0"),
    ("sSetting_Gamepad", "False"),
    ("sSetting_Favor", "False"),
];

const MODIFIER_KEYS: [&str; 3] = ["sSetting_Modifier1", "sSetting_Modifier2", "sSetting_Modifier3"];

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn default_for(key: &str) -> Option<&'static str> {
    SETTING_DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: SETTING_DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Settings {
    /// Settings with every default filled in
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a settings document. Missing keys take their defaults.
    pub fn parse(text: &str) -> Result<Self, PersistError> {
        let map: Map<String, Value> = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            _ => return Err(PersistError::Malformed("settings must be an object".into())),
        };

        let mut settings = Self::default();
        for (key, value) in map {
            let value = match value {
                Value::String(s) => s,
                Value::Bool(b) => format_flag(b).to_string(),
                other => other.to_string(),
            };
            settings.values.insert(key, value);
        }
        Ok(settings)
    }

    /// Load from disk. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::parse(&text)?;
                log::debug!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.values)?)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Raw value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a raw value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse a value, falling back to the key's default when it does not parse
    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .or_else(|| default_for(key).and_then(|v| v.parse().ok()))
    }

    /// Boolean value ("True"/"False")
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(parse_flag).unwrap_or(false)
    }

    /// Set a boolean value
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, format_flag(value));
    }

    /// Catalog shows favorited items only
    pub fn favorites_only(&self) -> bool {
        self.flag("sSetting_Favor")
    }

    /// Gamepad mode
    pub fn gamepad(&self) -> bool {
        self.flag("sSetting_Gamepad")
    }

    /// Presentation order of the equipset list
    pub fn sort_order(&self) -> SortOrder {
        self.parsed::<u32>("sSetting_Sort")
            .and_then(SortOrder::from_index)
            .unwrap_or_default()
    }

    /// Set the presentation order
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.set("sSetting_Sort", order.index().to_string());
    }

    /// The three modifier key codes
    pub fn modifiers(&self) -> [u32; 3] {
        MODIFIER_KEYS.map(|key| self.parsed(key).unwrap_or(0))
    }

    /// All key/value pairs, sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.len(), SETTING_DEFAULTS.len());
        assert_eq!(settings.get("sWidget_Delay"), Some("3.000000"));
        assert_eq!(settings.modifiers(), [42, 29, 56]);
        assert_eq!(settings.sort_order(), SortOrder::CreationAscending);
        assert!(!settings.favorites_only());
        assert!(!settings.gamepad());
    }

    #[test]
    fn test_parse_keeps_unknown_keys() {
        let settings = Settings::parse(
            r#"{ "sSetting_Favor": "True", "sSetting_Sort": "2", "sCustom": "kept" }"#,
        )
        .unwrap();

        assert!(settings.favorites_only());
        assert_eq!(settings.sort_order(), SortOrder::NameAscending);
        assert_eq!(settings.get("sCustom"), Some("kept"));
        assert_eq!(settings.get("sWidget_Size"), Some("100"));
    }

    #[test]
    fn test_non_string_values() {
        let settings = Settings::parse(r#"{ "sSetting_Gamepad": true, "sWidget_Size": 80 }"#).unwrap();
        assert!(settings.gamepad());
        assert_eq!(settings.get("sSetting_Gamepad"), Some("True"));
        assert_eq!(settings.parsed::<u32>("sWidget_Size"), Some(80));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let mut settings = Settings::new();
        settings.set("sSetting_Sort", "9");
        settings.set("sSetting_Modifier2", "ctrl");

        assert_eq!(settings.sort_order(), SortOrder::CreationAscending);
        assert_eq!(settings.modifiers(), [42, 29, 56]);
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(Settings::parse("[]"), Err(PersistError::Malformed(_))));
    }

    #[test]
    fn test_load_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.json");

        let mut settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::new());

        settings.set_flag("sSetting_Favor", true);
        settings.set_sort_order(SortOrder::NameDescending);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert!(loaded.favorites_only());
        assert_eq!(loaded.sort_order(), SortOrder::NameDescending);
        assert_eq!(loaded, settings);
    }
}
