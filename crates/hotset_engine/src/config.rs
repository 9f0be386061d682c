//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the engine keeps its documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding every document
    pub data_dir: PathBuf,

    /// Equipset document file name
    pub equipset_file: String,

    /// Settings document file name
    pub settings_file: String,

    /// Widget manifest file name
    pub manifest_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data/SKSE/Plugins/UIHS"),
            equipset_file: "Equipset.json".into(),
            settings_file: "Settings.json".into(),
            manifest_file: "Widget.json".into(),
        }
    }
}

impl EngineConfig {
    /// Default file names under another directory
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Equipset document path
    pub fn equipset_path(&self) -> PathBuf {
        self.data_dir.join(&self.equipset_file)
    }

    /// Settings document path
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    /// Widget manifest path
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.manifest_file)
    }
}
