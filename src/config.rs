use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the cached plugin sources.
    pub cache_dir: PathBuf,
    /// Root of the hand-maintained patch files.
    pub patches_dir: PathBuf,
    /// Where the entity collections are written.
    pub data_dir: PathBuf,
    /// Where the icon collections are written.
    pub icons_dir: PathBuf,
    pub layout: CacheLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".cache"),
            patches_dir: PathBuf::from("patches"),
            data_dir: PathBuf::from("data"),
            icons_dir: PathBuf::from(".cache/icons"),
            layout: CacheLayout::default(),
        }
    }
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            cache_dir = %self.cache_dir.display(),
            patches_dir = %self.patches_dir.display(),
            data_dir = %self.data_dir.display(),
            icons_dir = %self.icons_dir.display(),
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}

/// Locations inside `cache_dir`, relative and `/`-separated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheLayout {
    pub actions_dir: String,
    pub action_menus_dir: String,
    pub trigger_menus_dir: String,
    pub triggers_file: String,
    pub game_values_file: String,
    pub game_values_menu_file: String,
}

impl Default for CacheLayout {
    fn default() -> Self {
        Self {
            actions_dir: "actions".into(),
            action_menus_dir: "menu/actions".into(),
            trigger_menus_dir: "menu/triggers".into(),
            triggers_file: "Triggers.kt".into(),
            game_values_file: "GameValues.kt".into(),
            game_values_menu_file: "GameValuesMenu.kt".into(),
        }
    }
}
