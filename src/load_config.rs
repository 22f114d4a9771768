use crate::config::Config;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const CACHE_DIR_VAR: &str = "JUSTMC_CACHE_DIR";
pub const PATCHES_DIR_VAR: &str = "JUSTMC_PATCHES_DIR";
pub const DATA_DIR_VAR: &str = "JUSTMC_DATA_DIR";
pub const ICONS_DIR_VAR: &str = "JUSTMC_ICONS_DIR";

/// Builds the run configuration: defaults, then the optional YAML file, then
/// the `JUSTMC_*_DIR` environment variables.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    let mut config = match path {
        Some(path) => read_config_file(path.as_ref())?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config);
    config.trace_loaded();
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    info!(config_path = ?path, "Loading configuration from file");

    let config_content = match fs::read_to_string(path) {
        Ok(content) => {
            info!(config_path = ?path, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path, e));
        }
    };

    // An empty file deserializes to unit, not to a map.
    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    match serde_yaml::from_str::<Config>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

fn apply_env_overrides(config: &mut Config) {
    let overrides = [
        (CACHE_DIR_VAR, &mut config.cache_dir),
        (PATCHES_DIR_VAR, &mut config.patches_dir),
        (DATA_DIR_VAR, &mut config.data_dir),
        (ICONS_DIR_VAR, &mut config.icons_dir),
    ];
    for (var, target) in overrides {
        if let Ok(value) = std::env::var(var) {
            if value.is_empty() {
                continue;
            }
            info!(var = var, value = %value, "Overriding path from env");
            *target = PathBuf::from(value);
        }
    }
}
