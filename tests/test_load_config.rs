use justmc_data::load_config::{
    load_config, CACHE_DIR_VAR, DATA_DIR_VAR, ICONS_DIR_VAR, PATCHES_DIR_VAR,
};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn clear_env() {
    for var in [CACHE_DIR_VAR, PATCHES_DIR_VAR, DATA_DIR_VAR, ICONS_DIR_VAR] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_defaults_without_file() {
    clear_env();

    let config = load_config(None::<&Path>).expect("defaults load");

    assert_eq!(config.cache_dir, PathBuf::from(".cache"));
    assert_eq!(config.patches_dir, PathBuf::from("patches"));
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.icons_dir, PathBuf::from(".cache/icons"));
    assert_eq!(config.layout.actions_dir, "actions");
    assert_eq!(config.layout.triggers_file, "Triggers.kt");
}

#[test]
#[serial]
fn test_load_config_from_yaml_keeps_unset_defaults() {
    clear_env();
    let config_yaml = r#"
cache_dir: ./tmp/cache
data_dir: ./tmp/data
layout:
  actions_dir: src/actions
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(config.cache_dir, PathBuf::from("./tmp/cache"));
    assert_eq!(config.data_dir, PathBuf::from("./tmp/data"));
    assert_eq!(config.patches_dir, PathBuf::from("patches"));
    assert_eq!(config.layout.actions_dir, "src/actions");
    assert_eq!(config.layout.action_menus_dir, "menu/actions");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "data_dir: ./from-file\n").unwrap();
    env::set_var(DATA_DIR_VAR, "/tmp/from-env");
    env::set_var(ICONS_DIR_VAR, "");

    let config = load_config(Some(config_file.path())).expect("Config should load");
    clear_env();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/from-env"));
    // an empty variable is ignored
    assert_eq!(config.icons_dir, PathBuf::from(".cache/icons"));
}

#[test]
#[serial]
fn test_empty_config_file_means_defaults() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(config.cache_dir, PathBuf::from(".cache"));
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = load_config(Some(config_file.path())).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    clear_env();
    let err = load_config(Some("/definitely/not/here.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
