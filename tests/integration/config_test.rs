use adb_statusline::core::config::{Config, CONFIG_ENV};
use adb_statusline::ui::ColorChoice;
use adb_statusline::StatusError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_explicit_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("statusline.json");
    fs::write(
        &path,
        r#"{
            "color": "NONE",
            "adb_path": "/opt/platform-tools/adb",
            "load_core_multiplier": 2,
            "unavailable_placeholder": "--"
        }"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.color, Some(ColorChoice::None));
    assert_eq!(
        config.adb_path,
        Some(PathBuf::from("/opt/platform-tools/adb"))
    );
    assert_eq!(config.load_core_multiplier, 2);
    assert_eq!(config.unavailable_placeholder, "--");
    assert!(config.device.is_none());
}

#[test]
fn test_env_var_points_at_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("env.json");
    fs::write(&path, r#"{ "device": "emulator-5554" }"#).unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    let config = Config::load(None);
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(config.unwrap().device.as_deref(), Some("emulator-5554"));
}

#[test]
fn test_bad_color_in_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, r#"{ "color": "SEPIA" }"#).unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StatusError::Config(_)));
}
