//! Configuration system tests
//!
//! Tests for config paths, viewer config loading and theme files.

use std::fs;

use msaboard::config::{AppDirs, ViewerConfig, DIR_ENV_VAR};
use msaboard::msa::ColorScheme;
use msaboard::theme;
use tempfile::TempDir;

// ========================================================================
// App Directory Tests
// ========================================================================

#[test]
fn test_default_dir_is_named_after_app() {
    if std::env::var_os(DIR_ENV_VAR).is_some() {
        return;
    }
    let dirs = AppDirs::locate().unwrap();
    assert!(dirs.root().ends_with("msaboard"));
}

#[test]
fn test_files_live_under_root() {
    let dirs = AppDirs::at("/tmp/msaboard-home");
    assert_eq!(dirs.config_file(), dirs.root().join("config.yaml"));
    assert_eq!(
        dirs.theme_file("dark"),
        dirs.root().join("themes").join("dark.yaml")
    );
    assert!(dirs.logs_dir().starts_with(dirs.root()));
}

#[test]
fn test_ensure_logs_dir_creates_nested_dirs() {
    let tmp = TempDir::new().unwrap();
    let dirs = AppDirs::at(tmp.path().join("a").join("b"));
    let logs = dirs.ensure_logs_dir().unwrap();
    assert!(logs.is_dir());
    // Idempotent
    assert_eq!(dirs.ensure_logs_dir().unwrap(), logs);
}

#[test]
fn test_config_read_from_app_dir() {
    let tmp = TempDir::new().unwrap();
    let dirs = AppDirs::at(tmp.path());
    fs::write(dirs.config_file(), "undo_limit: 7\n").unwrap();
    assert_eq!(ViewerConfig::load_from(&dirs.config_file()).undo_limit, 7);
}

// ========================================================================
// Viewer Config Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ViewerConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn test_load_from_reads_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "default_label_width: 180\ncolor_scheme: plain\nundo_limit: 25\n",
    )
    .unwrap();

    let config = ViewerConfig::load_from(&path);
    assert_eq!(config.default_label_width, 180);
    assert_eq!(config.scheme(), ColorScheme::Plain);
    assert_eq!(config.undo_limit, 25);
    assert_eq!(config.theme, "light");
}

#[test]
fn test_out_of_range_values_are_sanitized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "default_label_width: 5\nundo_limit: 0\n").unwrap();

    let config = ViewerConfig::load_from(&path);
    assert_eq!(config.default_label_width, 40);
    assert_eq!(config.undo_limit, 1);
}

#[test]
fn test_malformed_yaml_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "default_label_width: [not, a, number]\n").unwrap();
    assert_eq!(ViewerConfig::load_from(&path), ViewerConfig::default());
}

#[test]
fn test_unknown_scheme_falls_back_to_default() {
    let config = ViewerConfig {
        color_scheme: "rainbow".to_string(),
        ..ViewerConfig::default()
    };
    assert_eq!(config.scheme(), ColorScheme::Default);
}

// ========================================================================
// Theme Tests
// ========================================================================

#[test]
fn test_builtin_light_theme_loads() {
    assert!(theme::load_theme("light").is_ok());
}

#[test]
fn test_theme_file_with_bad_color_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    let yaml = theme::LIGHT_YAML.replacen("\"#F9FAFB\"", "\"not-a-color\"", 1);
    fs::write(&path, yaml).unwrap();
    assert!(theme::from_file(&path).is_err());
}

#[test]
fn test_user_theme_file_overrides_colors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    let yaml = theme::LIGHT_YAML.replacen("\"#F9FAFB\"", "\"#000000\"", 1);
    fs::write(&path, yaml).unwrap();

    let custom = theme::from_file(&path).unwrap();
    assert_eq!(custom.canvas.background, theme::Color::rgb(0, 0, 0));
}
