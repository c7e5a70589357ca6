//! Unit tests for the SettingsEngine: persistence, dot-path updates and reset.

use brewbrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use brewbrowser::types::beverage::SortOrder;
use brewbrowser::types::errors::SettingsError;
use brewbrowser::types::settings::AppSettings;
use serde_json::json;
use tempfile::TempDir;

fn setup() -> (SettingsEngine, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path));
    engine.load().expect("loading with no file should succeed");
    (engine, tmp)
}

#[test]
fn test_defaults_match_catalog_conventions() {
    let settings = AppSettings::default();
    assert_eq!(settings.api.base_url, "https://api.openbrewerydb.org/v1");
    assert_eq!(settings.api.request_timeout_secs, None);
    assert!(settings.api.user_agent.starts_with("brewbrowser/"));
    assert_eq!(settings.list.page_size, 10);
    assert_eq!(settings.list.sort, SortOrder::Asc);
    assert_eq!(settings.list.search_debounce_ms, 500);
    assert_eq!(settings.list.random_sample_size, 10);
    assert_eq!(settings.storage.saved_list_key, "beerApp.savedList");
}

#[test]
fn test_set_value_persists_to_disk() {
    let (mut engine, _tmp) = setup();
    engine.set_value("list.sort", json!("desc")).unwrap();
    engine.set_value("list.search_debounce_ms", json!(250)).unwrap();

    let mut reloaded = SettingsEngine::new(Some(engine.get_config_path().to_string()));
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.list.sort, SortOrder::Desc);
    assert_eq!(settings.list.search_debounce_ms, 250);
}

#[test]
fn test_wrong_type_is_invalid_value_and_leaves_settings() {
    let (mut engine, _tmp) = setup();
    let err = engine
        .set_value("list.page_size", json!("ten"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().list.page_size, 10);

    let err = engine.set_value("list.sort", json!("sideways")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
}

#[test]
fn test_unknown_key_is_invalid_key() {
    let (mut engine, _tmp) = setup();
    let err = engine.set_value("theme.mode", json!("dark")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));
}

#[test]
fn test_reset_restores_defaults() {
    let (mut engine, _tmp) = setup();
    engine.set_value("list.page_size", json!(50)).unwrap();
    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &AppSettings::default());

    let mut reloaded = SettingsEngine::new(Some(engine.get_config_path().to_string()));
    assert_eq!(reloaded.load().unwrap(), AppSettings::default());
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_save_creates_missing_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested/dir/settings.json");
    let engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    engine.save().unwrap();
    assert!(path.exists());
}
