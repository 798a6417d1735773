/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;

use runloc::app_config::{Config, LogLevel};

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "EN");
    assert_eq!(config.target_language, "FR");
    assert_eq!(config.dictionary_path, PathBuf::from("dictionary.tsv"));
    assert_eq!(config.dictionary_delimiter, '\t');
    assert_eq!(config.exceptions_path, None);
    assert_eq!(config.max_concurrent_nodes, 8);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.source_language = " ".to_string();
    assert!(config.validate().is_err());
    config.source_language = "EN".to_string();

    config.target_language = "EN".to_string();
    assert!(config.validate().is_err());
    config.target_language = "FR".to_string();

    config.dictionary_delimiter = '\n';
    assert!(config.validate().is_err());
    config.dictionary_delimiter = ';';

    config.max_concurrent_nodes = 0;
    assert!(config.validate().is_err());
    config.max_concurrent_nodes = 1;

    assert!(config.validate().is_ok());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaultConfig() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("runloc.json");

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists());
}

#[test]
fn test_load_withPartialFile_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "runloc.json",
        r#"{ "source_language": "RU", "target_language": "EN", "log_level": "debug" }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.source_language, "RU");
    assert_eq!(config.target_language, "EN");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.max_concurrent_nodes, 8);
}

#[test]
fn test_save_withOverrides_shouldPersistForNextSession() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("settings").join("runloc.json");

    let mut config = Config::default();
    config.target_language = "RU".to_string();
    config.exceptions_path = Some(PathBuf::from("exceptions.txt"));
    config.save(&path).unwrap();

    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_load_withMalformedJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "runloc.json", "{ not json").unwrap();
    assert!(Config::load(&path).is_err());
}
