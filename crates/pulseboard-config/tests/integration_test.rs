//! Integration tests for pulseboard-config crate.

use pulseboard_config::{Config, ConfigCache, ConfigLoader, RowPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.theme.primary = "green".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_cache() {
    let config = Config::default();
    let cache = ConfigCache::new(config.clone());

    let cached_config = cache.get();
    assert_eq!(cached_config.locale, config.locale);

    let mut new_config = config;
    new_config.data.invalid_rows = RowPolicy::Drop;
    cache.update(new_config).unwrap();

    let updated_config = cache.get();
    assert_eq!(updated_config.data.invalid_rows, RowPolicy::Drop);
}

#[test]
fn test_config_cache_rejects_invalid_update() {
    let cache = ConfigCache::default();

    let mut bad = Config::default();
    bad.data.sales_top_n = 0;
    assert!(cache.update(bad).is_err());
    assert_eq!(cache.get().data.sales_top_n, 10);
}

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        "locale: en-US\ndata:\n  invalid_rows: drop\n  listening_top_n: 12\ntheme:\n  primary: \"#ff0000\"\n"
    )
    .expect("Failed to write to temp file");

    let config = ConfigLoader::load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.data.listening_top_n, 12);
    assert_eq!(config.theme.primary, "#ff0000");
    assert_eq!(config.theme.card_border, "#2a2a2a");
}

#[test]
fn test_load_config_rejects_invalid_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "data:\n  label_max_chars: 0\n").expect("Failed to write to temp file");

    assert!(ConfigLoader::load_config(file.path()).is_err());
}
