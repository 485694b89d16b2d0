//! Loading configuration files from disk

use locdiff_config::{ConfigError, ConfigLoader, ListPairing, LocdiffConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("locdiff.toml");
    fs::write(
        &path,
        r#"
[diff]
min_common_list_items = 3
list_pairing = "best-overlap"
reconcile_lists = false

[links]
environment_suffixes = [".hlx.page", ".hlx.live", ".aem.page", ".stage.example"]
canonical_suffix = ".aem.live"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.diff.min_common_list_items, 3);
    assert_eq!(config.diff.list_pairing, ListPairing::BestOverlap);
    assert!(!config.diff.reconcile_lists);
    assert_eq!(config.links.environment_suffixes.len(), 4);
}

#[test]
fn test_load_links_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("links.toml");
    fs::write(&path, "[links]\ncanonical_suffix = \".aem.live\"\n").unwrap();

    let config = ConfigLoader::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.diff, LocdiffConfig::default().diff);
}

#[test]
fn test_invalid_canonical_suffix_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[links]\ncanonical_suffix = \"aem.live\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_roundtrip_through_toml() {
    let config = LocdiffConfig::default();
    let text = toml::to_string(&config).unwrap();
    let parsed = ConfigLoader::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}
