//! Wildcard store unit tests.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "colors.txt", "red\ngreen\n# comment\n\nblue\n");
    write(dir.path(), "fantasy/dragon.txt", "wyvern\nwyrm\n");
    write(dir.path(), "dragon/fire.txt", "ember\n");
    write(
        dir.path(),
        "creatures.yaml",
        "beasts:\n  land: [wolf, bear]\n  sea: [shark]\n",
    );
    dir
}

fn store(dir: &TempDir, mode: LoadMode) -> WildcardStore {
    WildcardStore::new(StoreConfig {
        force_mode: Some(mode),
        ..StoreConfig::with_dirs([dir.path()])
    })
}

fn texts(list: &OptionList) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

#[test]
fn test_exact_resolution_in_both_modes() {
    let dir = fixture();
    for mode in [LoadMode::Eager, LoadMode::Lazy] {
        let store = store(&dir, mode);
        assert_eq!(store.mode(), mode);
        let colors = store.resolve("colors").unwrap();
        assert_eq!(texts(&colors), vec!["red", "green", "blue"]);
        let land = store.resolve("beasts/land").unwrap();
        assert_eq!(texts(&land), vec!["wolf", "bear"]);
    }
}

#[test]
fn test_keys_are_case_insensitive() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Eager);
    assert_eq!(store.resolve("COLORS"), store.resolve("colors"));
    assert!(store.resolve("Fantasy/Dragon").is_some());
}

#[test]
fn test_lazy_mode_loads_progressively() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);

    // YAML leaves are preloaded, flat files are not.
    assert_eq!(store.loaded_keys(), vec!["beasts/land", "beasts/sea"]);
    assert_eq!(store.total_available(), 5);

    store.resolve("colors").unwrap();
    assert_eq!(
        store.loaded_keys(),
        vec!["beasts/land", "beasts/sea", "colors"]
    );
}

#[test]
fn test_eager_mode_loads_everything_up_front() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Eager);
    assert_eq!(store.loaded_keys().len(), 5);
    assert_eq!(store.available_keys(), store.loaded_keys());
}

#[test]
fn test_available_keys_are_sorted_and_complete() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);
    assert_eq!(
        store.available_keys(),
        vec![
            "beasts/land",
            "beasts/sea",
            "colors",
            "dragon/fire",
            "fantasy/dragon"
        ]
    );
}

#[test]
fn test_depth_agnostic_fallback_pools_all_matches() {
    let dir = fixture();
    for mode in [LoadMode::Eager, LoadMode::Lazy] {
        let store = store(&dir, mode);
        let dragon = store.resolve("dragon").unwrap();
        // Matches are visited in key order: dragon/fire, then fantasy/dragon.
        assert_eq!(texts(&dragon), vec!["ember", "wyvern", "wyrm"]);
        assert!(store.loaded_keys().contains(&"dragon".to_string()));
    }
}

#[test]
fn test_fallback_does_not_inflate_available_keys() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Eager);
    let before = store.total_available();
    store.resolve("dragon").unwrap();
    assert_eq!(store.total_available(), before);
    assert!(!store.available_keys().contains(&"dragon".to_string()));
}

#[test]
fn test_unknown_key_resolves_to_none() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);
    assert_eq!(store.resolve("unicorn"), None);
    assert_eq!(store.resolve("drag"), None);
}

#[test]
fn test_glob_resolution_is_not_cached() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);

    let beasts = store.resolve("beasts/*").unwrap();
    assert_eq!(texts(&beasts), vec!["wolf", "bear", "shark"]);

    let dragons = store.resolve("*/dragon").unwrap();
    assert_eq!(texts(&dragons), vec!["ember", "wyvern", "wyrm"]);

    assert!(!store.loaded_keys().iter().any(|k| k.contains('*')));
}

#[test]
fn test_yaml_leaf_overrides_flat_file_in_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "colors.txt", "from-txt\n");
    write(dir.path(), "extra.yaml", "colors: [from-yaml]\n");

    for mode in [LoadMode::Eager, LoadMode::Lazy] {
        let store = store(&dir, mode);
        assert_eq!(texts(&store.resolve("colors").unwrap()), vec!["from-yaml"]);
    }
}

#[test]
fn test_later_root_overrides_earlier() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write(first.path(), "mood.txt", "calm\n");
    write(second.path(), "mood.txt", "angry\n");
    write(second.path(), "extra.txt", "bonus\n");

    let store = WildcardStore::new(StoreConfig::with_dirs([first.path(), second.path()]));
    assert_eq!(texts(&store.resolve("mood").unwrap()), vec!["angry"]);
    assert!(store.resolve("extra").is_some());
}

#[test]
fn test_refresh_picks_up_new_files_and_drops_caches() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);
    store.resolve("colors").unwrap();
    store.resolve("dragon").unwrap();
    assert_eq!(store.resolve("weather"), None);

    write(dir.path(), "weather.txt", "rain\n");
    write(dir.path(), "colors.txt", "purple\n");
    store.refresh();

    assert_eq!(store.loaded_keys(), vec!["beasts/land", "beasts/sea"]);
    assert_eq!(texts(&store.resolve("weather").unwrap()), vec!["rain"]);
    assert_eq!(texts(&store.resolve("colors").unwrap()), vec!["purple"]);
}

#[test]
fn test_lazy_read_failure_is_recoverable() {
    let dir = fixture();
    let store = store(&dir, LoadMode::Lazy);
    fs::remove_file(dir.path().join("colors.txt")).unwrap();

    assert_eq!(store.resolve("colors"), None);
    assert!(!store.loaded_keys().contains(&"colors".to_string()));
}

#[test]
fn test_lazy_read_failure_falls_back_like_eager() {
    let dir = fixture();
    write(dir.path(), "dragon.txt", "own\n");
    let lazy = store(&dir, LoadMode::Lazy);
    fs::remove_file(dir.path().join("dragon.txt")).unwrap();
    let eager = store(&dir, LoadMode::Eager);

    let expected = vec!["ember", "wyvern", "wyrm"];
    assert_eq!(texts(&lazy.resolve("dragon").unwrap()), expected);
    assert_eq!(texts(&eager.resolve("dragon").unwrap()), expected);
}

#[test]
fn test_store_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WildcardStore>();
}

#[test]
fn test_malformed_yaml_is_skipped() {
    let dir = fixture();
    write(dir.path(), "broken.yaml", "a: [b, c\n");
    let store = store(&dir, LoadMode::Eager);
    assert!(store.resolve("colors").is_some());
    assert!(store.resolve("beasts/sea").is_some());
}

#[test]
fn test_mode_detection_uses_size_limit() {
    let dir = fixture();

    let eager = WildcardStore::new(StoreConfig::with_dirs([dir.path()]));
    assert_eq!(eager.mode(), LoadMode::Eager);

    let lazy = WildcardStore::new(StoreConfig {
        cache_limit_mb: 0.0,
        ..StoreConfig::with_dirs([dir.path()])
    });
    assert_eq!(lazy.mode(), LoadMode::Lazy);
}

#[test]
fn test_missing_root_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = WildcardStore::new(StoreConfig::with_dirs([dir.path().join("nope")]));
    assert_eq!(store.total_available(), 0);
    assert_eq!(store.resolve("anything"), None);
}
