use std::fs;

use garden_core::enums::DefenderKind;
use garden_core::progression::ProgressionState;

use crate::store::progression_from_value;
use crate::{JsonFileStore, MemoryStore, ProgressionStore};

fn sample_progression() -> ProgressionState {
    let mut progression = ProgressionState::default();
    progression.coins = 230;
    progression.unlock(DefenderKind::Sunflower);
    progression.levels.insert(DefenderKind::Peashooter, 3);
    progression.max_level_reached = 3;
    progression.current_level = 3;
    progression
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("garden").join("progress.json"));

    let progression = sample_progression();
    store.save(&progression).unwrap();
    assert!(store.path().exists());

    let loaded = store.load();
    assert_eq!(loaded, progression);
}

#[test]
fn test_missing_file_loads_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("nope.json"));
    assert_eq!(store.load(), ProgressionState::default());
}

#[test]
fn test_garbage_file_loads_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    fs::write(&path, "{ this is not json").unwrap();
    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.load(), ProgressionState::default());
}

#[test]
fn test_malformed_fields_fall_back_individually() {
    let value = serde_json::json!({
        "coins": "lots",
        "unlocked": ["Peashooter", "Sunflower"],
        "levels": {"Peashooter": 2},
        "max_level_reached": -4,
        "current_level": 2
    });
    let progression = progression_from_value(value);
    assert_eq!(progression.coins, 0);
    assert_eq!(
        progression.unlocked,
        vec![DefenderKind::Peashooter, DefenderKind::Sunflower]
    );
    assert_eq!(progression.level_of(DefenderKind::Peashooter), 2);
    assert_eq!(progression.max_level_reached, 1);
    assert_eq!(progression.current_level, 2);
}

#[test]
fn test_unknown_archetype_drops_only_that_field() {
    let value = serde_json::json!({
        "coins": 70,
        "unlocked": ["Peashooter", "Cactus"]
    });
    let progression = progression_from_value(value);
    assert_eq!(progression.coins, 70);
    assert_eq!(progression.unlocked, vec![DefenderKind::Peashooter]);
}

#[test]
fn test_non_object_loads_default() {
    assert_eq!(
        progression_from_value(serde_json::json!([1, 2, 3])),
        ProgressionState::default()
    );
}

#[test]
fn test_memory_store_shares_slot_between_clones() {
    let handle = MemoryStore::new();
    let mut store = handle.clone();
    assert_eq!(store.load(), ProgressionState::default());

    let progression = sample_progression();
    store.save(&progression).unwrap();
    store.save(&progression).unwrap();

    assert_eq!(handle.saved(), Some(progression));
    assert_eq!(handle.save_count(), 2);
}

#[test]
fn test_memory_store_with_seeds_load() {
    let mut store = MemoryStore::with(sample_progression());
    assert_eq!(store.load().coins, 230);
    assert_eq!(store.save_count(), 0);
}
