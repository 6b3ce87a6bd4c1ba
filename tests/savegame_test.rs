//! Tests for the save slot.

use connect_log2::SaveSlot;
use connect_log2_engine::{GridDimensions, GridSnapshot};
use std::fs;
use tempfile::TempDir;

fn slot(dir: &TempDir) -> SaveSlot {
    SaveSlot::new(dir.path().join("savegame.json"))
}

#[test]
fn test_missing_slot_loads_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    assert!(!slot.exists());
    assert_eq!(slot.load(GridDimensions::default()), None);
}

#[test]
fn test_store_then_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    let cells: Vec<u8> = (0..30).map(|i| (i % 9) as u8 + 1).collect();
    let snapshot = GridSnapshot::new(cells);

    slot.store(&snapshot).expect("Store failed");
    assert!(slot.exists());
    assert_eq!(slot.load(GridDimensions::default()), Some(snapshot));
}

#[test]
fn test_payload_is_plain_array() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    let dims = GridDimensions::new(2, 2).expect("valid");
    slot.store(&GridSnapshot::new(vec![1, 0, 3, 60])).expect("Store failed");

    let content = fs::read_to_string(slot.path()).expect("Read failed");
    assert_eq!(content, "[1,0,3,60]");
    assert_eq!(slot.load(dims).map(|s| s.into_cells()), Some(vec![1, 0, 3, 60]));
}

#[test]
fn test_wrong_size_is_discarded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    slot.store(&GridSnapshot::new(vec![1; 12])).expect("Store failed");

    assert_eq!(slot.load(GridDimensions::default()), None);
    assert!(!slot.exists());
}

#[test]
fn test_corrupt_payload_is_discarded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    fs::write(slot.path(), "{not json").expect("Write failed");

    assert_eq!(slot.load(GridDimensions::default()), None);
    assert!(!slot.exists());
}

#[test]
fn test_remove_is_idempotent() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let slot = slot(&dir);
    slot.store(&GridSnapshot::new(vec![1; 30])).expect("Store failed");
    slot.remove().expect("First remove failed");
    slot.remove().expect("Second remove failed");
    assert!(!slot.exists());
}
