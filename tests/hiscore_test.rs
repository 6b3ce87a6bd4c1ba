//! Tests for the high-score table.

use connect_log2::{DATETIME_FORMAT, HiScoreTable, Score};
use connect_log2_engine::FinalReport;
use std::fs;
use tempfile::TempDir;

fn score(points: u128, user: &str) -> Score {
    Score::new(points, 5, user.to_string(), "2024-01-01 00:00:00".to_string())
}

fn points(table: &HiScoreTable) -> Vec<u128> {
    table.scores().iter().map(|s| *s.points()).collect()
}

#[test]
fn test_missing_file_gives_empty_table() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let table = HiScoreTable::load(dir.path().join("hiscore.json"));
    assert!(table.is_empty());
}

#[test]
fn test_sorted_descending_and_stable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut table = HiScoreTable::load(dir.path().join("hiscore.json"));
    assert!(table.insert(score(50, "a")));
    assert!(table.insert(score(200, "b")));
    assert!(table.insert(score(10, "c")));
    assert!(table.insert(score(200, "d")));

    assert_eq!(points(&table), [200, 200, 50, 10]);
    let users: Vec<&str> = table.scores().iter().map(|s| s.user().as_str()).collect();
    assert_eq!(users, ["b", "d", "a", "c"]);
}

#[test]
fn test_table_keeps_top_ten() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut table = HiScoreTable::load(dir.path().join("hiscore.json"));
    for p in 1..=10 {
        assert!(table.insert(score(p * 100, "p")));
    }
    assert_eq!(table.len(), HiScoreTable::MAX_SCORES);

    // Equal to the tenth place is not enough
    assert!(!table.insert(score(100, "late")));
    assert!(!table.insert(score(5, "late")));
    assert!(!table.qualifies(100));
    assert!(table.qualifies(101));

    assert!(table.insert(score(150, "new")));
    assert_eq!(table.len(), HiScoreTable::MAX_SCORES);
    assert_eq!(points(&table).last(), Some(&150));
    assert!(!points(&table).contains(&100));
}

#[test]
fn test_accepted_score_is_written() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hiscore.json");
    let mut table = HiScoreTable::load(&path);
    assert!(table.add_score(FinalReport::new(4096, 11), "alice"));

    let reloaded = HiScoreTable::load(&path);
    assert_eq!(reloaded.len(), 1);
    let entry = &reloaded.scores()[0];
    assert_eq!(*entry.points(), 4096);
    assert_eq!(*entry.tile(), 11);
    assert_eq!(entry.user(), "alice");
    assert!(chrono::NaiveDateTime::parse_from_str(entry.datetime(), DATETIME_FORMAT).is_ok());
}

#[test]
fn test_file_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hiscore.json");
    let mut table = HiScoreTable::load(&path);
    table.insert(score(1234, "bob"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("Read failed")).expect("JSON");
    assert_eq!(
        json,
        serde_json::json!([
            {"points": 1234, "tile": 5, "user": "bob", "datetime": "2024-01-01 00:00:00"}
        ])
    );
}

#[test]
fn test_loaded_file_is_sorted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hiscore.json");
    fs::write(
        &path,
        r#"[{"points": 3, "tile": 2, "user": "x", "datetime": "t"},
            {"points": 30, "tile": 5, "user": "y", "datetime": "t"}]"#,
    )
    .expect("Write failed");

    let table = HiScoreTable::load(&path);
    assert_eq!(points(&table), [30, 3]);
}

#[test]
fn test_oversized_file_is_cut_to_top_ten() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hiscore.json");
    let entries: Vec<Score> = (1..=15u128)
        .map(|p| score(p * 10, &format!("u{p}")))
        .collect();
    fs::write(&path, serde_json::to_string(&entries).expect("Serialize")).expect("Write failed");

    let table = HiScoreTable::load(&path);
    assert_eq!(table.len(), HiScoreTable::MAX_SCORES);
    assert_eq!(
        points(&table),
        [150, 140, 130, 120, 110, 100, 90, 80, 70, 60]
    );
    // The tenth best is 60, so a lower score no longer qualifies
    assert!(!table.qualifies(50));
    assert!(!table.qualifies(60));
    assert!(table.qualifies(61));
}

#[test]
fn test_corrupt_file_is_removed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hiscore.json");
    fs::write(&path, r#"[{"points": "lots"}]"#).expect("Write failed");

    let table = HiScoreTable::load(&path);
    assert!(table.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_store_creates_data_dir() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("hiscore.json");
    let mut table = HiScoreTable::load(&path);
    assert!(table.insert(score(8, "z")));
    assert!(path.exists());
}
