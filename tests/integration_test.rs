//! Integration tests for the zipcode-import CLI.
//!
//! These tests run the actual binary against a scratch directory and inspect
//! the resulting database.

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Copy the sample CSV into `data_dir` under the expected name
fn stage_sample(data_dir: &Path) {
    fs::create_dir_all(data_dir).unwrap();
    fs::copy(
        test_data_path("utf_ken_all_sample.csv"),
        data_dir.join("utf_ken_all.csv"),
    )
    .unwrap();
}

/// Dump the table in a stable order
fn dump_table(db_path: &Path) -> Vec<Vec<Option<String>>> {
    let conn = Connection::open(db_path).unwrap();
    let mut stmt = conn
        .prepare(
            "SELECT zipcode, pref, city, town, pref_kana, city_kana, town_kana
             FROM postal_codes ORDER BY rowid",
        )
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            (0..7)
                .map(|i| row.get::<_, Option<String>>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .unwrap();
    let table: Vec<_> = rows.map(|r| r.unwrap()).collect();
    table
}

#[test]
fn test_imports_sample_file() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 8 records"));

    let rows = dump_table(&dir.path().join("zipcode.db"));
    assert_eq!(rows.len(), 8);
}

#[test]
fn test_otemachi_row_mapping() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success();

    let conn = Connection::open(dir.path().join("zipcode.db")).unwrap();
    let row: (String, String, String, String, String, String) = conn
        .query_row(
            "SELECT zipcode, pref, city, pref_kana, city_kana, town_kana
             FROM postal_codes WHERE town = '大手町'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
        )
        .unwrap();

    assert_eq!(
        row,
        (
            "1000004".to_string(),
            "東京都".to_string(),
            "千代田区".to_string(),
            "ﾄｳｷｮｳﾄ".to_string(),
            "ﾁﾖﾀﾞｸ".to_string(),
            "ｵｵﾃﾏﾁ".to_string(),
        )
    );
}

#[test]
fn test_shared_zipcode_keeps_both_rows() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success();

    let conn = Connection::open(dir.path().join("zipcode.db")).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM postal_codes WHERE zipcode = '1000004'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_rerun_replaces_database() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());
    let db_path = dir.path().join("zipcode.db");

    for _ in 0..2 {
        Command::cargo_bin("zipcode-import")
            .unwrap()
            .arg("--data-dir")
            .arg(dir.path())
            .assert()
            .success();
    }
    let second = dump_table(&db_path);

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed existing database file"));
    let third = dump_table(&db_path);

    assert_eq!(second.len(), 8);
    assert_eq!(second, third);
}

#[test]
fn test_creates_missing_data_dir() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure();

    assert!(data_dir.is_dir());
    assert!(!data_dir.join("zipcode.db").exists());
}

#[test]
fn test_missing_input_error() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file not found"))
        .stderr(predicate::str::contains("Japan Post"));
}

#[test]
fn test_missing_input_leaves_existing_db() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("zipcode.db");
    fs::write(&db_path, b"keep me").unwrap();

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure();

    assert_eq!(fs::read(&db_path).unwrap(), b"keep me");
}

#[test]
fn test_input_and_db_overrides() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("out").join("postal.db");

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--input")
        .arg(test_data_path("utf_ken_all_sample.csv"))
        .arg("--db")
        .arg(&db_path)
        .assert()
        .success();

    assert_eq!(dump_table(&db_path).len(), 8);
}

#[test]
fn test_progress_reported() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--progress-every")
        .arg("4")
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 4 records"))
        .stderr(predicate::str::contains("Processed 8 records"));
}

#[test]
fn test_corrupt_input_rolls_back() {
    let dir = tempdir().unwrap();
    stage_sample(dir.path());
    let input = dir.path().join("utf_ken_all.csv");
    let mut bytes = fs::read(&input).unwrap();
    bytes.extend_from_slice(b"13101,\"100  \",\"1000005\",\"\xff\xfe\"\n");
    fs::write(&input, bytes).unwrap();

    Command::cargo_bin("zipcode-import")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import aborted"))
        .stderr(predicate::str::contains("CSV parsing error"));

    assert!(dump_table(&dir.path().join("zipcode.db")).is_empty());
}
