// CLI integration tests for the fibber binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const TABLE: &str = "\
# test table
0.0.0.0/0      upstream
10.0.0.0/8     peer-a
10.1.0.0/16    peer-b
192.0.2.0/24   peer-c
192.0.2.128/25 peer-d
";

fn write_table(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("routes.table");
    std::fs::write(&path, TABLE).unwrap();
    path
}

#[test]
fn test_build_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["build", table.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("prefixes read"))
        .stderr(predicate::str::contains("routes"));
}

#[test]
fn test_build_stats_emits_json() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    let output = Command::cargo_bin("fibber")
        .unwrap()
        .args(["build", table.to_str().unwrap(), "--stats"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stats: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // 6 prefixes: the /0 splits into two /1 entries
    assert_eq!(stats["prefixes"], 6);
    assert_eq!(stats["prefixes_by_length"][8], 1);
    assert!(stats["trie"]["arena_bytes"].as_u64().unwrap() > 0);
}

#[test]
fn test_query_resolves_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args([
            "query",
            table.to_str().unwrap(),
            "10.1.2.3",
            "10.2.0.1",
            "192.0.2.200",
            "8.8.8.8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.1.2.3 -> 10.1.0.0/16 via peer-b"))
        .stdout(predicate::str::contains("via peer-a"))
        .stdout(predicate::str::contains("via peer-d"))
        .stdout(predicate::str::contains("8.8.8.8 -> "));
}

#[test]
fn test_query_reads_stdin_until_quit() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["query", table.to_str().unwrap()])
        .write_stdin("10.1.2.3\nquit\n10.2.0.1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("via peer-b"))
        .stdout(predicate::str::contains("10.2.0.1").not());
}

#[test]
fn test_query_without_default_route_reports_miss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.table");
    std::fs::write(&path, "10.0.0.0/8 peer-a\n").unwrap();

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["query", path.to_str().unwrap(), "11.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11.0.0.1 -> no route"));
}

#[test]
fn test_verify_agrees_on_sample() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["verify", table.to_str().unwrap(), "--count", "5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("addresses agree"));
}

#[test]
fn test_bench_reports_both_structures() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["bench", table.to_str().unwrap(), "--count", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("radix:"))
        .stdout(predicate::str::contains("compiled:"));
}

#[test]
fn test_missing_table_fails() {
    Command::cargo_bin("fibber")
        .unwrap()
        .args(["build", "/nonexistent/routes.table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading route table"));
}

#[test]
fn test_malformed_table_fails_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.table");
    std::fs::write(&path, "10.0.0.0/8 peer-a\n10.0.0.0/40 peer-b\n").unwrap();

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["build", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_bad_query_address_fails() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_table(&dir);

    Command::cargo_bin("fibber")
        .unwrap()
        .args(["query", table.to_str().unwrap(), "not-an-ip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad IPv4 address"));
}
