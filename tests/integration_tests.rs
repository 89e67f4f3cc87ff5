//! Integration tests for the forkjoin CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary running in an isolated directory with its own HOME and no FORKJOIN_* leakage
fn forkjoin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("forkjoin").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("FORKJOIN_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fork/join"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("forkjoin"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_sum_prints_the_total() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["-q", "sum", "--n", "20", "--threshold", "5"])
        .assert()
        .success()
        .stdout("210\n");
}

#[test]
fn test_sum_reports_agreement_with_sequential_sum() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["sum", "--n", "1000", "--threshold", "3", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500500"))
        .stdout(predicate::str::contains("Matches the sequential sum"));
}

#[test]
fn test_sum_rejects_zero_threshold() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["sum", "--n", "20", "--threshold", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be at least 1"));
}

#[test]
fn test_words_defaults_to_sample_sentence() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["-q", "words"])
        .assert()
        .success()
        .stdout("Found 19 words\n");
}

#[test]
fn test_words_counts_given_text() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["-q", "words", "the quick brown fox", "--min-split", "2", "--threshold", "1"])
        .assert()
        .success()
        .stdout("Found 4 words\n");
}

#[test]
fn test_words_joins_multiple_arguments() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["-q", "words", "  leading", "trailing  ", "caffè"])
        .assert()
        .success()
        .stdout("Found 3 words\n");
}

#[test]
fn test_words_rejects_zero_min_split() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["words", "--min-split", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimum split size must be at least 1"));
}

#[test]
fn test_custom_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tuning.toml");
    fs::write(&config_path, "[sum]\nn = 100\nthreshold = 7\n").unwrap();

    forkjoin(&dir)
        .arg("-q")
        .arg("--config")
        .arg(&config_path)
        .arg("sum")
        .assert()
        .success()
        .stdout("5050\n");
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["--config", "does-not-exist.toml", "sum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_repository_config_and_environment_layers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("forkjoin.toml"), "[sum]\nn = 10\n").unwrap();

    forkjoin(&dir)
        .args(["-q", "sum"])
        .assert()
        .success()
        .stdout("55\n");

    forkjoin(&dir)
        .env("FORKJOIN_SUM__N", "4")
        .args(["-q", "sum"])
        .assert()
        .success()
        .stdout("10\n");

    forkjoin(&dir)
        .env("FORKJOIN_SUM__N", "4")
        .args(["-q", "sum", "--n", "3"])
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn test_config_show() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[word_count]"))
        .stdout(predicate::str::contains("threshold = 10000"));

    forkjoin(&dir)
        .args(["--threads", "3", "config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"threads\": 3"));
}

#[test]
fn test_config_validate() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    fs::write(dir.path().join("forkjoin.yaml"), "bench:\n  runs: 0\n").unwrap();
    forkjoin(&dir)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn test_bench_reports_fastest_strategy() {
    let dir = TempDir::new().unwrap();
    forkjoin(&dir)
        .args(["bench", "--n", "1000", "--runs", "2", "--threshold", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fork/join task"))
        .stdout(predicate::str::contains("Parallel range sum"))
        .stdout(predicate::str::contains("result 500500"))
        .stdout(predicate::str::contains("Fastest:"));
}
