//! Integration tests for the `drawlots` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drawlots() -> Command {
    let mut cmd = Command::cargo_bin("drawlots").unwrap();
    cmd.env_remove("RUST_LOG").args(["--lang", "en"]);
    cmd
}

fn json_of(args: &[&str]) -> serde_json::Value {
    let output = drawlots().args(args).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// draw
// ---------------------------------------------------------------------------

#[test]
fn draw_picks_one_of_the_options() {
    let out = json_of(&["--seed", "7", "draw", "Pizza", "Sushi", "Tacos", "--json"]);
    let result = out["result"].as_str().unwrap();
    assert!(["Pizza", "Sushi", "Tacos"].contains(&result));
    let index = out["index"].as_u64().unwrap() as usize;
    assert_eq!(out["options"][index], result);
    assert_eq!(out["mode"], "jar");
}

#[test]
fn draw_duration_within_jar_range() {
    let out = json_of(&["--seed", "3", "draw", "a", "b", "--json"]);
    let duration = out["duration"].as_u64().unwrap();
    assert!((5000..=10000).contains(&duration));
}

#[test]
fn draw_is_reproducible_with_seed() {
    let first = drawlots()
        .args(["--seed", "99", "draw", "a", "b", "c", "d", "--json"])
        .output()
        .unwrap();
    let second = drawlots()
        .args(["--seed", "99", "draw", "a", "b", "c", "d", "--json"])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn draw_needs_two_options() {
    drawlots()
        .args(["draw", "lonely"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 options"));
}

#[test]
fn draw_collapses_duplicates() {
    drawlots()
        .args(["draw", "same", " same "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 options"));
}

#[test]
fn draw_human_output() {
    drawlots()
        .args(["--seed", "1", "draw", "red", "blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result"))
        .stdout(predicate::str::contains("Draw from jar"));
}

#[test]
fn draw_truncates_long_labels() {
    let out = json_of(&[
        "--seed",
        "5",
        "draw",
        "a very long option label indeed",
        "short",
        "--json",
    ]);
    assert_eq!(out["options"][0], "a very long opt");
}

#[test]
fn draw_in_chinese() {
    Command::cargo_bin("drawlots")
        .unwrap()
        .args(["--lang", "zh", "--seed", "1", "draw", "甲", "乙"])
        .assert()
        .success()
        .stdout(predicate::str::contains("抓阄结果"));
}

#[test]
fn unknown_language_fails() {
    Command::cargo_bin("drawlots")
        .unwrap()
        .args(["--lang", "xx", "draw", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown language"));
}

// ---------------------------------------------------------------------------
// spin
// ---------------------------------------------------------------------------

#[test]
fn spin_at_fifty_power() {
    let out = json_of(&["--seed", "11", "spin", "A", "B", "--power", "50", "--json"]);
    assert_eq!(out["power"], 50);
    assert_eq!(out["extra_rounds"], 7);
    assert_eq!(out["duration"], 4000);
    assert!(out["rotation_target"].as_f64().unwrap() > 2520.0);
    let result = out["result"].as_str().unwrap();
    assert!(["A", "B"].contains(&result));
}

#[test]
fn spin_full_power() {
    let out = json_of(&["--seed", "2", "spin", "x", "y", "z", "--power", "100", "--json"]);
    assert_eq!(out["power"], 100);
    assert_eq!(out["extra_rounds"], 10);
}

#[test]
fn spin_odd_power_rounds_up_to_tick() {
    let out = json_of(&["--seed", "2", "spin", "x", "y", "--power", "11", "--json"]);
    assert_eq!(out["power"], 12);
}

#[test]
fn weak_spin_is_discarded() {
    drawlots()
        .args(["spin", "A", "B", "--power", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too weak"));
}

#[test]
fn spin_human_output() {
    drawlots()
        .args(["--seed", "4", "spin", "A", "B", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lucky wheel"))
        .stdout(predicate::str::contains("Rounds"));
}

// ---------------------------------------------------------------------------
// shuffle
// ---------------------------------------------------------------------------

#[test]
fn shuffle_keeps_every_option() {
    drawlots()
        .args(["--seed", "8", "shuffle", "one", "two", "three"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one"))
        .stdout(predicate::str::contains("two"))
        .stdout(predicate::str::contains("three"));
}

// ---------------------------------------------------------------------------
// plan
// ---------------------------------------------------------------------------

#[test]
fn plan_four_segments() {
    let out = json_of(&["plan", "--options", "4", "--index", "1", "--power", "50", "--json"]);
    assert_eq!(out["extra_rounds"], 7);
    assert_eq!(out["target"].as_f64().unwrap(), 2745.0);
    assert_eq!(out["baseline"].as_f64().unwrap(), 225.0);
    assert_eq!(out["lands_on"], 1);
}

#[test]
fn plan_from_previous_rest() {
    let out = json_of(&[
        "plan", "--options", "6", "--index", "2", "--last", "225", "--json",
    ]);
    assert_eq!(out["lands_on"], 2);
    assert!(out["target"].as_f64().unwrap() > 225.0 + 360.0 * 7.0);
}

#[test]
fn plan_human_output() {
    drawlots()
        .args(["plan", "-n", "3", "-i", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lands on"))
        .stdout(predicate::str::contains("segment 0"));
}

#[test]
fn plan_index_out_of_range() {
    drawlots()
        .args(["plan", "--options", "3", "--index", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_file_overrides_jar_duration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draw.json");
    fs::write(&path, r#"{ "jar_duration_min": 1234, "jar_duration_max": 1234 }"#).unwrap();
    let out = json_of(&[
        "--config",
        path.to_str().unwrap(),
        "--seed",
        "1",
        "draw",
        "a",
        "b",
        "--json",
    ]);
    assert_eq!(out["duration"], 1234);
}

#[test]
fn config_seed_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draw.json");
    fs::write(&path, r#"{ "seed": 21 }"#).unwrap();
    let from_file = json_of(&[
        "--config",
        path.to_str().unwrap(),
        "draw",
        "a",
        "b",
        "c",
        "--json",
    ]);
    let from_flag = json_of(&["--seed", "21", "draw", "a", "b", "c", "--json"]);
    assert_eq!(from_file, from_flag);
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draw.json");
    fs::write(&path, r#"{ "jar_duration_min": 9000, "jar_duration_max": 10 }"#).unwrap();
    drawlots()
        .args(["--config", path.to_str().unwrap(), "draw", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn missing_config_file() {
    drawlots()
        .args(["--config", "/nonexistent/draw.json", "draw", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
